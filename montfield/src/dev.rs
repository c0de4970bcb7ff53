//! Test macros which stamp out the standard checks for a field element type.

/// Implement all tests for a [`FieldElement`][`crate::FieldElement`] type.
#[macro_export]
macro_rules! test_prime_field {
    ($fe:tt) => {
        $crate::test_field_identity!($fe);
        $crate::test_field_invert!($fe);
        $crate::test_field_sqrt!($fe);
        $crate::test_field_laws!($fe);
    };
}

/// Implement field element identity tests.
#[macro_export]
macro_rules! test_field_identity {
    ($fe:tt) => {
        #[test]
        fn zero_is_additive_identity() {
            let zero = $fe::ZERO;
            let one = $fe::ONE;
            assert_eq!(zero.add(&zero), zero);
            assert_eq!(one.add(&zero), one);
        }

        #[test]
        fn one_is_multiplicative_identity() {
            let one = $fe::ONE;
            assert_eq!(one.multiply(&one), one);
            assert_eq!(one.to_canonical()[0], 1);
        }

        #[test]
        fn minus_one_plus_one_is_zero() {
            let minus_one = -$fe::ONE;
            assert_eq!(minus_one + $fe::ONE, $fe::ZERO);
            assert_eq!(minus_one.square(), $fe::ONE);
        }
    };
}

/// Implement field element inversion tests.
#[macro_export]
macro_rules! test_field_invert {
    ($fe:tt) => {
        #[test]
        fn invert() {
            let one = $fe::ONE;
            assert_eq!(one.invert().unwrap(), one);

            let three = one + &one + &one;
            let inv_three = three.invert().unwrap();
            assert_eq!(three * &inv_three, one);

            let minus_three = -three;
            let inv_minus_three = minus_three.invert().unwrap();
            assert_eq!(inv_minus_three, -inv_three);
            assert_eq!(three * &inv_minus_three, -one);

            assert!(bool::from($fe::ZERO.invert().is_none()));

            assert_eq!(three.divide(&three).unwrap(), one);
            assert_eq!(one.divide(&minus_three).unwrap(), inv_minus_three);
            assert!(bool::from(three.divide(&$fe::ZERO).is_none()));
        }
    };
}

/// Implement field element square root tests.
#[macro_export]
macro_rules! test_field_sqrt {
    ($fe:tt) => {
        #[test]
        fn sqrt() {
            for &n in &[0u64, 1, 4, 9, 16, 25, 36, 49, 64] {
                let fe = $fe::from_u64(n);
                assert_ne!(fe.legendre(), $crate::LegendreSymbol::MinusOne);
                let sqrt = $crate::ff::Field::sqrt(&fe).unwrap();
                assert_eq!(sqrt.square(), fe);
            }
        }

        #[test]
        fn legendre_is_not_constant() {
            let mut seen_one = false;
            let mut seen_minus_one = false;

            for n in 1..64u64 {
                match $fe::from_u64(n).legendre() {
                    $crate::LegendreSymbol::One => seen_one = true,
                    $crate::LegendreSymbol::MinusOne => seen_minus_one = true,
                    $crate::LegendreSymbol::Zero => panic!("{n} is zero"),
                }
            }

            assert!(seen_one && seen_minus_one);
        }
    };
}

/// Implement ring law tests over pseudo-random elements.
///
/// Elements are drawn from a fixed xorshift sequence so failures are reproducible.
#[macro_export]
macro_rules! test_field_laws {
    ($fe:tt) => {
        fn sample_element(state: &mut u64) -> $fe {
            let mut words = [0 as $crate::Word; $fe::LIMBS];

            for word in words.iter_mut() {
                *state ^= *state << 13;
                *state ^= *state >> 7;
                *state ^= *state << 17;
                *word = *state;
            }

            $fe::from_words_reduced(&words)
        }

        #[test]
        fn ring_laws() {
            let mut state = 0x2545_f491_4f6c_dd1d;

            for _ in 0..256 {
                let a = sample_element(&mut state);
                let b = sample_element(&mut state);
                let c = sample_element(&mut state);

                assert_eq!(a + b, b + a);
                assert_eq!(a * b, b * a);
                assert_eq!((a + b) + c, a + (b + c));
                assert_eq!((a * b) * c, a * (b * c));
                assert_eq!(a * (b + c), a * b + a * c);
                assert_eq!(a - b, a + (-b));
                assert_eq!(a - b, -(b - a));
                assert_eq!((a - b) - c, a - (b + c));
                assert_eq!(a + (-a), $fe::ZERO);
                assert_eq!(a * $fe::ZERO, $fe::ZERO);
                assert_eq!(a + $fe::ZERO, a);
                assert_eq!(a * $fe::ONE, a);
                assert_eq!(a.double(), a + a);
                assert_eq!(a.square(), a * a);
            }
        }

        #[test]
        fn multiplicative_inverses() {
            let mut state = 0x9e37_79b9_7f4a_7c15;

            for _ in 0..32 {
                let a = sample_element(&mut state);

                if bool::from(a.is_zero()) {
                    continue;
                }

                let inverse = a.invert().unwrap();
                assert_eq!(a * inverse, $fe::ONE);
                assert_eq!(inverse.invert().unwrap(), a);
                assert_eq!(a.square().legendre(), $crate::LegendreSymbol::One);
            }
        }

        #[test]
        fn canonical_round_trip() {
            let mut state = 0x0123_4567_89ab_cdef;

            for _ in 0..32 {
                let a = sample_element(&mut state);
                assert_eq!($fe::from_words(&a.to_canonical()).unwrap(), a);
            }
        }
    };
}
