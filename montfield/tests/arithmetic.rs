//! Property-based tests of field arithmetic against native integer references.

use montfield::{
    FieldParams, LegendreSymbol, Word,
    arithmetic,
    ff::Field,
    primes::{Fp64_0, Fp64_1, Fp128_0, Fp128_1, Fp256_1, P64_0, P64_1, P128_0, P128_1, P256_1},
};
use proptest::{prelude::any, prop_assert, prop_assert_eq, prop_compose, proptest};

const M61: u128 = (1 << 61) - 1;
const M64: u128 = (1 << 64) - 59;

fn mul_mod(a: u128, b: u128, p: u128) -> u128 {
    debug_assert!(p < 1 << 64);
    (a % p) * (b % p) % p
}

fn to_u128(words: [Word; 2]) -> u128 {
    (words[1] as u128) << 64 | words[0] as u128
}

prop_compose! {
    fn fp64_0()(words in any::<[u64; 1]>()) -> Fp64_0 {
        Fp64_0::from_words_reduced(&words)
    }
}

prop_compose! {
    fn fp64_1()(words in any::<[u64; 1]>()) -> Fp64_1 {
        Fp64_1::from_words_reduced(&words)
    }
}

prop_compose! {
    fn fp128_0()(words in any::<[u64; 2]>()) -> Fp128_0 {
        Fp128_0::from_words_reduced(&words)
    }
}

prop_compose! {
    fn fp128_1()(words in any::<[u64; 2]>()) -> Fp128_1 {
        Fp128_1::from_words_reduced(&words)
    }
}

prop_compose! {
    fn fp256_1()(words in any::<[u64; 4]>()) -> Fp256_1 {
        Fp256_1::from_words_reduced(&words)
    }
}

macro_rules! single_word_reference {
    ($module:ident, $fe:ident, $strategy:ident, $p:expr) => {
        mod $module {
            use super::*;

            proptest! {
                #[test]
                fn add(a in $strategy(), b in $strategy()) {
                    let (x, y) = (a.to_canonical()[0] as u128, b.to_canonical()[0] as u128);
                    prop_assert_eq!((a + b).to_canonical()[0] as u128, (x + y) % $p);
                }

                #[test]
                fn sub(a in $strategy(), b in $strategy()) {
                    let (x, y) = (a.to_canonical()[0] as u128, b.to_canonical()[0] as u128);
                    prop_assert_eq!((a - b).to_canonical()[0] as u128, (x + $p - y) % $p);
                }

                #[test]
                fn mul(a in $strategy(), b in $strategy()) {
                    let (x, y) = (a.to_canonical()[0] as u128, b.to_canonical()[0] as u128);
                    prop_assert_eq!((a * b).to_canonical()[0] as u128, mul_mod(x, y, $p));
                }

                #[test]
                fn neg(a in $strategy()) {
                    let x = a.to_canonical()[0] as u128;
                    prop_assert_eq!((-a).to_canonical()[0] as u128, ($p - x) % $p);
                }

                #[test]
                fn from_words_reduced(word in any::<u64>()) {
                    let fe = $fe::from_words_reduced(&[word]);
                    prop_assert_eq!(fe.to_canonical()[0] as u128, word as u128 % $p);
                }
            }
        }
    };
}

single_word_reference!(p64_0, Fp64_0, fp64_0, M61);
single_word_reference!(p64_1, Fp64_1, fp64_1, M64);

macro_rules! field_properties {
    ($module:ident, $fe:ident, $strategy:ident) => {
        mod $module {
            use super::*;

            proptest! {
                #[test]
                fn add_then_sub(a in $strategy(), b in $strategy()) {
                    prop_assert_eq!(a + b - b, a);
                }

                #[test]
                fn invert(a in $strategy()) {
                    let inverse = a.invert();
                    prop_assert_eq!(bool::from(inverse.is_some()), !bool::from(a.is_zero()));

                    if let Some(inverse) = Option::<$fe>::from(inverse) {
                        prop_assert_eq!(a * inverse, $fe::ONE);
                    }
                }

                #[test]
                fn sqrt_of_square(a in $strategy()) {
                    let square = a.square();
                    let root = square.sqrt().unwrap();
                    prop_assert!(root == a || root == -a);
                }

                #[test]
                fn legendre_matches_sqrt(a in $strategy()) {
                    let has_root = bool::from(a.sqrt().is_some());
                    prop_assert_eq!(has_root, a.legendre() != LegendreSymbol::MinusOne);
                }

                #[test]
                fn legendre_is_multiplicative(a in $strategy(), b in $strategy()) {
                    prop_assert_eq!((a * b).legendre(), a.legendre() * b.legendre());
                }

                #[test]
                fn pow_matches_repeated_multiplication(a in $strategy(), e in 0u64..64) {
                    let mut expected = $fe::ONE;
                    for _ in 0..e {
                        expected *= a;
                    }
                    prop_assert_eq!(a.pow(&[e]), expected);
                }

                #[test]
                fn field_trait_sqrt_ratio(a in $strategy(), b in $strategy()) {
                    let (is_square, root) = $fe::sqrt_ratio(&a, &b);

                    if bool::from(is_square) && !bool::from(b.is_zero()) {
                        prop_assert_eq!(root.square() * b, a);
                    }
                }
            }
        }
    };
}

field_properties!(fp64_0_properties, Fp64_0, fp64_0);
field_properties!(fp64_1_properties, Fp64_1, fp64_1);
field_properties!(fp128_0_properties, Fp128_0, fp128_0);
field_properties!(fp128_1_properties, Fp128_1, fp128_1);
field_properties!(fp256_1_properties, Fp256_1, fp256_1);

proptest! {
    #[test]
    fn reduce_full_single_word(x in any::<u64>()) {
        let p64_0 = <P64_0 as FieldParams<1>>::PARAMS;
        let p64_1 = <P64_1 as FieldParams<1>>::PARAMS;
        prop_assert_eq!(arithmetic::reduce_full(&[x], &p64_0)[0] as u128, x as u128 % M61);
        prop_assert_eq!(arithmetic::reduce_full(&[x], &p64_1)[0] as u128, x as u128 % M64);
    }

    #[test]
    fn reduce_full_two_words(x in any::<[u64; 2]>()) {
        let p128_0 = <P128_0 as FieldParams<2>>::PARAMS;
        let p128_1 = <P128_1 as FieldParams<2>>::PARAMS;
        let value = to_u128(x);

        prop_assert_eq!(
            to_u128(arithmetic::reduce_full(&x, &p128_0)),
            value % to_u128(*p128_0.modulus())
        );
        prop_assert_eq!(
            to_u128(arithmetic::reduce_full(&x, &p128_1)),
            value % to_u128(*p128_1.modulus())
        );
    }

    #[test]
    fn reduce_wide_single_word(lo in any::<u64>(), hi in any::<u64>()) {
        let params = <P64_1 as FieldParams<1>>::PARAMS;
        let value = (hi as u128) << 64 | lo as u128;
        prop_assert_eq!(arithmetic::reduce_wide(&[lo], &[hi], &params)[0] as u128, value % M64);
    }

    #[test]
    fn montgomery_reduce_single_word(lo in any::<u64>(), hi in 0..M61 as u64) {
        let params = <P64_0 as FieldParams<1>>::PARAMS;
        let value = (hi as u128) << 64 | lo as u128;
        let reduced = arithmetic::montgomery_reduce(&[lo], &[hi], &params)[0] as u128;

        // reduced * R == hi * R + lo
        let r = params.one()[0] as u128;
        prop_assert_eq!(mul_mod(reduced, r, M61), value % M61);
    }

    #[test]
    fn barrett_agrees_with_montgomery(lo in any::<[u64; 4]>(), hi in any::<[u64; 4]>()) {
        // (hi * R + lo) mod p computed two ways
        let params = <P256_1 as FieldParams<4>>::PARAMS;
        let hi_reduced = arithmetic::reduce_full(&hi, &params);
        let via_montgomery = arithmetic::to_montgomery(
            &arithmetic::montgomery_reduce(&lo, &hi_reduced, &params),
            &params,
        );
        prop_assert_eq!(arithmetic::reduce_wide(&lo, &hi, &params), via_montgomery);
    }

    #[test]
    fn to_montgomery_wide_accepts_any_value(x in any::<[u64; 4]>()) {
        let params = <P256_1 as FieldParams<4>>::PARAMS;
        let reduced = arithmetic::reduce_full(&x, &params);
        prop_assert_eq!(
            arithmetic::to_montgomery_wide(&x, &params),
            arithmetic::to_montgomery(&reduced, &params)
        );
    }
}
