//! Standard field tests for every predefined prime, plus end-to-end checks on `2^61 - 1`.

use hex_literal::hex;
use montfield::{LegendreSymbol, Word, primes::*};

macro_rules! prime_field_tests {
    ($($module:ident => $fe:ident),+ $(,)?) => {
        $(
            mod $module {
                use montfield::{primes::$fe, test_prime_field};

                test_prime_field!($fe);
            }
        )+
    };
}

prime_field_tests!(
    p64_0 => Fp64_0,
    p64_1 => Fp64_1,
    p128_0 => Fp128_0,
    p128_1 => Fp128_1,
    p192_0 => Fp192_0,
    p192_1 => Fp192_1,
    p256_0 => Fp256_0,
    p256_1 => Fp256_1,
    p512_0 => Fp512_0,
    p512_1 => Fp512_1,
);

#[test]
fn small_product() {
    let a = Fp64_0::from_u64(42);
    let b = Fp64_0::from_u64(17);
    assert_eq!((a * b).to_canonical(), [714]);
}

#[test]
fn wraparound_to_zero() {
    let p_minus_one = Fp64_0::from_words(&[(1 << 61) - 2]).unwrap();
    assert_eq!((p_minus_one + Fp64_0::ONE).to_canonical(), [0]);
}

#[test]
fn zero_edge_cases() {
    assert_eq!(Fp64_0::ZERO.legendre(), LegendreSymbol::Zero);
    assert_eq!(Fp64_0::ZERO.sqrt().unwrap(), Fp64_0::ZERO);
}

#[test]
fn square_root_of_four() {
    let four = Fp64_0::from_u64(4);
    assert_eq!(four.legendre(), LegendreSymbol::One);
    assert_eq!(four.sqrt().unwrap().square(), four);
}

#[test]
fn montgomery_one_is_r_mod_p() {
    assert_eq!(Fp64_0::ONE.to_montgomery_words(), [8]);
    assert_eq!(Fp64_1::ONE.to_montgomery_words(), [59]);
    assert_eq!(Fp128_1::ONE.to_montgomery_words(), [173, 0]);
}

#[test]
fn reduction_of_all_ones() {
    // R - 1 ≡ (R mod p) - 1
    fn check<P: montfield::FieldParams<LIMBS>, const LIMBS: usize>() {
        let params = P::PARAMS;
        let mut expected = *params.one();
        expected[0] -= 1;
        assert_eq!(montfield::arithmetic::reduce_full(&[Word::MAX; LIMBS], &params), expected);
    }

    check::<P64_0, 1>();
    check::<P64_1, 1>();
    check::<P128_0, 2>();
    check::<P128_1, 2>();
    check::<P192_0, 3>();
    check::<P192_1, 3>();
    check::<P256_0, 4>();
    check::<P256_1, 4>();
    check::<P512_0, 8>();
    check::<P512_1, 8>();
}

#[test]
fn minus_one_encodings() {
    let mut bytes = [0u8; 32];
    (-Fp256_0::ONE).write_bytes(&mut bytes).unwrap();
    assert_eq!(
        bytes,
        hex!("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")
    );

    let mut bytes = [0u8; 24];
    (-Fp192_1::ONE).write_bytes(&mut bytes).unwrap();
    assert_eq!(bytes, hex!("7fffffffffffffffffffffffffffffffffffffffffffffec"));

    let mut bytes = [0u8; 64];
    (-Fp512_0::ONE).write_bytes(&mut bytes).unwrap();
    assert_eq!(
        bytes,
        hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "0000000000000000fffffffffffffffefffffffffffffffffffffffffffffffe"
        )
    );
    assert_eq!(Fp512_0::from_slice(&bytes), Some(-Fp512_0::ONE));
}

#[test]
fn encoded_lengths() {
    assert_eq!(Fp64_0::BYTE_LEN, 8);
    assert_eq!(Fp128_0::BYTE_LEN, 16);
    assert_eq!(Fp192_1::BYTE_LEN, 24);
    assert_eq!(Fp256_0::BYTE_LEN, 32);
    assert_eq!(Fp512_1::BYTE_LEN, 64);
}
