//! Prime field parameters derived from the modulus.

use crate::{
    ByteOrder, Error, Result,
    limbs::{self, SCRATCH_WORDS, WORD_BITS, Word},
};

/// Largest supported modulus width, in words.
pub const MAX_LIMBS: usize = 32;

/// Variant of the Montgomery multiplication kernel selected for a modulus.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MulVariant {
    /// The top bit of the modulus is clear: intermediate products fit in one word of headroom.
    SpareBit,

    /// The modulus fills every bit of its words: intermediate products need a second guard word.
    FullWidth,
}

/// Constants needed for arithmetic modulo an odd prime `p` of `LIMBS` 64-bit words.
///
/// Everything here is derived from `p` alone, and every derivation is a `const fn`, so
/// descriptors for fixed moduli are computed entirely at compile time.
///
/// `R` denotes `2^(64 * LIMBS)`, the Montgomery radix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrimeParams<const LIMBS: usize> {
    modulus: [Word; LIMBS],
    bits: u32,
    one: [Word; LIMBS],
    r2: [Word; LIMBS],
    r3: [Word; LIMBS],
    two_pow_bits: [Word; LIMBS],
    inv: [Word; LIMBS],
    neg_inv: [Word; LIMBS],
    pm1_half: [Word; LIMBS],
    pp1_half: [Word; LIMBS],
    pp1_quarter: [Word; LIMBS],
    pm2: [Word; LIMBS],
    barrett_mu: [Word; LIMBS],
    barrett_mu_hi: Word,
    mul_variant: MulVariant,
}

impl<const LIMBS: usize> PrimeParams<LIMBS> {
    /// Derive parameters for the modulus `p`, given as little-endian words.
    ///
    /// `p` must be an odd prime of exactly `LIMBS` significant words. Primality is not checked:
    /// for a composite modulus the ring operations still work but [`invert`] and [`sqrt`] results
    /// are meaningless.
    ///
    /// [`invert`]: crate::FieldElement::invert
    /// [`sqrt`]: crate::FieldElement::sqrt
    pub const fn new(modulus: [Word; LIMBS]) -> Result<Self> {
        if LIMBS == 0 {
            return Err(Error::ZeroLimbs);
        }

        if LIMBS > MAX_LIMBS {
            return Err(Error::TooManyLimbs);
        }

        let top = modulus[LIMBS - 1];

        if top == 0 {
            return Err(Error::HighWordZero);
        }

        if modulus[0] & 1 == 0 {
            return Err(Error::EvenModulus);
        }

        if LIMBS == 1 && modulus[0] < 3 {
            return Err(Error::ModulusTooSmall);
        }

        let bits = (LIMBS as u32 - 1) * WORD_BITS + (WORD_BITS - top.leading_zeros());
        let radix_bits = LIMBS as u32 * WORD_BITS;

        let inv = inv_mod_radix(&modulus);
        let mut neg_inv = [0; LIMBS];
        limbs::sub(&mut neg_inv, &[], &inv);

        // p is odd, so (p - 1) / 2 = p >> 1
        let mut pm1_half = [0; LIMBS];
        limbs::shr(&mut pm1_half, &modulus, 1);
        let mut pp1_half = [0; LIMBS];
        limbs::add(&mut pp1_half, &pm1_half, &[1]);
        let mut pp1_quarter = [0; LIMBS];
        limbs::shr(&mut pp1_quarter, &pp1_half, 1);
        let mut pm2 = [0; LIMBS];
        limbs::sub(&mut pm2, &modulus, &[2]);

        let (barrett_mu, barrett_mu_hi) = barrett_mu(&modulus);

        let mul_variant = if top >> (WORD_BITS - 1) == 1 {
            MulVariant::FullWidth
        } else {
            MulVariant::SpareBit
        };

        Ok(Self {
            modulus,
            bits,
            one: pow2_mod(&modulus, radix_bits),
            r2: pow2_mod(&modulus, 2 * radix_bits),
            r3: pow2_mod(&modulus, 3 * radix_bits),
            two_pow_bits: pow2_mod(&modulus, bits),
            inv,
            neg_inv,
            pm1_half,
            pp1_half,
            pp1_quarter,
            pm2,
            barrett_mu,
            barrett_mu_hi,
            mul_variant,
        })
    }

    /// Derive parameters for a modulus that is known to be valid.
    ///
    /// # Panics
    ///
    /// If [`PrimeParams::new`] would return an error. In a `const` context this is a compile
    /// error, which is how [`field_params!`][`crate::field_params`] rejects malformed moduli.
    pub const fn from_words(modulus: [Word; LIMBS]) -> Self {
        match Self::new(modulus) {
            Ok(params) => params,
            Err(Error::ZeroLimbs) => panic!("modulus must have at least one word"),
            Err(Error::TooManyLimbs) => panic!("modulus has too many words"),
            Err(Error::HighWordZero) => panic!("most significant word of modulus is zero"),
            Err(Error::EvenModulus) => panic!("modulus must be odd"),
            Err(Error::ModulusTooSmall) => panic!("modulus must be at least 3"),
            Err(Error::Length) => panic!("invalid modulus"),
        }
    }

    /// The modulus `p`.
    pub const fn modulus(&self) -> &[Word; LIMBS] {
        &self.modulus
    }

    /// Bit length of `p`.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Length in bytes of an encoded field element.
    pub const fn byte_len(&self) -> usize {
        self.bits.div_ceil(8) as usize
    }

    /// `R mod p`: the Montgomery form of 1.
    pub const fn one(&self) -> &[Word; LIMBS] {
        &self.one
    }

    /// `R^2 mod p`.
    pub const fn r2(&self) -> &[Word; LIMBS] {
        &self.r2
    }

    /// `R^3 mod p`.
    pub const fn r3(&self) -> &[Word; LIMBS] {
        &self.r3
    }

    /// `2^bits mod p`.
    pub const fn two_pow_bits(&self) -> &[Word; LIMBS] {
        &self.two_pow_bits
    }

    /// `p^-1 mod R`.
    pub const fn inv(&self) -> &[Word; LIMBS] {
        &self.inv
    }

    /// `-p^-1 mod R`.
    pub const fn neg_inv(&self) -> &[Word; LIMBS] {
        &self.neg_inv
    }

    /// `(p - 1) / 2`.
    pub const fn pm1_half(&self) -> &[Word; LIMBS] {
        &self.pm1_half
    }

    /// `(p + 1) / 2`.
    pub const fn pp1_half(&self) -> &[Word; LIMBS] {
        &self.pp1_half
    }

    /// `(p + 1) / 4`, rounded down.
    pub const fn pp1_quarter(&self) -> &[Word; LIMBS] {
        &self.pp1_quarter
    }

    /// `p - 2`.
    pub const fn pm2(&self) -> &[Word; LIMBS] {
        &self.pm2
    }

    /// Barrett constant `floor(2^(128 * LIMBS) / p)`, which is `LIMBS + 1` words long.
    ///
    /// Returned as the low `LIMBS` words and the top word.
    pub const fn barrett_mu(&self) -> (&[Word; LIMBS], Word) {
        (&self.barrett_mu, self.barrett_mu_hi)
    }

    /// Multiplication kernel for this modulus.
    pub const fn mul_variant(&self) -> MulVariant {
        self.mul_variant
    }
}

/// Static parameters for a prime field, generated by [`field_params!`][`crate::field_params`].
pub trait FieldParams<const LIMBS: usize>: Copy + Send + Sync + 'static {
    /// Derived modulus parameters.
    const PARAMS: PrimeParams<LIMBS>;

    /// Byte order of serialized field elements.
    const BYTE_ORDER: ByteOrder;
}

/// Inverse of an odd word modulo `2^64` by Newton iteration.
///
/// For odd `w`, `w * w ≡ 1 (mod 8)` so `w` is its own inverse to 3 bits, and each step doubles the
/// number of correct bits. Five steps reach 64 bits; the loop runs six, the count needed from a
/// seed correct to only 1 bit, and the extra step leaves a correct inverse unchanged.
const fn inv_word(w: Word) -> Word {
    let mut x = w;
    let mut i = 0;

    while i < 6 {
        x = x.wrapping_mul(2u64.wrapping_sub(w.wrapping_mul(x)));
        i += 1;
    }

    x
}

/// `p^-1 mod R`: lift the single-word inverse by Newton iteration `x = x * (2 - p * x)`.
const fn inv_mod_radix<const LIMBS: usize>(p: &[Word; LIMBS]) -> [Word; LIMBS] {
    let mut x = [0; LIMBS];
    x[0] = inv_word(p[0]);
    let mut precision = 1;

    while precision < LIMBS {
        let mut px = [0; LIMBS];
        limbs::mul(&mut px, p, &x);
        let mut correction = [0; LIMBS];
        limbs::sub(&mut correction, &[2], &px);
        let mut next = [0; LIMBS];
        limbs::mul(&mut next, &x, &correction);
        x = next;
        precision *= 2;
    }

    x
}

/// `2^exp mod p` by repeated doubling of `1`, subtracting `p` whenever the running value
/// (including the bit shifted out of the top word) reaches it.
const fn pow2_mod<const LIMBS: usize>(p: &[Word; LIMBS], exp: u32) -> [Word; LIMBS] {
    let mut x = [0; LIMBS];
    x[0] = 1;
    let mut i = 0;

    while i < exp {
        let mut carry = 0;
        let mut j = 0;

        while j < LIMBS {
            let w = x[j];
            x[j] = (w << 1) | carry;
            carry = w >> (WORD_BITS - 1);
            j += 1;
        }

        let mut reduced = [0; LIMBS];
        let borrow = limbs::sub(&mut reduced, &x, p);

        if carry == 1 || borrow == 0 {
            x = reduced;
        }

        i += 1;
    }

    x
}

/// `floor(2^(128 * LIMBS) / p)`, split into its low `LIMBS` words and top word.
const fn barrett_mu<const LIMBS: usize>(p: &[Word; LIMBS]) -> ([Word; LIMBS], Word) {
    let mut num_buf = [0; SCRATCH_WORDS];
    let (num, _) = num_buf.split_at_mut(2 * LIMBS + 1);
    num[2 * LIMBS] = 1;

    let mut quo_buf = [0; MAX_LIMBS + 1];
    let (quo, _) = quo_buf.split_at_mut(LIMBS + 1);
    limbs::div_rem_vartime(quo, &mut [], num, p);

    let mut lo = [0; LIMBS];
    limbs::copy(&mut lo, quo);
    (lo, quo[LIMBS])
}

#[cfg(test)]
mod tests {
    use super::*;

    const P61: [Word; 1] = [0x1fff_ffff_ffff_ffff];
    const P127: [Word; 2] = [0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff];
    const P256: [Word; 4] = [
        0xffff_ffff_ffff_ffff,
        0x0000_0000_ffff_ffff,
        0x0000_0000_0000_0000,
        0xffff_ffff_0000_0001,
    ];

    #[test]
    fn mersenne61() {
        let params = PrimeParams::new(P61).unwrap();
        assert_eq!(params.bits(), 61);
        assert_eq!(params.byte_len(), 8);
        assert_eq!(params.one(), &[8]);
        assert_eq!(params.r2(), &[0x40]);
        assert_eq!(params.r3(), &[0x200]);
        assert_eq!(params.two_pow_bits(), &[1]);
        assert_eq!(params.inv(), &[0xdfff_ffff_ffff_ffff]);
        assert_eq!(params.neg_inv(), &[0x2000_0000_0000_0001]);
        assert_eq!(params.pm1_half(), &[0x0fff_ffff_ffff_ffff]);
        assert_eq!(params.pp1_half(), &[0x1000_0000_0000_0000]);
        assert_eq!(params.pp1_quarter(), &[0x0800_0000_0000_0000]);
        assert_eq!(params.pm2(), &[0x1fff_ffff_ffff_fffd]);
        assert_eq!(params.barrett_mu(), (&[0x40], 8));
        assert_eq!(params.mul_variant(), MulVariant::SpareBit);
    }

    #[test]
    fn mersenne127() {
        let params = PrimeParams::new(P127).unwrap();
        assert_eq!(params.bits(), 127);
        assert_eq!(params.byte_len(), 16);
        assert_eq!(params.one(), &[2, 0]);
        assert_eq!(params.r2(), &[4, 0]);
        assert_eq!(params.r3(), &[8, 0]);
        assert_eq!(params.two_pow_bits(), &[1, 0]);
        assert_eq!(params.inv(), &[0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff]);
        assert_eq!(params.neg_inv(), &[1, 0x8000_0000_0000_0000]);
        assert_eq!(params.barrett_mu(), (&[4, 0], 2));
        assert_eq!(params.mul_variant(), MulVariant::SpareBit);
    }

    #[test]
    fn nist_p256() {
        let params = PrimeParams::new(P256).unwrap();
        assert_eq!(params.bits(), 256);
        assert_eq!(params.byte_len(), 32);
        assert_eq!(
            params.one(),
            &[
                0x0000_0000_0000_0001,
                0xffff_ffff_0000_0000,
                0xffff_ffff_ffff_ffff,
                0x0000_0000_ffff_fffe
            ]
        );
        assert_eq!(
            params.r2(),
            &[
                0x0000_0000_0000_0003,
                0xffff_fffb_ffff_ffff,
                0xffff_ffff_ffff_fffe,
                0x0000_0004_ffff_fffd
            ]
        );
        assert_eq!(
            params.r3(),
            &[
                0xffff_fffd_0000_000a,
                0xffff_ffed_ffff_fff7,
                0x0000_0005_ffff_fffc,
                0x0000_0018_0000_0001
            ]
        );
        assert_eq!(params.two_pow_bits(), params.one());
        assert_eq!(
            params.neg_inv(),
            &[1, 0x0000_0001_0000_0000, 0, 0xffff_ffff_0000_0002]
        );
        assert_eq!(
            params.barrett_mu(),
            (
                &[
                    0x0000_0000_0000_0003,
                    0xffff_fffe_ffff_ffff,
                    0xffff_fffe_ffff_fffe,
                    0x0000_0000_ffff_ffff
                ],
                1
            )
        );
        assert_eq!(params.mul_variant(), MulVariant::FullWidth);
    }

    #[test]
    fn inverse_identities() {
        fn check<const LIMBS: usize>(p: [Word; LIMBS]) {
            let params = PrimeParams::new(p).unwrap();

            let mut product = [0; LIMBS];
            limbs::mul(&mut product, params.modulus(), params.inv());
            let mut one = [0; LIMBS];
            one[0] = 1;
            assert_eq!(product, one);

            let mut sum = [0; LIMBS];
            let carry = limbs::add(&mut sum, params.inv(), params.neg_inv());
            assert_eq!(sum, [0; LIMBS]);
            assert_eq!(carry, 1);
        }

        check(P61);
        check(P127);
        check(P256);
        check([0xffff_ffff_ffff_ff13, u64::MAX, u64::MAX]);
        check([1, 0, 0, 0, 0, u64::MAX, u64::MAX, 0x7fff_ffff_ffff_ffff]);
    }

    #[test]
    fn word_inverse() {
        let words = [
            1,
            3,
            0x1fff_ffff_ffff_ffff,
            0xffff_ffff_ffff_ffc5,
            0x8000_0000_0000_0001,
            Word::MAX,
        ];

        for w in words {
            assert_eq!(w.wrapping_mul(inv_word(w)), 1, "w = {w:#x}");
        }
    }

    #[test]
    fn rejects_malformed_moduli() {
        assert_eq!(PrimeParams::<0>::new([]), Err(Error::ZeroLimbs));
        assert_eq!(PrimeParams::<33>::new([1; 33]), Err(Error::TooManyLimbs));
        assert_eq!(PrimeParams::new([5, 0]), Err(Error::HighWordZero));
        assert_eq!(PrimeParams::new([4, 1]), Err(Error::EvenModulus));
        assert_eq!(PrimeParams::new([1]), Err(Error::ModulusTooSmall));
        assert!(PrimeParams::new([3]).is_ok());
    }

    #[test]
    fn derived_at_compile_time() {
        const PARAMS: PrimeParams<1> = PrimeParams::from_words(P61);
        assert_eq!(PARAMS.one(), &[8]);
    }

    #[test]
    #[should_panic(expected = "modulus must be odd")]
    fn from_words_panics() {
        PrimeParams::from_words([10]);
    }
}
