//! Modular arithmetic on raw word arrays.
//!
//! Field operations take their operands in Montgomery form (`a·R mod p`) and fully reduced, i.e.
//! strictly less than `p`, and return results that are fully reduced as well. The functions that
//! accept arbitrary integers say so. Nothing here branches on operand values.

use crate::{
    MulVariant, PrimeParams,
    ct,
    limbs::{self, Word},
    params::MAX_LIMBS,
};

/// `a += b & mask`, returning the carry.
const fn add_masked<const LIMBS: usize>(
    a: &mut [Word; LIMBS],
    b: &[Word; LIMBS],
    mask: Word,
) -> Word {
    let mut carry = 0;
    let mut i = 0;

    while i < LIMBS {
        let (w, c) = limbs::adc(a[i], b[i] & mask, carry);
        a[i] = w;
        carry = c;
        i += 1;
    }

    carry
}

/// `a -= b & mask`, returning the borrow.
const fn sub_masked<const LIMBS: usize>(
    a: &mut [Word; LIMBS],
    b: &[Word; LIMBS],
    mask: Word,
) -> Word {
    let mut borrow = 0;
    let mut i = 0;

    while i < LIMBS {
        let (w, c) = limbs::sbb(a[i], b[i] & mask, borrow);
        a[i] = w;
        borrow = c;
        i += 1;
    }

    borrow
}

/// Subtract `p` from the `LIMBS + 1`-word value `hi:a` if it is at least `p`.
///
/// `hi:a` must be less than `2p`.
const fn sub_modulus<const LIMBS: usize>(
    a: &[Word; LIMBS],
    hi: Word,
    p: &[Word; LIMBS],
) -> [Word; LIMBS] {
    let mut reduced = [0; LIMBS];
    let borrow = limbs::sub(&mut reduced, a, p);
    ct::select(a, &reduced, ct::mask(hi | (borrow ^ 1)))
}

/// Reduce `a < 2p` into `[0, p)`.
pub const fn reduce<const LIMBS: usize>(
    a: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let p = params.modulus();
    let mut out = [0; LIMBS];
    let borrow = limbs::sub(&mut out, a, p);
    add_masked(&mut out, p, ct::mask(borrow));
    out
}

/// `a + b mod p`.
pub const fn add<const LIMBS: usize>(
    a: &[Word; LIMBS],
    b: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let mut sum = [0; LIMBS];
    let carry = limbs::add(&mut sum, a, b);

    // A carry out of the top word only happens when the modulus fills its words; subtracting p
    // (wrapping) then leaves the true sum minus p, which is already in range.
    match params.mul_variant() {
        MulVariant::FullWidth => {
            sub_masked(&mut sum, params.modulus(), ct::mask(carry));
        }
        MulVariant::SpareBit => {}
    }

    reduce(&sum, params)
}

/// `a - b mod p`.
pub const fn sub<const LIMBS: usize>(
    a: &[Word; LIMBS],
    b: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let mut out = [0; LIMBS];
    let borrow = limbs::sub(&mut out, a, b);
    add_masked(&mut out, params.modulus(), ct::mask(borrow));
    out
}

/// `-a mod p`.
pub const fn neg<const LIMBS: usize>(
    a: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    sub(&[0; LIMBS], a, params)
}

/// Montgomery product `a * b * R^-1 mod p`.
///
/// Inputs may be any values less than `p`, not only Montgomery forms, which is how conversions in
/// and out of Montgomery form are expressed.
pub const fn mul<const LIMBS: usize>(
    a: &[Word; LIMBS],
    b: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    match params.mul_variant() {
        MulVariant::SpareBit => mul_spare_bit(a, b, params),
        MulVariant::FullWidth => mul_full_width(a, b, params),
    }
}

/// Montgomery square `a^2 * R^-1 mod p`.
pub const fn square<const LIMBS: usize>(
    a: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    mul(a, a, params)
}

/// Coarsely integrated operand scanning (CIOS) for moduli with the top bit clear.
///
/// The running value stays below `2p`, so one word `t_hi` above the `LIMBS`-word accumulator
/// holds every carry.
const fn mul_spare_bit<const LIMBS: usize>(
    a: &[Word; LIMBS],
    b: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let p = params.modulus();
    let n0 = params.neg_inv()[0];
    let mut t = [0; LIMBS];
    let mut t_hi: Word = 0;
    let mut i = 0;

    while i < LIMBS {
        let mut carry = 0;
        let mut j = 0;

        while j < LIMBS {
            let (w, c) = limbs::mac(t[j], a[j], b[i], carry);
            t[j] = w;
            carry = c;
            j += 1;
        }

        t_hi = t_hi.wrapping_add(carry);

        // Add m * p so the low word vanishes, then shift down one word
        let m = t[0].wrapping_mul(n0);
        let (_, mut carry) = limbs::mac(t[0], m, p[0], 0);
        j = 1;

        while j < LIMBS {
            let (w, c) = limbs::mac(t[j], m, p[j], carry);
            t[j - 1] = w;
            carry = c;
            j += 1;
        }

        let (w, c) = limbs::adc(t_hi, carry, 0);
        t[LIMBS - 1] = w;
        t_hi = c;
        i += 1;
    }

    sub_modulus(&t, t_hi, p)
}

/// CIOS for moduli that fill every bit of their words.
///
/// `a * b_i` added to a running value near `R` can exceed `2^(64 * (LIMBS + 1))`, so the
/// accumulator carries a second guard word `t_guard`.
const fn mul_full_width<const LIMBS: usize>(
    a: &[Word; LIMBS],
    b: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let p = params.modulus();
    let n0 = params.neg_inv()[0];
    let mut t = [0; LIMBS];
    let mut t_hi: Word = 0;
    let mut i = 0;

    while i < LIMBS {
        let mut carry = 0;
        let mut j = 0;

        while j < LIMBS {
            let (w, c) = limbs::mac(t[j], a[j], b[i], carry);
            t[j] = w;
            carry = c;
            j += 1;
        }

        let (w, t_guard) = limbs::adc(t_hi, carry, 0);
        t_hi = w;

        let m = t[0].wrapping_mul(n0);
        let (_, mut carry) = limbs::mac(t[0], m, p[0], 0);
        j = 1;

        while j < LIMBS {
            let (w, c) = limbs::mac(t[j], m, p[j], carry);
            t[j - 1] = w;
            carry = c;
            j += 1;
        }

        let (w, c) = limbs::adc(t_hi, carry, 0);
        t[LIMBS - 1] = w;
        t_hi = t_guard + c;
        i += 1;
    }

    sub_modulus(&t, t_hi, p)
}

/// Montgomery reduction of the double-width value `hi:lo`, i.e. `(hi * R + lo) * R^-1 mod p`.
///
/// `hi` must be less than `p`; `lo` is arbitrary.
///
/// With `q = lo * p^-1 mod R`, the low half of `q * p` equals `lo`, so the result is
/// `hi - floor(q * p / R)`, plus `p` if that is negative.
pub const fn montgomery_reduce<const LIMBS: usize>(
    lo: &[Word; LIMBS],
    hi: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let p = params.modulus();
    let mut q = [0; LIMBS];
    limbs::mul(&mut q, lo, params.inv());
    let mut qp_hi = [0; LIMBS];
    limbs::mul_shifted(&mut qp_hi, &q, p, LIMBS);

    let mut out = [0; LIMBS];
    let borrow = limbs::sub(&mut out, hi, &qp_hi);
    add_masked(&mut out, p, ct::mask(borrow));
    out
}

/// Convert an integer less than `p` into Montgomery form: `x * R mod p`.
pub const fn to_montgomery<const LIMBS: usize>(
    x: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    mul(x, params.r2(), params)
}

/// Convert an arbitrary `LIMBS`-word integer into Montgomery form.
///
/// Reduction (`x * R^-1`) followed by a multiplication by `R^3` (`* R^2 * R^-1`) yields `x * R`
/// for any `x < R` without a separate reduction step.
pub const fn to_montgomery_wide<const LIMBS: usize>(
    x: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let reduced = montgomery_reduce(x, &[0; LIMBS], params);
    mul(&reduced, params.r3(), params)
}

/// Convert out of Montgomery form: `a * R^-1 mod p`.
pub const fn from_montgomery<const LIMBS: usize>(
    a: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let mut one = [0; LIMBS];
    one[0] = 1;
    mul(a, &one, params)
}

/// Barrett reduction of the double-width value `hi:lo` modulo `p` (HAC algorithm 14.42).
///
/// Unlike [`montgomery_reduce`] this computes the plain residue `(hi * R + lo) mod p` and accepts
/// any `hi`.
pub const fn reduce_wide<const LIMBS: usize>(
    lo: &[Word; LIMBS],
    hi: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    let p = params.modulus();
    let (mu_lo, mu_hi) = params.barrett_mu();

    // q1 = floor(x / b^(k - 1))
    let mut q1_buf = [0; MAX_LIMBS + 1];
    let (q1, _) = q1_buf.split_at_mut(LIMBS + 1);
    q1[0] = lo[LIMBS - 1];
    let mut i = 0;

    while i < LIMBS {
        q1[i + 1] = hi[i];
        i += 1;
    }

    let mut mu_buf = [0; MAX_LIMBS + 1];
    let (mu, _) = mu_buf.split_at_mut(LIMBS + 1);
    limbs::copy(mu, mu_lo);
    mu[LIMBS] = mu_hi;

    // q3 = floor(q1 * mu / b^(k + 1))
    let mut q3_buf = [0; MAX_LIMBS + 1];
    let (q3, _) = q3_buf.split_at_mut(LIMBS + 1);
    limbs::mul_shifted(q3, q1, mu, LIMBS + 1);

    // r = (x mod b^(k + 1)) - (q3 * p mod b^(k + 1))
    let mut r1_buf = [0; MAX_LIMBS + 1];
    let (r1, _) = r1_buf.split_at_mut(LIMBS + 1);
    limbs::copy(r1, lo);
    r1[LIMBS] = hi[0];

    let mut r2_buf = [0; MAX_LIMBS + 1];
    let (r2, _) = r2_buf.split_at_mut(LIMBS + 1);
    limbs::mul(r2, q3, p);

    let mut r_buf = [0; MAX_LIMBS + 1];
    let (r, _) = r_buf.split_at_mut(LIMBS + 1);
    limbs::sub(r, r1, r2);

    // r < 3p
    let mut pass = 0;

    while pass < 2 {
        let mut tmp_buf = [0; MAX_LIMBS + 1];
        let (tmp, _) = tmp_buf.split_at_mut(LIMBS + 1);
        let borrow = limbs::sub(tmp, r, p);
        let mask = ct::mask(borrow ^ 1);
        i = 0;

        while i <= LIMBS {
            r[i] = ct::select_word(r[i], tmp[i], mask);
            i += 1;
        }

        pass += 1;
    }

    let mut out = [0; LIMBS];
    limbs::copy(&mut out, r);
    out
}

/// Reduce an arbitrary `LIMBS`-word integer modulo `p`.
pub const fn reduce_full<const LIMBS: usize>(
    x: &[Word; LIMBS],
    params: &PrimeParams<LIMBS>,
) -> [Word; LIMBS] {
    reduce_wide(x, &[0; LIMBS], params)
}
