//! Fixed-width multi-precision arithmetic over little-endian arrays of 64-bit words.
//!
//! Every function writes a result whose width is the length of the output slice: operand words
//! past the end of an input are read as zero, and anything that does not fit in the output is
//! discarded (i.e. results are taken modulo `2^(64 * out.len())`).
//!
//! With the exception of the `*_vartime` functions, which are only used while deriving
//! parameters for a modulus, all functions execute the same sequence of word operations for any
//! operand values of a given width.

use crate::params::MAX_LIMBS;
use core::cmp::Ordering;

/// Unsigned machine word: the base digit of every multi-precision integer in this crate.
pub type Word = u64;

/// Double-width word used for carries and products.
pub type WideWord = u128;

/// Number of bits in a [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// Scratch capacity for long division: a `2 * MAX_LIMBS + 1`-word dividend plus normalization.
pub(crate) const SCRATCH_WORDS: usize = 2 * MAX_LIMBS + 2;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn adc(a: Word, b: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + (b as WideWord) + (carry as WideWord);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow (`0` or `1`).
#[inline(always)]
pub const fn sbb(a: Word, b: Word, borrow: Word) -> (Word, Word) {
    let ret = (a as WideWord).wrapping_sub((b as WideWord) + (borrow as WideWord));
    (ret as Word, (ret >> (2 * WORD_BITS - 1)) as Word)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn mac(a: Word, b: Word, c: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + ((b as WideWord) * (c as WideWord)) + (carry as WideWord);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Word `i` of `a`, or zero past its end.
#[inline(always)]
const fn word_at(a: &[Word], i: usize) -> Word {
    if i < a.len() { a[i] } else { 0 }
}

/// Copy `a` into `out`, zero-extending or truncating.
pub const fn copy(out: &mut [Word], a: &[Word]) {
    let mut i = 0;
    while i < out.len() {
        out[i] = word_at(a, i);
        i += 1;
    }
}

/// `out = a + b`, returning the carry out of the top word of `out`.
pub const fn add(out: &mut [Word], a: &[Word], b: &[Word]) -> Word {
    let mut carry = 0;
    let mut i = 0;

    while i < out.len() {
        let (w, c) = adc(word_at(a, i), word_at(b, i), carry);
        out[i] = w;
        carry = c;
        i += 1;
    }

    carry
}

/// `out = a - b`, returning the borrow out of the top word of `out`.
pub const fn sub(out: &mut [Word], a: &[Word], b: &[Word]) -> Word {
    let mut borrow = 0;
    let mut i = 0;

    while i < out.len() {
        let (w, b) = sbb(word_at(a, i), word_at(b, i), borrow);
        out[i] = w;
        borrow = b;
        i += 1;
    }

    borrow
}

/// `out = a * b` (schoolbook).
pub const fn mul(out: &mut [Word], a: &[Word], b: &[Word]) {
    mul_shifted(out, a, b, 0);
}

/// `out = (a * b) >> (64 * skip)`.
///
/// Product columns are accumulated into a rolling three-word `(v, u, t)` accumulator and emitted
/// one word at a time, so columns below `skip` are computed (for their carries) but not stored.
pub const fn mul_shifted(out: &mut [Word], a: &[Word], b: &[Word], skip: usize) {
    let (mut v, mut u, mut t) = (0, 0, 0);
    let mut col = 0;

    while col < skip + out.len() {
        let mut j = if col >= b.len() { col + 1 - b.len() } else { 0 };

        while j <= col && j < a.len() {
            let product = (a[j] as WideWord) * (b[col - j] as WideWord);
            let (lo, carry) = adc(v, product as Word, 0);
            let (hi, carry) = adc(u, (product >> WORD_BITS) as Word, carry);
            v = lo;
            u = hi;
            t += carry;
            j += 1;
        }

        if col >= skip {
            out[col - skip] = v;
        }

        v = u;
        u = t;
        t = 0;
        col += 1;
    }
}

/// `out = a * w`, returning the word carried out of the top of `out`.
pub const fn mul_word(out: &mut [Word], a: &[Word], w: Word) -> Word {
    let mut carry = 0;
    let mut i = 0;

    while i < out.len() {
        let (lo, hi) = mac(0, word_at(a, i), w, carry);
        out[i] = lo;
        carry = hi;
        i += 1;
    }

    carry
}

/// `out = a << shift`.
///
/// Variable time with respect to `shift`.
pub const fn shl(out: &mut [Word], a: &[Word], shift: u32) {
    let words = (shift / WORD_BITS) as usize;
    let bits = shift % WORD_BITS;
    let mut i = 0;

    while i < out.len() {
        let mut w = 0;

        if i >= words {
            w = word_at(a, i - words) << bits;

            if bits > 0 && i > words {
                w |= word_at(a, i - words - 1) >> (WORD_BITS - bits);
            }
        }

        out[i] = w;
        i += 1;
    }
}

/// `out = a >> shift`.
///
/// Variable time with respect to `shift`.
pub const fn shr(out: &mut [Word], a: &[Word], shift: u32) {
    let words = (shift / WORD_BITS) as usize;
    let bits = shift % WORD_BITS;
    let mut i = 0;

    while i < out.len() {
        let mut w = word_at(a, i + words) >> bits;

        if bits > 0 {
            w |= word_at(a, i + words + 1) << (WORD_BITS - bits);
        }

        out[i] = w;
        i += 1;
    }
}

/// Compare `a` with `b`, treating missing words as zero.
///
/// **This operation is variable time.**
pub const fn cmp_vartime(a: &[Word], b: &[Word]) -> Ordering {
    let mut i = if a.len() > b.len() { a.len() } else { b.len() };

    while i > 0 {
        i -= 1;
        let (x, y) = (word_at(a, i), word_at(b, i));

        if x > y {
            return Ordering::Greater;
        }

        if x < y {
            return Ordering::Less;
        }
    }

    Ordering::Equal
}

/// Number of words up to and including the most significant non-zero word.
const fn significant_words(a: &[Word]) -> usize {
    let mut n = a.len();

    while n > 0 && a[n - 1] == 0 {
        n -= 1;
    }

    n
}

/// Bit length of `a`: the position of its highest set bit plus one, or zero if `a == 0`.
///
/// **This operation is variable time.**
pub const fn bits_vartime(a: &[Word]) -> u32 {
    let n = significant_words(a);

    if n == 0 {
        0
    } else {
        (n as u32 - 1) * WORD_BITS + (WORD_BITS - a[n - 1].leading_zeros())
    }
}

/// Long division: `quo = num / den`, `rem = num % den`, each truncated to its slice.
///
/// Uses Knuth's Algorithm D (TAOCP vol. 2, §4.3.1): the divisor is normalized so its top bit is
/// set, each quotient digit is estimated from a two-word trial division and corrected at most
/// twice, and a final add-back repairs the rare overestimate.
///
/// **This operation is variable time.** It is only used when deriving parameters.
///
/// # Panics
///
/// - If `den` is zero
/// - If `num` is wider than the internal scratch space (`2 * MAX_LIMBS + 1` words)
pub const fn div_rem_vartime(quo: &mut [Word], rem: &mut [Word], num: &[Word], den: &[Word]) {
    let n = significant_words(den);
    assert!(n > 0, "division by zero");

    let len = significant_words(num);
    assert!(len < SCRATCH_WORDS, "dividend is too wide");

    copy(quo, &[]);
    copy(rem, &[]);

    if len < n {
        copy(rem, num);
        return;
    }

    if n == 1 {
        let d = den[0] as WideWord;
        let mut r: WideWord = 0;
        let mut i = len;

        while i > 0 {
            i -= 1;
            let cur = (r << WORD_BITS) | (num[i] as WideWord);

            if i < quo.len() {
                quo[i] = (cur / d) as Word;
            }

            r = cur % d;
        }

        if !rem.is_empty() {
            rem[0] = r as Word;
        }

        return;
    }

    // Normalize so the top bit of the divisor is set
    let s = den[n - 1].leading_zeros();
    let mut v = [0 as Word; SCRATCH_WORDS];
    let mut u = [0 as Word; SCRATCH_WORDS];
    let mut i = 0;

    while i < n {
        v[i] = den[i] << s;

        if s > 0 && i > 0 {
            v[i] |= den[i - 1] >> (WORD_BITS - s);
        }

        i += 1;
    }

    i = 0;
    while i <= len {
        u[i] = word_at(num, i) << s;

        if s > 0 && i > 0 {
            u[i] |= num[i - 1] >> (WORD_BITS - s);
        }

        i += 1;
    }

    let base: WideWord = 1 << WORD_BITS;
    let v_top = v[n - 1] as WideWord;
    let v_next = v[n - 2] as WideWord;
    let mut j = len - n + 1;

    while j > 0 {
        j -= 1;

        // Estimate the quotient digit from the top two words of the current remainder
        let num2 = ((u[j + n] as WideWord) << WORD_BITS) | (u[j + n - 1] as WideWord);
        let mut qhat = num2 / v_top;
        let mut rhat = num2 % v_top;
        let mut corrections = 0;

        while corrections < 2
            && (qhat >= base || qhat * v_next > ((rhat << WORD_BITS) | u[j + n - 2] as WideWord))
        {
            qhat -= 1;
            rhat += v_top;
            corrections += 1;

            if rhat >= base {
                break;
            }
        }

        // Multiply and subtract
        let mut q = qhat as Word;
        let mut carry = 0;
        let mut borrow = 0;
        let mut k = 0;

        while k < n {
            let (product, c) = mac(0, q, v[k], carry);
            carry = c;
            let (w, b) = sbb(u[j + k], product, borrow);
            u[j + k] = w;
            borrow = b;
            k += 1;
        }

        let (w, b) = sbb(u[j + n], carry, borrow);
        u[j + n] = w;

        // Estimate was one too large: add the divisor back
        if b != 0 {
            q -= 1;
            carry = 0;
            k = 0;

            while k < n {
                let (w, c) = adc(u[j + k], v[k], carry);
                u[j + k] = w;
                carry = c;
                k += 1;
            }

            u[j + n] = u[j + n].wrapping_add(carry);
        }

        if j < quo.len() {
            quo[j] = q;
        }
    }

    // Denormalize the remainder
    i = 0;
    while i < n && i < rem.len() {
        rem[i] = u[i] >> s;

        if s > 0 {
            rem[i] |= u[i + 1] << (WORD_BITS - s);
        }

        i += 1;
    }
}
