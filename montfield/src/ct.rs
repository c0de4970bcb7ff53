//! Branch-free word primitives.
//!
//! Conditions are carried as a single bit in a [`Word`] (`0` or `1`) and expanded into an
//! all-zeros or all-ones mask before being applied. None of these functions branch on or index by
//! their inputs.

use crate::limbs::{WORD_BITS, Word};
use subtle::Choice;

/// Expand a bit (`0` or `1`) into a mask: `0` → `0x00..00`, `1` → `0xff..ff`.
#[inline(always)]
pub const fn mask(bit: Word) -> Word {
    bit.wrapping_neg()
}

/// `1` if `w != 0`, `0` otherwise.
#[inline(always)]
pub const fn is_nonzero(w: Word) -> Word {
    (w | w.wrapping_neg()) >> (WORD_BITS - 1)
}

/// `1` if `w == 0`, `0` otherwise.
#[inline(always)]
pub const fn is_zero(w: Word) -> Word {
    is_nonzero(w) ^ 1
}

/// `1` if every word of `a` is zero.
pub const fn is_zero_words(a: &[Word]) -> Word {
    let mut acc = 0;
    let mut i = 0;

    while i < a.len() {
        acc |= a[i];
        i += 1;
    }

    is_zero(acc)
}

/// `1` if `a == b`.
pub const fn eq<const N: usize>(a: &[Word; N], b: &[Word; N]) -> Word {
    let mut acc = 0;
    let mut i = 0;

    while i < N {
        acc |= a[i] ^ b[i];
        i += 1;
    }

    is_zero(acc)
}

/// Return `b` where `mask` is all ones and `a` where it is zero.
#[inline(always)]
pub const fn select_word(a: Word, b: Word, mask: Word) -> Word {
    a ^ (mask & (a ^ b))
}

/// Word-wise [`select_word`].
pub const fn select<const N: usize>(a: &[Word; N], b: &[Word; N], mask: Word) -> [Word; N] {
    let mut out = [0; N];
    let mut i = 0;

    while i < N {
        out[i] = select_word(a[i], b[i], mask);
        i += 1;
    }

    out
}

/// Exchange `a` and `b` where `mask` is all ones.
pub const fn swap<const N: usize>(a: &mut [Word; N], b: &mut [Word; N], mask: Word) {
    let mut i = 0;

    while i < N {
        let t = mask & (a[i] ^ b[i]);
        a[i] ^= t;
        b[i] ^= t;
        i += 1;
    }
}

/// Convert a bit into a [`Choice`].
#[inline]
pub fn choice(bit: Word) -> Choice {
    Choice::from((bit & 1) as u8)
}
