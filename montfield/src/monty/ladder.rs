//! Exponentiation by Montgomery ladder, and the operations built on it.

use crate::{FieldElement, FieldParams, Word, limbs::WORD_BITS};
use core::ops::Mul;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Compute `base^exp` in any structure where `mul` is associative, with `one` its identity.
///
/// Walks all `64 * E` bits of `exp` from the top, keeping `(r0, r1) = (x^k, x^(k+1))` for the
/// prefix `k` seen so far. Each step is one `mul` and one squaring-by-`mul`; which register
/// receives which result is decided by a conditional swap keyed on the change in bit value, so the
/// sequence of operations does not depend on `exp`.
pub(crate) fn ladder<T, F, const E: usize>(base: &T, one: T, exp: &[Word; E], mul: F) -> T
where
    T: ConditionallySelectable,
    F: Fn(&T, &T) -> T,
{
    let mut r0 = one;
    let mut r1 = *base;
    let mut prev = 0u8;

    for i in (0..E).rev() {
        for j in (0..WORD_BITS).rev() {
            let bit = ((exp[i] >> j) & 1) as u8;
            T::conditional_swap(&mut r0, &mut r1, Choice::from(bit ^ prev));
            r1 = mul(&r0, &r1);
            r0 = mul(&r0, &r0);
            prev = bit;
        }
    }

    T::conditional_swap(&mut r0, &mut r1, Choice::from(prev));
    r0
}

/// Legendre symbol `(a / p)`: whether `a` is zero, a non-zero square, or a non-square modulo `p`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i8)]
pub enum LegendreSymbol {
    /// `a` is a quadratic non-residue.
    MinusOne = -1,

    /// `a ≡ 0 (mod p)`.
    Zero = 0,

    /// `a` is a non-zero quadratic residue.
    One = 1,
}

impl LegendreSymbol {
    /// Symbol for `-1`, `0` or `1`.
    ///
    /// # Panics
    ///
    /// On any other value.
    pub const fn from_i8(value: i8) -> Self {
        match value {
            -1 => Self::MinusOne,
            0 => Self::Zero,
            1 => Self::One,
            _ => panic!("Legendre symbol must be -1, 0 or 1"),
        }
    }

    /// Numeric value of the symbol.
    pub const fn to_i8(self) -> i8 {
        self as i8
    }

    /// Is this the symbol of a non-zero square?
    pub const fn is_one(self) -> bool {
        matches!(self, Self::One)
    }

    /// Is this the symbol of a non-square?
    pub const fn is_minus_one(self) -> bool {
        matches!(self, Self::MinusOne)
    }

    /// Is this the symbol of zero?
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
}

impl From<LegendreSymbol> for i8 {
    fn from(symbol: LegendreSymbol) -> i8 {
        symbol.to_i8()
    }
}

/// The symbol is multiplicative: `(ab / p) = (a / p)(b / p)`.
impl Mul for LegendreSymbol {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_i8(self.to_i8() * rhs.to_i8())
    }
}

impl<P, const LIMBS: usize> FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    /// Returns `self^exp`, where `exp` is a little-endian integer exponent of any width.
    ///
    /// Constant time with respect to both `self` and `exp`: every one of the `64 * E` exponent bits
    /// is processed.
    pub fn pow<const E: usize>(&self, exp: &[Word; E]) -> Self {
        ladder(self, Self::ONE, exp, Self::multiply)
    }

    /// Compute field inversion: `1 / self`, as `self^(p - 2)`.
    ///
    /// Returns the `CtOption` equivalent of `None` if `self` is zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow(P::PARAMS.pm2()), !self.is_zero())
    }

    /// Compute field division: `self / rhs`, as `self * rhs^-1`.
    ///
    /// Returns the `CtOption` equivalent of `None` if `rhs` is zero.
    pub fn divide(&self, rhs: &Self) -> CtOption<Self> {
        rhs.invert().map(|inverse| self.multiply(&inverse))
    }

    /// Legendre symbol of `self` by Euler's criterion: `self^((p - 1) / 2)` is `1` for non-zero
    /// squares, `-1` for non-squares and `0` for zero.
    pub fn legendre(&self) -> LegendreSymbol {
        let euler = self.pow(P::PARAMS.pm1_half());
        let is_one = euler.ct_eq(&Self::ONE);
        let is_minus_one = euler.ct_eq(&-Self::ONE);
        LegendreSymbol::from_i8(is_one.unwrap_u8() as i8 - is_minus_one.unwrap_u8() as i8)
    }
}
