//! Modular square root by Cipolla's algorithm, which works for every odd prime.
//!
//! Given `a`, find `d` such that `t = d^2 - a` is a non-residue. In `Fp[x] / (x^2 - t)` we have
//! `(d + x)^p = d - x`, so `(d + x)^(p + 1) = d^2 - t = a` and `(d + x)^((p + 1) / 2)` is a square
//! root of `a` lying in `Fp`.

use super::ladder::ladder;
use crate::{FieldElement, FieldParams, LegendreSymbol};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Element `re + im·x` of the quadratic extension `Fp[x] / (x^2 - t)`.
///
/// `t` is not stored; it is supplied to [`QuadraticExtension::mul`].
#[derive(Clone, Copy)]
struct QuadraticExtension<P, const LIMBS: usize>
where
    P: FieldParams<LIMBS>,
{
    re: FieldElement<P, LIMBS>,
    im: FieldElement<P, LIMBS>,
}

impl<P, const LIMBS: usize> QuadraticExtension<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    /// `(a + bx)(c + dx) = (ac + bd·t) + ((a + b)(c + d) - ac - bd)x`
    fn mul(&self, rhs: &Self, t: &FieldElement<P, LIMBS>) -> Self {
        let re_re = self.re * rhs.re;
        let im_im = self.im * rhs.im;
        let cross = (self.re + self.im) * (rhs.re + rhs.im) - re_re - im_im;

        Self {
            re: re_re + im_im * t,
            im: cross,
        }
    }
}

impl<P, const LIMBS: usize> ConditionallySelectable for QuadraticExtension<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            re: FieldElement::conditional_select(&a.re, &b.re, choice),
            im: FieldElement::conditional_select(&a.im, &b.im, choice),
        }
    }
}

impl<P, const LIMBS: usize> FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    /// Returns the square root of self mod p, or `None` if no square root exists.
    ///
    /// Which of the two roots is returned is unspecified.
    pub fn sqrt(&self) -> CtOption<Self> {
        let root = self.sqrt_cipolla();
        CtOption::new(root, root.square().ct_eq(self))
    }

    /// Cipolla's algorithm; the result is only meaningful if `self` is a square.
    ///
    /// The search for `d` tries `1, 2, 3, ...` and so leaks how many candidates were rejected,
    /// which depends on `self`. The exponentiation itself runs in constant time.
    fn sqrt_cipolla(&self) -> Self {
        // Zero has no suitable d: substitute one and fix up the result afterwards
        let is_zero = self.is_zero();
        let a = Self::conditional_select(self, &Self::ONE, is_zero);

        let mut d = Self::ONE;
        let t = loop {
            let t = d.square() - a;

            if t.legendre() == LegendreSymbol::MinusOne {
                break t;
            }

            d += Self::ONE;
        };

        let base = QuadraticExtension { re: d, im: Self::ONE };
        let one = QuadraticExtension {
            re: Self::ONE,
            im: Self::ZERO,
        };
        let root = ladder(&base, one, P::PARAMS.pp1_half(), |x, y| x.mul(y, &t));

        Self::conditional_select(&root.re, &Self::ZERO, is_zero)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ByteOrder, LegendreSymbol, field_params};
    use ff::Field;

    field_params!(
        name: Tiny,
        modulus: [17],
        byte_order: ByteOrder::BigEndian,
        element: Fe17,
        doc: "p = 17, so p ≡ 1 (mod 16)"
    );

    field_params!(
        name: Mersenne61,
        modulus: [0x1fff_ffff_ffff_ffff],
        byte_order: ByteOrder::BigEndian,
        element: Fe61,
        doc: "p = 2^61 - 1"
    );

    // p ≡ 1 (mod 2^320)
    field_params!(
        name: HighTwoAdicity,
        modulus: [
            1,
            0,
            0,
            0,
            0,
            0xffff_ffff_ffff_ffff,
            0xffff_ffff_ffff_ffff,
            0x7fff_ffff_ffff_ffff
        ],
        byte_order: ByteOrder::BigEndian,
        element: Fe511,
        doc: "p = 2^511 - 2^320 + 1"
    );

    #[test]
    fn sqrt_of_zero() {
        assert_eq!(Fe61::ZERO.sqrt().unwrap(), Fe61::ZERO);
        assert_eq!(Fe17::ZERO.sqrt().unwrap(), Fe17::ZERO);
    }

    #[test]
    fn sqrt_of_four() {
        let four = Fe61::from_u64(4);
        assert_eq!(four.legendre(), LegendreSymbol::One);
        let root = four.sqrt().unwrap();
        assert_eq!(root.square(), four);
        assert!(root == Fe61::from_u64(2) || root == -Fe61::from_u64(2));
    }

    #[test]
    fn every_square_of_small_field() {
        for n in 0..17 {
            let x = Fe17::from_u64(n);
            let square = x.square();
            let root = square.sqrt().unwrap();
            assert!(root == x || root == -x, "n = {n}");
        }
    }

    #[test]
    fn non_residue_has_no_root() {
        // 3 is a non-residue modulo 17; -1 is a non-residue modulo 2^61 - 1
        assert!(bool::from(Fe17::from_u64(3).sqrt().is_none()));
        assert!(bool::from((-Fe61::ONE).sqrt().is_none()));
    }

    #[test]
    fn high_two_adicity() {
        for n in [2u64, 3, 5, 1234567, u64::MAX] {
            let x = Fe511::from_u64(n);
            let square = x.square();
            let root = square.sqrt().unwrap();
            assert_eq!(root.square(), square);
        }
    }

    #[test]
    fn field_trait_sqrt() {
        let nine = Fe61::from_u64(9);
        let root = <Fe61 as Field>::sqrt(&nine).unwrap();
        assert_eq!(root.square(), nine);
    }
}
