//! Field elements which use an internal Montgomery form representation.

mod ladder;
mod sqrt;

pub use self::ladder::LegendreSymbol;

use crate::{ByteOrder, Error, FieldParams, Result, Word, arithmetic, ct, limbs};
use core::{
    fmt,
    iter::{Product, Sum},
    marker::PhantomData,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use ff::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Field element type which uses an internal Montgomery form representation.
///
/// The stored words are always `a·R mod p`, fully reduced.
pub struct FieldElement<P, const LIMBS: usize>
where
    P: FieldParams<LIMBS>,
{
    montgomery: [Word; LIMBS],
    params: PhantomData<P>,
}

impl<P, const LIMBS: usize> FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    /// Zero element (additive identity).
    pub const ZERO: Self = Self::from_montgomery_words([0; LIMBS]);

    /// Multiplicative identity.
    pub const ONE: Self = Self::from_montgomery_words(*P::PARAMS.one());

    /// Number of limbs used by the internal representation.
    pub const LIMBS: usize = LIMBS;

    /// Bit length of the modulus.
    pub const NUM_BITS: u32 = P::PARAMS.bits();

    /// Length of the byte encoding of an element.
    pub const BYTE_LEN: usize = P::PARAMS.byte_len();

    /// Convert a `u64` into a [`FieldElement`], reducing it modulo `p` if needed.
    #[inline]
    pub const fn from_u64(w: u64) -> Self {
        let mut words = [0; LIMBS];
        words[0] = w;
        Self::from_words_reduced(&words)
    }

    /// Convert canonical little-endian words into a [`FieldElement`], first converting them into
    /// Montgomery form:
    ///
    /// ```text
    /// w * R^2 * R^-1 mod p = wR mod p
    /// ```
    ///
    /// # Returns
    ///
    /// The `CtOption` equivalent of `None` if the input overflows the modulus.
    #[inline]
    pub fn from_words(words: &[Word; LIMBS]) -> CtOption<Self> {
        let mut diff = [0; LIMBS];
        let is_lt = limbs::sub(&mut diff, words, P::PARAMS.modulus());
        let fe = Self::from_montgomery_words(arithmetic::to_montgomery(words, &P::PARAMS));
        CtOption::new(fe, ct::choice(is_lt))
    }

    /// Convert arbitrary little-endian words into a [`FieldElement`], reducing them modulo `p`.
    #[inline]
    pub const fn from_words_reduced(words: &[Word; LIMBS]) -> Self {
        Self::from_montgomery_words(arithmetic::to_montgomery_wide(words, &P::PARAMS))
    }

    /// Create a [`FieldElement`] from words which are already in Montgomery form.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is expected to be in Montgomery form and reduced. Failure to maintain these
    /// invariants will lead to miscomputation and potential security issues!
    #[inline]
    pub const fn from_montgomery_words(words: [Word; LIMBS]) -> Self {
        Self {
            montgomery: words,
            params: PhantomData,
        }
    }

    /// Borrow the internal words, which are in Montgomery form.
    ///
    /// # ⚠️ Warning
    ///
    /// Make sure you are actually expecting a value in Montgomery form! This is not the correct
    /// function for converting *out* of Montgomery form: that would be
    /// [`FieldElement::to_canonical`].
    pub const fn as_montgomery(&self) -> &[Word; LIMBS] {
        &self.montgomery
    }

    /// Retrieve the Montgomery form representation as an array of [`Word`]s.
    pub const fn to_montgomery_words(&self) -> [Word; LIMBS] {
        self.montgomery
    }

    /// Translate field element out of the Montgomery domain, returning canonical little-endian
    /// words.
    #[inline]
    pub const fn to_canonical(&self) -> [Word; LIMBS] {
        arithmetic::from_montgomery(&self.montgomery, &P::PARAMS)
    }

    /// Decode a field element from its canonical byte encoding.
    ///
    /// The slice must be exactly [`FieldElement::BYTE_LEN`] bytes in the byte order registered for
    /// the field, and encode an integer less than `p`.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::BYTE_LEN {
            return None;
        }

        let mut words = [0; LIMBS];

        for (i, &byte) in bytes.iter().enumerate() {
            let k = match P::BYTE_ORDER {
                ByteOrder::BigEndian => bytes.len() - 1 - i,
                ByteOrder::LittleEndian => i,
            };
            words[k / 8] |= Word::from(byte) << (8 * (k % 8));
        }

        Self::from_words(&words).into()
    }

    /// Write the canonical byte encoding of this element into `out`.
    ///
    /// # Errors
    ///
    /// [`Error::Length`] if `out` is not exactly [`FieldElement::BYTE_LEN`] bytes.
    pub fn write_bytes(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != Self::BYTE_LEN {
            return Err(Error::Length);
        }

        let words = self.to_canonical();
        let len = out.len();

        for (i, byte) in out.iter_mut().enumerate() {
            let k = match P::BYTE_ORDER {
                ByteOrder::BigEndian => len - 1 - i,
                ByteOrder::LittleEndian => i,
            };
            *byte = (words[k / 8] >> (8 * (k % 8))) as u8;
        }

        Ok(())
    }

    /// Determine if this field element is odd: `self mod 2 == 1`.
    ///
    /// # Returns
    ///
    /// If odd, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        ct::choice(self.to_canonical()[0] & 1)
    }

    /// Determine if this field element is even: `self mod 2 == 0`.
    #[inline]
    pub fn is_even(&self) -> Choice {
        !self.is_odd()
    }

    /// Determine if this field element is zero.
    ///
    /// # Returns
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    #[inline]
    pub fn is_zero(&self) -> Choice {
        ct::choice(ct::is_zero_words(&self.montgomery))
    }

    /// Add elements.
    #[inline]
    pub const fn add(&self, rhs: &Self) -> Self {
        Self::from_montgomery_words(arithmetic::add(
            &self.montgomery,
            &rhs.montgomery,
            &P::PARAMS,
        ))
    }

    /// Double element (add it to itself).
    #[inline]
    #[must_use]
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Subtract elements.
    #[inline]
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self::from_montgomery_words(arithmetic::sub(
            &self.montgomery,
            &rhs.montgomery,
            &P::PARAMS,
        ))
    }

    /// Multiply elements.
    #[inline]
    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self::from_montgomery_words(arithmetic::mul(
            &self.montgomery,
            &rhs.montgomery,
            &P::PARAMS,
        ))
    }

    /// Negate element.
    #[inline]
    pub const fn neg(&self) -> Self {
        Self::from_montgomery_words(arithmetic::neg(&self.montgomery, &P::PARAMS))
    }

    /// Compute modular square.
    #[inline]
    #[must_use]
    pub const fn square(&self) -> Self {
        Self::from_montgomery_words(arithmetic::square(&self.montgomery, &P::PARAMS))
    }

    /// Returns `self^(2^n) mod p`.
    ///
    /// **This operation is variable time with respect to the exponent `n`.**
    pub const fn sqn_vartime(&self, n: usize) -> Self {
        let mut x = *self;
        let mut i = 0;

        while i < n {
            x = x.square();
            i += 1;
        }

        x
    }

    /// Sample a uniformly random element by rejection: draw `LIMBS` words, clear the bits above
    /// the modulus' bit length and retry until the value is less than `p`.
    ///
    /// Each attempt succeeds with probability greater than one half.
    pub fn try_from_rng<R: rand_core::TryRngCore + ?Sized>(
        rng: &mut R,
    ) -> core::result::Result<Self, R::Error> {
        let excess = LIMBS as u32 * limbs::WORD_BITS - Self::NUM_BITS;
        let top_mask = Word::MAX >> excess;

        loop {
            let mut words = [0; LIMBS];

            for word in words.iter_mut() {
                *word = rng.try_next_u64()?;
            }

            words[LIMBS - 1] &= top_mask;

            if let Some(fe) = Self::from_words(&words).into() {
                return Ok(fe);
            }
        }
    }
}

//
// `ff` crate trait impls
//

impl<P, const LIMBS: usize> Field for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn try_from_rng<R: rand_core::TryRngCore + ?Sized>(
        rng: &mut R,
    ) -> core::result::Result<Self, R::Error> {
        Self::try_from_rng(rng)
    }

    fn is_zero(&self) -> Choice {
        self.is_zero()
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt()
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

//
// Arithmetic trait impls
//

/// Emit a `core::ops` trait wrapper for an inherent method.
macro_rules! field_element_op {
    ($op:tt, $func:ident, $inner_func:ident) => {
        impl<P, const LIMBS: usize> $op for FieldElement<P, LIMBS>
        where
            P: FieldParams<LIMBS>,
        {
            type Output = FieldElement<P, LIMBS>;

            #[inline]
            fn $func(self, rhs: FieldElement<P, LIMBS>) -> FieldElement<P, LIMBS> {
                <FieldElement<P, LIMBS>>::$inner_func(&self, &rhs)
            }
        }

        impl<P, const LIMBS: usize> $op<&Self> for FieldElement<P, LIMBS>
        where
            P: FieldParams<LIMBS>,
        {
            type Output = FieldElement<P, LIMBS>;

            #[inline]
            fn $func(self, rhs: &FieldElement<P, LIMBS>) -> FieldElement<P, LIMBS> {
                <FieldElement<P, LIMBS>>::$inner_func(&self, rhs)
            }
        }

        impl<P, const LIMBS: usize> $op<Self> for &FieldElement<P, LIMBS>
        where
            P: FieldParams<LIMBS>,
        {
            type Output = FieldElement<P, LIMBS>;

            #[inline]
            fn $func(self, rhs: &FieldElement<P, LIMBS>) -> FieldElement<P, LIMBS> {
                <FieldElement<P, LIMBS>>::$inner_func(self, rhs)
            }
        }
    };
}

field_element_op!(Add, add, add);
field_element_op!(Sub, sub, sub);
field_element_op!(Mul, mul, multiply);

/// Emit `*Assign` impls (by value and by reference) in terms of the binary operator.
macro_rules! field_element_assign_op {
    ($op:tt, $func:ident, $bin_op:tt) => {
        impl<P, const LIMBS: usize> $op for FieldElement<P, LIMBS>
        where
            P: FieldParams<LIMBS>,
        {
            #[inline]
            fn $func(&mut self, other: FieldElement<P, LIMBS>) {
                *self = *self $bin_op other;
            }
        }

        impl<P, const LIMBS: usize> $op<&Self> for FieldElement<P, LIMBS>
        where
            P: FieldParams<LIMBS>,
        {
            #[inline]
            fn $func(&mut self, other: &FieldElement<P, LIMBS>) {
                *self = *self $bin_op other;
            }
        }
    };
}

field_element_assign_op!(AddAssign, add_assign, +);
field_element_assign_op!(SubAssign, sub_assign, -);
field_element_assign_op!(MulAssign, mul_assign, *);

impl<P, const LIMBS: usize> Neg for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    type Output = FieldElement<P, LIMBS>;

    #[inline]
    fn neg(self) -> FieldElement<P, LIMBS> {
        <FieldElement<P, LIMBS>>::neg(&self)
    }
}

impl<P, const LIMBS: usize> Neg for &FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    type Output = FieldElement<P, LIMBS>;

    #[inline]
    fn neg(self) -> FieldElement<P, LIMBS> {
        <FieldElement<P, LIMBS>>::neg(self)
    }
}

impl<P, const LIMBS: usize> Sum for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or(Self::ZERO)
    }
}

impl<'a, P, const LIMBS: usize> Sum<&'a Self> for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn sum<I: Iterator<Item = &'a FieldElement<P, LIMBS>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<P, const LIMBS: usize> Product for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Mul::mul).unwrap_or(Self::ONE)
    }
}

impl<'a, P: FieldParams<LIMBS>, const LIMBS: usize> Product<&'a FieldElement<P, LIMBS>>
    for FieldElement<P, LIMBS>
{
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}

//
// `subtle` trait impls
//

impl<P, const LIMBS: usize> ConditionallySelectable for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mask = ct::mask(Word::from(choice.unwrap_u8()));
        Self::from_montgomery_words(ct::select(&a.montgomery, &b.montgomery, mask))
    }

    fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        let mask = ct::mask(Word::from(choice.unwrap_u8()));
        ct::swap(&mut a.montgomery, &mut b.montgomery, mask);
    }
}

impl<P, const LIMBS: usize> ConstantTimeEq for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        ct::choice(ct::eq(&self.montgomery, &other.montgomery))
    }
}

//
// `core::fmt` trait impls
//

impl<P, const LIMBS: usize> fmt::Debug for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{self:X})")
    }
}

impl<P, const LIMBS: usize> fmt::Display for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl<P, const LIMBS: usize> fmt::LowerHex for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.to_canonical().iter().rev() {
            write!(f, "{word:016x}")?;
        }

        Ok(())
    }
}

impl<P, const LIMBS: usize> fmt::UpperHex for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.to_canonical().iter().rev() {
            write!(f, "{word:016X}")?;
        }

        Ok(())
    }
}

//
// Miscellaneous trait impls
//

impl<P, const LIMBS: usize> Clone for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, const LIMBS: usize> Copy for FieldElement<P, LIMBS> where P: FieldParams<LIMBS> {}

impl<P, const LIMBS: usize> Default for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    fn default() -> Self {
        Self::ZERO
    }
}

impl<P: FieldParams<LIMBS>, const LIMBS: usize> Eq for FieldElement<P, LIMBS> {}
impl<P: FieldParams<LIMBS>, const LIMBS: usize> PartialEq for FieldElement<P, LIMBS> {
    fn eq(&self, rhs: &Self) -> bool {
        self.ct_eq(rhs).into()
    }
}

impl<P: FieldParams<LIMBS>, const LIMBS: usize> zeroize::DefaultIsZeroes
    for FieldElement<P, LIMBS>
{
}

impl<P, const LIMBS: usize> From<u64> for FieldElement<P, LIMBS>
where
    P: FieldParams<LIMBS>,
{
    #[inline]
    fn from(n: u64) -> FieldElement<P, LIMBS> {
        Self::from_u64(n)
    }
}
