//! Macros for defining field element types.

/// Creates a ZST representing a prime field, with every Montgomery parameter derived from the
/// modulus at compile time, and a [`FieldElement`][`crate::FieldElement`] alias for it.
///
/// Accepts the following parameters:
///
/// - name of the ZST representing the field modulus
/// - modulus as a list of 64-bit words, least significant first
/// - byte order to use when encoding/decoding field elements
/// - name of the field element type alias
/// - documentation string for the field modulus type
///
/// A malformed modulus (even, smaller than 3, or with a zero most significant word) is a compile
/// error.
///
/// ```
/// use montfield::ByteOrder;
///
/// montfield::field_params!(
///     name: P256Params,
///     modulus: [
///         0xffff_ffff_ffff_ffff,
///         0x0000_0000_ffff_ffff,
///         0x0000_0000_0000_0000,
///         0xffff_ffff_0000_0001
///     ],
///     byte_order: ByteOrder::BigEndian,
///     element: P256FieldElement,
///     doc: "P-256 field modulus"
/// );
///
/// assert_eq!(P256FieldElement::NUM_BITS, 256);
/// assert_eq!(P256Params::LIMBS, 4);
/// ```
#[macro_export]
macro_rules! field_params {
    (
        name: $name:ident,
        modulus: [$($word:expr),+ $(,)?],
        byte_order: $byte_order:expr,
        element: $fe:ident,
        doc: $doc:expr
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $name;

        impl $name {
            /// Number of 64-bit words in the modulus.
            pub const LIMBS: usize = <[$crate::Word]>::len(&[$($word),+]);
        }

        impl $crate::FieldParams<{ <[$crate::Word]>::len(&[$($word),+]) }> for $name {
            const PARAMS: $crate::PrimeParams<{ <[$crate::Word]>::len(&[$($word),+]) }> =
                $crate::PrimeParams::from_words([$($word),+]);
            const BYTE_ORDER: $crate::ByteOrder = $byte_order;
        }

        #[doc = $doc]
        pub type $fe =
            $crate::FieldElement<$name, { <[$crate::Word]>::len(&[$($word),+]) }>;
    };
}
