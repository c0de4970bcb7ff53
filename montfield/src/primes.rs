//! Predefined prime fields: two moduli for each of 1, 2, 3, 4 and 8 words.
//!
//! The `_0` and `_1` fields of each width are chosen to exercise different code paths: at each
//! width one modulus leaves the top bit of its high word clear and the other fills it, and
//! between them they cover `p ≡ 3 (mod 4)`, `p ≡ 5 (mod 8)` and `p ≡ 1 (mod 8)`.

use crate::{ByteOrder, field_params};

field_params!(
    name: P64_0,
    modulus: [0x1fff_ffff_ffff_ffff],
    byte_order: ByteOrder::BigEndian,
    element: Fp64_0,
    doc: "Mersenne prime `p = 2^61 - 1`."
);

field_params!(
    name: P64_1,
    modulus: [0xffff_ffff_ffff_ffc5],
    byte_order: ByteOrder::BigEndian,
    element: Fp64_1,
    doc: "Largest 64-bit prime, `p = 2^64 - 59`."
);

field_params!(
    name: P128_0,
    modulus: [0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff],
    byte_order: ByteOrder::BigEndian,
    element: Fp128_0,
    doc: "Mersenne prime `p = 2^127 - 1`."
);

field_params!(
    name: P128_1,
    modulus: [0xffff_ffff_ffff_ff53, 0xffff_ffff_ffff_ffff],
    byte_order: ByteOrder::BigEndian,
    element: Fp128_1,
    doc: "Largest 128-bit prime, `p = 2^128 - 173`."
);

field_params!(
    name: P192_0,
    modulus: [0xffff_ffff_ffff_ff13, 0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff],
    byte_order: ByteOrder::BigEndian,
    element: Fp192_0,
    doc: "Largest 192-bit prime, `p = 2^192 - 237`."
);

field_params!(
    name: P192_1,
    modulus: [0xffff_ffff_ffff_ffed, 0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff],
    byte_order: ByteOrder::BigEndian,
    element: Fp192_1,
    doc: "`p = 2^191 - 19`."
);

field_params!(
    name: P256_0,
    modulus: [
        0xffff_ffff_ffff_ffed,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0x7fff_ffff_ffff_ffff
    ],
    byte_order: ByteOrder::LittleEndian,
    element: Fp256_0,
    doc: "Curve25519 base field, `p = 2^255 - 19`, encoded little endian."
);

field_params!(
    name: P256_1,
    modulus: [
        0xffff_ffff_ffff_ffff,
        0x0000_0000_ffff_ffff,
        0x0000_0000_0000_0000,
        0xffff_ffff_0000_0001
    ],
    byte_order: ByteOrder::BigEndian,
    element: Fp256_1,
    doc: "NIST P-256 base field, `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`."
);

field_params!(
    name: P512_0,
    modulus: [
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_fffe,
        0x0000_0000_0000_0000,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff
    ],
    byte_order: ByteOrder::BigEndian,
    element: Fp512_0,
    doc: "`p = 2^512 - 2^256 + 2^192 - 2^128 - 1`."
);

field_params!(
    name: P512_1,
    modulus: [
        0x0000_0000_0000_0001,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0x7fff_ffff_ffff_ffff
    ],
    byte_order: ByteOrder::BigEndian,
    element: Fp512_1,
    doc: "`p = 2^511 - 2^320 + 1`."
);
