#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod dev;
mod error;
mod macros;
mod monty;

pub mod arithmetic;
pub mod ct;
pub mod limbs;
pub mod params;
pub mod primes;

pub use crate::{
    error::{Error, Result},
    limbs::{WideWord, Word},
    monty::{FieldElement, LegendreSymbol},
    params::{FieldParams, MAX_LIMBS, MulVariant, PrimeParams},
};
pub use ff;
pub use rand_core;
pub use subtle;
pub use zeroize;

/// Byte order used when encoding/decoding field elements as bytestrings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteOrder {
    /// Big endian.
    BigEndian,

    /// Little endian.
    LittleEndian,
}
