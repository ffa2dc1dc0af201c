//! A small, allocation-free DEFLATE (RFC 1951) and gzip (RFC 1952)
//! decompressor.
//!
//! The allocation-free core lives in [`raw`]; [`DeflateDecoder`] is a small
//! allocating wrapper around it for callers who don't want to manage their
//! own output buffer.
//!
//! ```
//! use tiny_inflate::DeflateDecoder;
//!
//! # fn main() -> Result<(), tiny_inflate::errors::InflateDecodeErrors> {
//! let compressed = [0x73, 0x04, 0x00];
//! let decoder = DeflateDecoder::new(&compressed);
//! let out = decoder.decode_deflate()?;
//! assert_eq!(out, b"A");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use crate::decoder::{DeflateDecoder, DeflateOptions};

mod bitstream;
mod constants;
#[cfg(feature = "gzip")]
mod crc32;
mod decoder;
pub mod errors;
#[cfg(feature = "gzip")]
mod gzip;
mod huffman;
pub mod raw;
