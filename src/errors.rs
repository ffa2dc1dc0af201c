use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

/// A struct returned when decompression fails.
///
/// Carries both the reason decoding stopped and whatever output had already
/// been produced before the failure, since a partially decoded buffer is
/// sometimes useful to a caller even on error.
pub struct InflateDecodeErrors
{
    /// reason why decompression fails
    pub error: DecodeErrorStatus,
    /// Decoded data up until that decompression error
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    /// Create a new decode wrapper with data being
    /// how many bytes we actually decoded before hitting an error
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }
    /// Create a new decode wrapper with an empty vector
    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, Vec::new())
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InflateDecodeErrors {}

#[cfg(feature = "std")]
impl std::fmt::Display for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        write!(f, "{:?}", self.error)
    }
}

/// The reason a decode operation failed.
///
/// This is deliberately richer than the spec's flat status taxonomy; it
/// collapses down to `DATA_ERROR` / `BUF_ERROR` / `CRC_ERROR` at the
/// [`crate::raw`] boundary, see [`DecodeErrorStatus::status`].
pub enum DecodeErrorStatus
{
    /// Input data is not enough to construct
    /// a full output
    InsufficientData,
    /// Anything that isn't significant
    Generic(&'static str),
    GenericStr(String),
    ///Input data was malformed.
    CorruptData,
    /// Output buffer doesn't have room for the decoded data.
    OutputBufferTooSmall { needed: usize, available: usize },
    /// Limit set by the user was exceeded by
    /// decompressed output
    OutputLimitExceeded(usize, usize),
    /// gzip trailer CRC-32 does not match the CRC-32 of the decoded bytes.
    MismatchedCRC(u32, u32),
    /// gzip header CRC-16 (low 16 bits of a CRC-32) does not match.
    MismatchedHeaderCRC(u16, u16),
    /// Decoded length does not match the gzip trailer's ISIZE field.
    MismatchedSize(u32, u32)
}

impl DecodeErrorStatus
{
    /// Collapse this error down to the spec's flat status taxonomy.
    pub const fn status(&self) -> crate::raw::Status
    {
        match self
        {
            Self::MismatchedCRC(..) | Self::MismatchedHeaderCRC(..) => crate::raw::Status::CrcError,
            Self::OutputBufferTooSmall { .. } | Self::OutputLimitExceeded(..) =>
            {
                crate::raw::Status::BufError
            }
            _ => crate::raw::Status::DataError
        }
    }
}

impl Debug for DecodeErrorStatus
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::Generic(reason) => writeln!(f, "{reason}"),
            Self::GenericStr(reason) => writeln!(f, "{reason}"),
            Self::CorruptData => writeln!(f, "Corrupt data"),
            Self::OutputBufferTooSmall { needed, available } => writeln!(
                f,
                "Output buffer too small, needed at least {needed} more bytes but only {available} were available"
            ),
            Self::OutputLimitExceeded(limit, current) => writeln!(
                f,
                "Output limit exceeded, set limit was {limit} and output size is {current}"
            ),
            Self::MismatchedCRC(expected, found) =>
            {
                writeln!(f, "Mismatched CRC, expected {expected} but found {found}")
            }
            Self::MismatchedHeaderCRC(expected, found) =>
            {
                writeln!(f, "Mismatched header CRC, expected {expected} but found {found}")
            }
            Self::MismatchedSize(expected, found) =>
            {
                writeln!(
                    f,
                    "Decoded size {found} does not match gzip ISIZE trailer {expected}"
                )
            }
        }
    }
}
