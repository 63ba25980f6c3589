/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `latlng64` can produce.
///
/// Construction either fully succeeds or fails with one of these; the codec
/// never clamps or returns partial results. (The documented fold of longitude
/// +180 to -180 is part of the encoding, not an error.)
#[derive(Clone, Copy, PartialEq, thiserror::Error, Debug)]
pub enum Error {
    /// An encode input was NaN or outside its valid interval.
    #[error(
        "{field} requires a number between {min} and {max} inclusive, but the actual value is: {value}"
    )]
    Range {
        /// Which argument was rejected: `"latitude"` or `"longitude"`.
        field: &'static str,
        /// Lower bound of the valid interval.
        min: f64,
        /// Upper bound of the valid interval.
        max: f64,
        /// The rejected input.
        value: f64,
    },

    /// A raw integer was past the addressable coordinate range.
    #[error("invalid encoding: {value} is past the largest addressable coordinate")]
    InvalidEncoding {
        /// The rejected raw value.
        value: u64,
    },
}
