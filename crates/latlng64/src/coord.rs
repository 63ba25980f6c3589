use crate::band::{Band, MAX_VALUE, ORIGIN};
use crate::error::{Error, Result};
use core::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A geographic coordinate packed losslessly into a single `u64`.
///
/// Latitude (-90 to +90) and longitude (-180 to +180) are quantized on a
/// band-specific grid and mapped to a dense, gapless range of 64-bit
/// integers. Seven latitude bands trade longitude precision for latitude
/// coverage, so polar regions (where a degree of longitude spans little
/// ground) spend fewer bits per degree than the equatorial band:
///
/// ```text
///  Latitude     Band       Lat step (1/deg)  Lng step (1/deg)
///  +85 .. +90   Northern   10,000,000         1,000,000
///  +72 .. +85   Arctic     10,000,000         5,000,000
///  +60 .. +72   Aurora     20,000,000        10,000,000
///  -56 .. +60   Central    20,000,000        20,000,000
///  -60 .. -56   Interim    10,000,000        10,000,000
///  -85 .. -60   Antarctic  10,000,000         5,000,000
///  -90 .. -85   Southern   10,000,000         1,000,000
/// ```
///
/// Encoded values order south-to-north, then west-to-east: the natural `u64`
/// order is a row-major traversal of the globe. Value `0` encodes
/// (-90, -180) and every integer up to the addressable maximum is a valid
/// coordinate; nothing is reserved as an "unset" sentinel.
///
/// Longitude +180 folds to -180, so each physical meridian has exactly one
/// encoding.
///
/// # Example
/// ```
/// use latlng64::LatLng64;
///
/// let coord = LatLng64::new(37.7749, -122.4194)?;
/// assert_eq!(coord.coordinates(), (37.7749, -122.4194));
///
/// let same = LatLng64::from_raw(coord.to_raw())?;
/// assert_eq!(same, coord);
/// # Ok::<(), latlng64::Error>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatLng64 {
    data: u64,
}

impl LatLng64 {
    /// Largest valid raw encoding; represents (90, one longitude step below
    /// 180) at the polar grid.
    pub const MAX_RAW: u64 = MAX_VALUE;

    /// Encodes a coordinate.
    ///
    /// The inputs are quantized to the containing band's grid, rounding half
    /// away from zero. A latitude exactly on a shared band boundary always
    /// resolves to the pole-ward band. Longitude within half a step of +180
    /// folds to -180.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if `latitude` is NaN or outside [-90, 90], or
    /// `longitude` is NaN or outside [-180, 180].
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::Range {
                field: "latitude",
                min: -90.0,
                max: 90.0,
                value: latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::Range {
                field: "longitude",
                min: -180.0,
                max: 180.0,
                value: longitude,
            });
        }

        let band = Band::for_latitude(latitude);
        let longitude = if longitude >= band.max_longitude {
            -180.0
        } else {
            longitude
        };
        let lat_units = (latitude * band.lat_step as f64).round() as i64;
        let lng_units = (longitude * band.lng_step as f64).round() as i64;
        // Row-major within the band: latitude major, longitude minor. The
        // product is signed; the band shift relocates it into the band's
        // unsigned sub-range, wrapping over the i64/u64 cast.
        let raw = lat_units * band.lng_360 as i64 + lng_units;
        Ok(Self {
            data: band.shift_encode.wrapping_add(raw as u64),
        })
    }

    /// Validates a raw encoding without decoding it, for passing encoded
    /// values opaquely.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEncoding`] if `raw` is past [`Self::MAX_RAW`].
    pub const fn from_raw(raw: u64) -> Result<Self> {
        if raw > MAX_VALUE {
            return Err(Error::InvalidEncoding { value: raw });
        }
        Ok(Self { data: raw })
    }

    /// Returns the raw encoding; this is the wire representation.
    pub const fn to_raw(&self) -> u64 {
        self.data
    }

    /// Decodes to (latitude, longitude), the exact quantized values the
    /// encoding was produced from.
    ///
    /// The round trip is perfect: re-encoding the result yields the same
    /// integer, and a decoded zero component is always positive zero.
    pub fn coordinates(&self) -> (f64, f64) {
        let band = Band::locate(self.data);
        let data = self.data - band.shift_decode;
        let lat_units = (data / band.lng_360) as i64 + band.lat_bias;
        let lng_units = (data % band.lng_360) as i64 - band.lng_180 as i64;
        (
            lat_units as f64 / band.lat_step as f64,
            lng_units as f64 / band.lng_step as f64,
        )
    }

    /// The decoded latitude.
    pub fn latitude(&self) -> f64 {
        self.coordinates().0
    }

    /// The decoded longitude.
    pub fn longitude(&self) -> f64 {
        self.coordinates().1
    }
}

/// The coordinate (0, 0).
impl Default for LatLng64 {
    fn default() -> Self {
        Self { data: ORIGIN }
    }
}

/// Validated conversion from the wire representation; see
/// [`LatLng64::from_raw`].
impl TryFrom<u64> for LatLng64 {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        Self::from_raw(raw)
    }
}

impl From<LatLng64> for u64 {
    fn from(coord: LatLng64) -> Self {
        coord.to_raw()
    }
}

impl fmt::Display for LatLng64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (latitude, longitude) = self.coordinates();
        write!(f, "{latitude}, {longitude}")
    }
}

impl fmt::Debug for LatLng64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (latitude, longitude) = self.coordinates();
        f.debug_struct("LatLng64")
            .field("data", &self.data)
            .field("latitude", &latitude)
            .field("longitude", &longitude)
            .finish()
    }
}

/// Encodes a coordinate to its raw `u64` form.
///
/// Convenience for [`LatLng64::new`] followed by [`LatLng64::to_raw`].
///
/// # Errors
/// Returns [`Error::Range`] on out-of-range or NaN input.
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn encode(latitude: f64, longitude: f64) -> Result<u64> {
    LatLng64::new(latitude, longitude).map(|coord| coord.to_raw())
}

/// Decodes a raw `u64` back to (latitude, longitude).
///
/// Convenience for [`LatLng64::from_raw`] followed by
/// [`LatLng64::coordinates`].
///
/// # Errors
/// Returns [`Error::InvalidEncoding`] if `value` is past
/// [`LatLng64::MAX_RAW`].
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn decode(value: u64) -> Result<(f64, f64)> {
    LatLng64::from_raw(value).map(|coord| coord.coordinates())
}
