//! Latitude band geometry.
//!
//! The addressable `u64` range is partitioned into seven contiguous
//! sub-ranges, one per latitude band. Every constant below is derived at
//! compile time from the band boundaries and step sizes by [`derive`]; no
//! shift or bias is hand-written, so a transcription error cannot silently
//! break the round-trip invariants.

/// Finest step: 20,000,000 units per degree (about 5.6mm at the equator).
pub(crate) const EXACT: u64 = 20_000_000;
/// 10,000,000 units per degree.
pub(crate) const GOOD: u64 = 10_000_000;
/// 5,000,000 units per degree.
pub(crate) const SANE: u64 = 5_000_000;
/// Coarsest step: 1,000,000 units per degree.
pub(crate) const ROUGH: u64 = 1_000_000;

/// Half of one quantization step, in degrees.
const EXACT_HALF: f64 = 0.5 / EXACT as f64;
const GOOD_HALF: f64 = 0.5 / GOOD as f64;

/// Compensates the representation error of a band boundary expression, so a
/// latitude sitting exactly on the half-step below a boundary resolves to the
/// band whose grid owns the boundary row.
const BIT_EPS: f64 = 1e-14;

/// One latitude band: a contiguous latitude interval, its quantization steps,
/// and the constants that place its rows inside the band's `u64` sub-range.
pub(crate) struct Band {
    /// Encode boundary: the band's bottom latitude nudged inward by the
    /// half-step of the finer adjacent band (see [`BIT_EPS`]).
    floor: f64,
    /// Whether a latitude exactly at `floor` belongs to this band.
    floor_inclusive: bool,
    /// Smallest encoded value in this band.
    pub(crate) min: u64,
    /// Largest encoded value in this band.
    pub(crate) max: u64,
    /// Latitude units per degree.
    pub(crate) lat_step: u64,
    /// Longitude units per degree.
    pub(crate) lng_step: u64,
    /// Longitude units per full circle; the row stride.
    pub(crate) lng_360: u64,
    /// Longitude units per half circle; offsets signed longitudes into a row.
    pub(crate) lng_180: u64,
    /// Added (wrapping) to the signed row-major product at encode time.
    pub(crate) shift_encode: u64,
    /// Subtracted before the div/rem split at decode time.
    pub(crate) shift_decode: u64,
    /// Signed latitude units of the band's bottom boundary; added to the
    /// decode quotient to recover the signed latitude.
    pub(crate) lat_bias: i64,
    /// Longitudes at or above this fold to -180 before quantization.
    pub(crate) max_longitude: f64,
}

/// Derives one band's constants from its boundaries and step sizes.
///
/// A row shared by two bands belongs to the band farther from the equator,
/// which is the pole-ward, coarser-longitude side. The two outermost bands
/// additionally own their polar rows (hence one extra row each), and the
/// equator-straddling band owns neither of its boundary rows (one fewer).
const fn derive(
    floor: f64,
    bottom: i64,
    top: i64,
    lat_step: u64,
    lng_step: u64,
    min: u64,
) -> Band {
    let owns_bottom = bottom == -90 || bottom >= 0;
    let owns_top = top == 90 || top < 0;
    let rows = (top - bottom) as u64 * lat_step - 1
        + owns_bottom as u64
        + owns_top as u64;
    let lng_360 = 360 * lng_step;
    let lng_180 = 180 * lng_step;
    let first_row = bottom * lat_step as i64 + if owns_bottom { 0 } else { 1 };
    Band {
        floor,
        floor_inclusive: bottom >= 0,
        min,
        max: min + rows * lng_360 - 1,
        lat_step,
        lng_step,
        lng_360,
        lng_180,
        shift_encode: (min as i128 - first_row as i128 * lng_360 as i128 + lng_180 as i128)
            as u64,
        shift_decode: if owns_bottom { min } else { min - lng_360 },
        lat_bias: bottom * lat_step as i64,
        max_longitude: 180.0 - 0.5 / lng_step as f64,
    }
}

/// The seven bands, south to north, occupying a gapless `u64` range starting
/// at zero.
const BAND_TABLE: [Band; 7] = {
    let southern = derive(f64::NEG_INFINITY, -90, -85, GOOD, ROUGH, 0);
    let antarctic = derive(-85.0 + GOOD_HALF, -85, -60, GOOD, SANE, southern.max + 1);
    let interim = derive(-60.0 + GOOD_HALF + BIT_EPS, -60, -56, GOOD, GOOD, antarctic.max + 1);
    let central = derive(-56.0 + EXACT_HALF + BIT_EPS, -56, 60, EXACT, EXACT, interim.max + 1);
    let aurora = derive(60.0 - EXACT_HALF - BIT_EPS, 60, 72, EXACT, GOOD, central.max + 1);
    let arctic = derive(72.0 - EXACT_HALF - BIT_EPS, 72, 85, GOOD, SANE, aurora.max + 1);
    let northern = derive(85.0 - GOOD_HALF, 85, 90, GOOD, ROUGH, arctic.max + 1);
    [southern, antarctic, interim, central, aurora, arctic, northern]
};

pub(crate) static BANDS: [Band; 7] = BAND_TABLE;

/// Largest valid encoded value; encodes (90, one step below 180).
pub(crate) const MAX_VALUE: u64 = BAND_TABLE[6].max;

/// The encoding of (0, 0): the equator band's shift applied to a zero product.
pub(crate) const ORIGIN: u64 = BAND_TABLE[3].shift_encode;

impl Band {
    /// Selects the band containing `latitude`, scanning from the north.
    ///
    /// For a latitude exactly on a shared boundary the encode floors resolve
    /// the tie toward the pole-ward band, matching row ownership in
    /// [`derive`]. `latitude` must not be NaN.
    pub(crate) fn for_latitude(latitude: f64) -> &'static Band {
        BANDS
            .iter()
            .rev()
            .find(|band| {
                if band.floor_inclusive {
                    latitude >= band.floor
                } else {
                    latitude > band.floor
                }
            })
            .unwrap_or(&BANDS[0])
    }

    /// Locates the band whose sub-range contains `value`.
    ///
    /// Total over all of `u64`: values past [`MAX_VALUE`] must be rejected by
    /// the caller before the result is meaningful.
    pub(crate) fn locate(value: u64) -> &'static Band {
        BANDS
            .iter()
            .rev()
            .find(|band| value >= band.min)
            .unwrap_or(&BANDS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Literal checkpoints for the derivation routine. Each value is the
    // closed-form cumulative sum written out by hand once, so a regression in
    // `derive` cannot go unnoticed.
    #[test]
    fn derived_minimums_match_literals() {
        let mins: Vec<u64> = BANDS.iter().map(|b| b.min).collect();
        assert_eq!(
            mins,
            vec![
                0,
                18_000_000_360_000_000,
                468_000_000_360_000_000,
                612_000_000_360_000_000,
                17_315_999_993_160_000_000,
                18_179_999_993_160_000_000,
                18_413_999_993_160_000_000,
            ]
        );
        assert_eq!(MAX_VALUE, 18_431_999_993_519_999_999);
        assert_eq!(ORIGIN, 8_675_999_996_760_000_000);
    }

    #[test]
    fn sub_ranges_are_contiguous() {
        for pair in BANDS.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
        assert_eq!(BANDS[0].min, 0);
    }

    #[test]
    fn step_table_matches_band_plan() {
        let steps: Vec<(u64, u64)> = BANDS.iter().map(|b| (b.lat_step, b.lng_step)).collect();
        assert_eq!(
            steps,
            vec![
                (GOOD, ROUGH),
                (GOOD, SANE),
                (GOOD, GOOD),
                (EXACT, EXACT),
                (EXACT, GOOD),
                (GOOD, SANE),
                (GOOD, ROUGH),
            ]
        );
    }

    #[test]
    fn locate_is_total_and_consistent() {
        for band in &BANDS {
            assert!(core::ptr::eq(Band::locate(band.min), band));
            assert!(core::ptr::eq(Band::locate(band.max), band));
        }
        assert!(core::ptr::eq(Band::locate(0), &BANDS[0]));
        assert!(core::ptr::eq(Band::locate(MAX_VALUE), &BANDS[6]));
    }

    #[test]
    fn boundary_latitudes_resolve_pole_ward() {
        let expected = [
            (-90.0, 0),
            (-85.0, 0),
            (-60.0, 1),
            (-56.0, 2),
            (0.0, 3),
            (60.0, 4),
            (72.0, 5),
            (85.0, 6),
            (90.0, 6),
        ];
        for (latitude, index) in expected {
            assert!(
                core::ptr::eq(Band::for_latitude(latitude), &BANDS[index]),
                "latitude {latitude} selected the wrong band"
            );
        }
    }
}
