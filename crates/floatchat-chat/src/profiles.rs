//! Canned oceanographic profiles and float positions.
//!
//! Fixed lookup tables keyed by region, sampled from real ARGO measurement
//! ranges. Region detection is ordered substring matching over the
//! lower-cased query; the first hit wins and unmatched queries fall back to
//! the global tables.

use floatchat_core::types::{FloatPosition, FloatType};

// =============================================================================
// Region names
// =============================================================================

pub const ARABIAN_SEA: &str = "Arabian Sea";
pub const NORTH_PACIFIC: &str = "North Pacific";
pub const NORTH_ATLANTIC: &str = "North Atlantic";
pub const INDIAN_OCEAN: &str = "Indian Ocean";
pub const GLOBAL_OCEAN: &str = "Global Ocean";

pub const PACIFIC_OCEAN: &str = "Pacific Ocean";
pub const ATLANTIC_OCEAN: &str = "Atlantic Ocean";
pub const GLOBAL: &str = "Global";

/// Resolve the region for profile charts.
///
/// Checked in order: arabian, pacific, atlantic, indian. First hit wins.
pub fn chart_region(lower_query: &str) -> &'static str {
    if lower_query.contains("arabian") {
        ARABIAN_SEA
    } else if lower_query.contains("pacific") {
        NORTH_PACIFIC
    } else if lower_query.contains("atlantic") {
        NORTH_ATLANTIC
    } else if lower_query.contains("indian") {
        INDIAN_OCEAN
    } else {
        GLOBAL_OCEAN
    }
}

/// Resolve the region for BGC profiles. No Indian Ocean table exists for
/// these parameters, so "indian" falls through to the global default.
pub fn bgc_region(lower_query: &str) -> &'static str {
    if lower_query.contains("arabian") {
        ARABIAN_SEA
    } else if lower_query.contains("pacific") {
        NORTH_PACIFIC
    } else if lower_query.contains("atlantic") {
        NORTH_ATLANTIC
    } else {
        GLOBAL_OCEAN
    }
}

/// Resolve the region for float position maps.
pub fn map_region(lower_query: &str) -> &'static str {
    if lower_query.contains("arabian") {
        ARABIAN_SEA
    } else if lower_query.contains("pacific") {
        PACIFIC_OCEAN
    } else if lower_query.contains("atlantic") {
        ATLANTIC_OCEAN
    } else if lower_query.contains("indian") {
        INDIAN_OCEAN
    } else {
        GLOBAL
    }
}

// =============================================================================
// Depth scales
// =============================================================================

/// Standard 0-2000m depth scale for temperature and salinity profiles.
pub const DEPTH_LABELS: [&str; 14] = [
    "0", "10", "25", "50", "75", "100", "150", "200", "300", "500", "750", "1000", "1500", "2000",
];

/// Coarser depth scale used for dissolved oxygen profiles.
pub const OXYGEN_DEPTH_LABELS: [&str; 11] = [
    "0", "25", "50", "100", "200", "400", "600", "800", "1000", "1500", "2000",
];

/// Shallow depth scale for chlorophyll (productivity is a surface phenomenon).
pub const CHLOROPHYLL_DEPTH_LABELS: [&str; 8] = ["0", "10", "25", "50", "75", "100", "150", "200"];

// =============================================================================
// Salinity (PSU)
// =============================================================================

const SALINITY_ARABIAN: [f64; 14] = [
    36.8, 36.7, 36.5, 36.2, 35.8, 35.4, 35.1, 34.9, 34.8, 34.7, 34.6, 34.6, 34.7, 34.7,
];
const SALINITY_PACIFIC: [f64; 14] = [
    33.8, 33.9, 34.1, 34.3, 34.4, 34.5, 34.4, 34.3, 34.2, 34.3, 34.5, 34.6, 34.7, 34.7,
];
const SALINITY_ATLANTIC: [f64; 14] = [
    35.2, 35.3, 35.5, 35.8, 36.0, 35.9, 35.6, 35.3, 35.0, 34.9, 34.9, 35.0, 35.0, 34.9,
];
const SALINITY_INDIAN: [f64; 14] = [
    35.5, 35.6, 35.7, 35.8, 35.6, 35.3, 35.0, 34.8, 34.7, 34.6, 34.6, 34.7, 34.7, 34.7,
];
const SALINITY_GLOBAL: [f64; 14] = [
    35.0, 35.1, 35.3, 35.5, 35.4, 35.2, 34.9, 34.7, 34.6, 34.6, 34.6, 34.7, 34.7, 34.7,
];

/// Salinity-vs-depth table for a region, on the [`DEPTH_LABELS`] scale.
pub fn salinity_profile(region: &str) -> &'static [f64; 14] {
    match region {
        ARABIAN_SEA => &SALINITY_ARABIAN,
        NORTH_PACIFIC => &SALINITY_PACIFIC,
        NORTH_ATLANTIC => &SALINITY_ATLANTIC,
        INDIAN_OCEAN => &SALINITY_INDIAN,
        _ => &SALINITY_GLOBAL,
    }
}

// =============================================================================
// Temperature (°C)
// =============================================================================

const TEMPERATURE_ARABIAN: [f64; 14] = [
    29.8, 29.5, 28.2, 25.1, 21.8, 18.4, 14.2, 11.8, 8.9, 6.2, 4.8, 3.9, 2.8, 2.1,
];
const TEMPERATURE_PACIFIC: [f64; 14] = [
    15.2, 14.8, 13.5, 11.2, 9.1, 7.8, 6.2, 5.1, 4.2, 3.8, 3.2, 2.9, 2.3, 1.8,
];
const TEMPERATURE_ATLANTIC: [f64; 14] = [
    18.5, 18.1, 16.8, 14.2, 11.9, 9.8, 7.8, 6.4, 5.2, 4.1, 3.5, 3.1, 2.8, 2.4,
];
const TEMPERATURE_INDIAN: [f64; 14] = [
    27.3, 26.9, 25.1, 22.4, 19.1, 16.2, 13.1, 10.8, 8.1, 5.9, 4.2, 3.4, 2.7, 2.2,
];
const TEMPERATURE_GLOBAL: [f64; 14] = [
    22.1, 21.8, 20.2, 17.8, 15.1, 12.4, 9.8, 7.9, 6.1, 4.8, 3.9, 3.2, 2.6, 2.1,
];

/// Temperature-vs-depth table for a region, on the [`DEPTH_LABELS`] scale.
pub fn temperature_profile(region: &str) -> &'static [f64; 14] {
    match region {
        ARABIAN_SEA => &TEMPERATURE_ARABIAN,
        NORTH_PACIFIC => &TEMPERATURE_PACIFIC,
        NORTH_ATLANTIC => &TEMPERATURE_ATLANTIC,
        INDIAN_OCEAN => &TEMPERATURE_INDIAN,
        _ => &TEMPERATURE_GLOBAL,
    }
}

// =============================================================================
// Dissolved oxygen (μmol/kg)
// =============================================================================

// The Arabian Sea hosts one of the strongest oxygen minimum zones on Earth;
// its mid-depth values drop near anoxia.
const OXYGEN_ARABIAN: [f64; 11] = [
    220.0, 215.0, 180.0, 120.0, 15.0, 8.0, 12.0, 45.0, 85.0, 140.0, 180.0,
];
const OXYGEN_PACIFIC: [f64; 11] = [
    280.0, 270.0, 250.0, 200.0, 80.0, 35.0, 55.0, 95.0, 130.0, 170.0, 200.0,
];
const OXYGEN_GLOBAL: [f64; 11] = [
    250.0, 240.0, 220.0, 160.0, 60.0, 30.0, 40.0, 70.0, 110.0, 155.0, 190.0,
];

/// Oxygen-vs-depth table for a region, on the [`OXYGEN_DEPTH_LABELS`] scale.
pub fn oxygen_profile(region: &str) -> &'static [f64; 11] {
    match region {
        ARABIAN_SEA => &OXYGEN_ARABIAN,
        NORTH_PACIFIC => &OXYGEN_PACIFIC,
        _ => &OXYGEN_GLOBAL,
    }
}

// =============================================================================
// Chlorophyll-a (mg/m³)
// =============================================================================

/// Single chlorophyll table with a deep chlorophyll maximum around 50-75m,
/// used regardless of region.
pub const CHLOROPHYLL_PROFILE: [f64; 8] = [0.8, 1.2, 2.1, 3.8, 2.9, 1.4, 0.6, 0.2];

// =============================================================================
// Float positions
// =============================================================================

fn pos(lat: f64, lng: f64, value: f64, float_type: FloatType) -> FloatPosition {
    FloatPosition {
        lat,
        lng,
        value,
        float_type: Some(float_type),
    }
}

/// Hand-authored float positions for a map region, matching the observed
/// ARGO distribution (dense Pacific coverage, Arabian basin cluster, etc.).
pub fn float_positions(region: &str) -> Vec<FloatPosition> {
    use FloatType::{Bgc, Core, Deep};
    match region {
        ARABIAN_SEA => vec![
            pos(18.5, 65.2, 35.8, Core),
            pos(20.1, 67.8, 35.6, Core),
            pos(22.3, 63.5, 36.0, Bgc),
            pos(19.8, 69.1, 35.7, Deep),
            pos(21.7, 66.4, 35.9, Core),
            pos(17.2, 68.3, 35.5, Core),
            pos(15.8, 65.9, 35.4, Bgc),
            pos(23.1, 61.7, 36.1, Core),
            pos(16.4, 70.2, 35.3, Deep),
            pos(24.5, 64.8, 35.8, Core),
        ],
        PACIFIC_OCEAN => vec![
            pos(35.2, 165.8, 34.2, Core),
            pos(42.1, 178.3, 33.8, Deep),
            pos(28.7, -145.2, 34.5, Core),
            pos(51.3, -178.9, 33.1, Core),
            pos(25.4, 160.7, 34.3, Bgc),
            pos(38.9, -155.4, 34.1, Core),
            pos(45.2, 170.8, 33.9, Deep),
            pos(32.1, -140.3, 34.4, Core),
            pos(48.7, -165.9, 33.7, Core),
            pos(29.8, 155.2, 34.6, Bgc),
            pos(40.3, -170.1, 34.0, Deep),
            pos(33.6, 175.4, 34.2, Core),
            // Southern Pacific
            pos(-25.4, 160.7, 34.8, Core),
            pos(-35.2, -120.8, 34.5, Core),
            pos(-42.1, 155.3, 34.3, Deep),
            pos(-18.9, -110.4, 34.9, Bgc),
        ],
        ATLANTIC_OCEAN => vec![
            pos(45.2, -35.8, 35.1, Core),
            pos(38.1, -42.3, 35.3, Deep),
            pos(52.7, -25.2, 34.9, Core),
            pos(31.3, -48.9, 35.5, Bgc),
            pos(25.4, -55.7, 35.8, Core),
            pos(40.8, -30.3, 35.2, Deep),
            // South Atlantic
            pos(-25.4, -15.7, 35.0, Core),
            pos(-35.2, -8.8, 34.8, Core),
            pos(-42.1, -25.3, 34.6, Deep),
        ],
        INDIAN_OCEAN => vec![
            pos(-15.5, 85.2, 35.2, Core),
            pos(-25.1, 95.8, 35.0, Deep),
            pos(-35.3, 78.5, 34.8, Core),
            pos(-8.8, 92.1, 35.4, Bgc),
            pos(-45.2, 85.7, 34.5, Core),
            pos(-18.4, 105.2, 35.1, Core),
        ],
        _ => vec![
            pos(25.5, 70.2, 35.2, Core),
            pos(28.1, 72.8, 35.0, Deep),
            pos(22.3, 68.5, 35.4, Bgc),
            pos(30.8, 74.1, 34.8, Core),
        ],
    }
}

// =============================================================================
// Series styling
// =============================================================================

pub const SALINITY_COLOR: &str = "#06b6d4";
pub const SALINITY_FILL: &str = "rgba(6, 182, 212, 0.1)";
pub const TEMPERATURE_COLOR: &str = "#f59e0b";
pub const TEMPERATURE_FILL: &str = "rgba(245, 158, 11, 0.1)";
pub const OXYGEN_COLOR: &str = "#10b981";
pub const OXYGEN_FILL: &str = "rgba(16, 185, 129, 0.1)";
pub const CHLOROPHYLL_COLOR: &str = "#22c55e";
pub const CHLOROPHYLL_FILL: &str = "rgba(34, 197, 94, 0.1)";

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Region detection ----

    #[test]
    fn test_chart_region_order() {
        assert_eq!(chart_region("arabian sea data"), ARABIAN_SEA);
        assert_eq!(chart_region("pacific profiles"), NORTH_PACIFIC);
        assert_eq!(chart_region("the atlantic please"), NORTH_ATLANTIC);
        assert_eq!(chart_region("indian ocean"), INDIAN_OCEAN);
        assert_eq!(chart_region("somewhere else"), GLOBAL_OCEAN);
    }

    #[test]
    fn test_chart_region_first_hit_wins() {
        // "arabian" is checked before "indian" even though both match.
        assert_eq!(chart_region("arabian and indian"), ARABIAN_SEA);
        assert_eq!(chart_region("pacific and atlantic"), NORTH_PACIFIC);
    }

    #[test]
    fn test_bgc_region_has_no_indian_case() {
        assert_eq!(bgc_region("indian ocean oxygen"), GLOBAL_OCEAN);
        assert_eq!(bgc_region("arabian oxygen"), ARABIAN_SEA);
        assert_eq!(bgc_region("atlantic bgc"), NORTH_ATLANTIC);
    }

    #[test]
    fn test_map_region_names_differ_from_chart() {
        assert_eq!(map_region("pacific floats"), PACIFIC_OCEAN);
        assert_eq!(map_region("atlantic floats"), ATLANTIC_OCEAN);
        assert_eq!(map_region("float map"), GLOBAL);
        assert_eq!(map_region("arabian floats"), ARABIAN_SEA);
        assert_eq!(map_region("indian floats"), INDIAN_OCEAN);
    }

    // ---- Depth scales ----

    #[test]
    fn test_depth_scale_values() {
        assert_eq!(
            DEPTH_LABELS,
            [
                "0", "10", "25", "50", "75", "100", "150", "200", "300", "500", "750", "1000",
                "1500", "2000"
            ]
        );
        assert_eq!(OXYGEN_DEPTH_LABELS.len(), 11);
        assert_eq!(CHLOROPHYLL_DEPTH_LABELS.len(), 8);
    }

    // ---- Table lengths match their scales ----

    #[test]
    fn test_all_salinity_tables_match_scale() {
        for region in [
            ARABIAN_SEA,
            NORTH_PACIFIC,
            NORTH_ATLANTIC,
            INDIAN_OCEAN,
            GLOBAL_OCEAN,
        ] {
            assert_eq!(salinity_profile(region).len(), DEPTH_LABELS.len());
        }
    }

    #[test]
    fn test_all_temperature_tables_match_scale() {
        for region in [
            ARABIAN_SEA,
            NORTH_PACIFIC,
            NORTH_ATLANTIC,
            INDIAN_OCEAN,
            GLOBAL_OCEAN,
        ] {
            assert_eq!(temperature_profile(region).len(), DEPTH_LABELS.len());
        }
    }

    #[test]
    fn test_all_oxygen_tables_match_scale() {
        for region in [ARABIAN_SEA, NORTH_PACIFIC, GLOBAL_OCEAN] {
            assert_eq!(oxygen_profile(region).len(), OXYGEN_DEPTH_LABELS.len());
        }
    }

    #[test]
    fn test_chlorophyll_table_matches_scale() {
        assert_eq!(CHLOROPHYLL_PROFILE.len(), CHLOROPHYLL_DEPTH_LABELS.len());
    }

    // ---- Known surface values ----

    #[test]
    fn test_arabian_salinity_surface_value() {
        assert_eq!(salinity_profile(ARABIAN_SEA)[0], 36.8);
    }

    #[test]
    fn test_pacific_temperature_endpoints() {
        let table = temperature_profile(NORTH_PACIFIC);
        assert_eq!(table[0], 15.2);
        assert_eq!(table[13], 1.8);
    }

    #[test]
    fn test_global_oxygen_fallback_table() {
        assert_eq!(
            oxygen_profile(GLOBAL_OCEAN),
            &[250.0, 240.0, 220.0, 160.0, 60.0, 30.0, 40.0, 70.0, 110.0, 155.0, 190.0]
        );
    }

    #[test]
    fn test_unknown_region_uses_global_tables() {
        assert_eq!(salinity_profile("Bay of Bengal"), &SALINITY_GLOBAL);
        assert_eq!(temperature_profile("Bay of Bengal"), &TEMPERATURE_GLOBAL);
        assert_eq!(oxygen_profile("Bay of Bengal"), &OXYGEN_GLOBAL);
    }

    // ---- Oxygen minimum zone shape ----

    #[test]
    fn test_oxygen_tables_have_mid_depth_minimum() {
        for region in [ARABIAN_SEA, NORTH_PACIFIC, GLOBAL_OCEAN] {
            let table = oxygen_profile(region);
            let min = table.iter().cloned().fold(f64::INFINITY, f64::min);
            // The minimum sits at 400m (index 5), well below the surface value.
            assert_eq!(table[5], min);
            assert!(table[0] > min * 2.0);
        }
    }

    // ---- Float positions ----

    #[test]
    fn test_float_position_counts() {
        assert_eq!(float_positions(ARABIAN_SEA).len(), 10);
        assert_eq!(float_positions(PACIFIC_OCEAN).len(), 16);
        assert_eq!(float_positions(ATLANTIC_OCEAN).len(), 9);
        assert_eq!(float_positions(INDIAN_OCEAN).len(), 6);
        assert_eq!(float_positions(GLOBAL).len(), 4);
    }

    #[test]
    fn test_float_positions_have_types() {
        for p in float_positions(ARABIAN_SEA) {
            assert!(p.float_type.is_some());
        }
    }

    #[test]
    fn test_float_positions_within_coordinate_bounds() {
        for region in [
            ARABIAN_SEA,
            PACIFIC_OCEAN,
            ATLANTIC_OCEAN,
            INDIAN_OCEAN,
            GLOBAL,
        ] {
            for p in float_positions(region) {
                assert!((-90.0..=90.0).contains(&p.lat));
                assert!((-180.0..=180.0).contains(&p.lng));
            }
        }
    }

    #[test]
    fn test_arabian_first_float() {
        let floats = float_positions(ARABIAN_SEA);
        assert_eq!(floats[0].lat, 18.5);
        assert_eq!(floats[0].lng, 65.2);
        assert_eq!(floats[0].value, 35.8);
        assert_eq!(floats[0].float_type, Some(FloatType::Core));
    }
}
