//! Keyword query classifier and visualization synthesis.
//!
//! Maps an arbitrary query string to exactly one [`VisualizationResponse`]
//! using ordered, first-match-wins substring tests against the lower-cased
//! query. A pure function of the input plus the fixed tables in
//! [`crate::profiles`]; every input resolves, so there are no error paths.

use floatchat_core::types::{ChartData, ChartKind, ChartSeries, MapData, VisualizationResponse};

use crate::profiles;

/// Help text returned when no keyword rule matches.
pub const HELP_MESSAGE: &str = "I can help you explore ARGO ocean data. Try asking about \
    temperature profiles, salinity data, BGC parameters, or float locations in specific regions!";

// =============================================================================
// Dispatch table
// =============================================================================

/// One classification rule: trigger keywords plus the response builder.
///
/// Rules are tried in declaration order and the first rule with any keyword
/// present in the query wins, so later rules are unreachable once an earlier
/// one matches (e.g. "salinity and temperature" charts salinity).
struct Rule {
    keywords: &'static [&'static str],
    build: fn(&str) -> VisualizationResponse,
}

static RULES: &[Rule] = &[
    Rule {
        keywords: &["salinity"],
        build: salinity_response,
    },
    Rule {
        keywords: &["temperature"],
        build: temperature_response,
    },
    Rule {
        keywords: &["bgc", "oxygen", "chlorophyll"],
        build: bgc_response,
    },
    Rule {
        keywords: &["location", "map", "float"],
        build: map_response,
    },
];

/// Rule-based query classifier over the canned data tables.
#[derive(Debug, Default)]
pub struct QueryClassifier;

impl QueryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query and synthesize its visualization.
    ///
    /// Deterministic: the same input always yields the same response, and a
    /// response is built fresh on every call (never cached or merged).
    pub fn classify(&self, query: &str) -> VisualizationResponse {
        let lower = query.to_lowercase();
        for rule in RULES {
            if rule.keywords.iter().any(|k| lower.contains(k)) {
                return (rule.build)(&lower);
            }
        }
        VisualizationResponse::text(HELP_MESSAGE)
    }
}

// =============================================================================
// Response builders
// =============================================================================

fn line_chart(labels: &[&str], series: ChartSeries) -> ChartData {
    ChartData {
        chart_type: ChartKind::Line,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        datasets: vec![series],
    }
}

fn salinity_response(lower_query: &str) -> VisualizationResponse {
    let region = profiles::chart_region(lower_query);
    let table = profiles::salinity_profile(region);

    let series = ChartSeries::styled(
        format!("Salinity (PSU) - {}", region),
        table.to_vec(),
        profiles::SALINITY_COLOR,
        profiles::SALINITY_FILL,
    );

    VisualizationResponse::chart(
        line_chart(&profiles::DEPTH_LABELS, series),
        format!(
            "Salinity profile from ARGO float WMO 2902746 in the {}. Shows typical halocline \
             structure with surface mixed layer and deep water characteristics.",
            region
        ),
    )
}

fn temperature_response(lower_query: &str) -> VisualizationResponse {
    let region = profiles::chart_region(lower_query);
    let table = profiles::temperature_profile(region);

    let series = ChartSeries::styled(
        format!("Temperature (°C) - {}", region),
        table.to_vec(),
        profiles::TEMPERATURE_COLOR,
        profiles::TEMPERATURE_FILL,
    );

    VisualizationResponse::chart(
        line_chart(&profiles::DEPTH_LABELS, series),
        format!(
            "Temperature profile from ARGO float WMO 2902745 in the {}. Shows characteristic \
             thermocline structure with surface mixed layer at {}°C and deep water temperatures \
             reaching {}°C.",
            region,
            table[0],
            table[table.len() - 1]
        ),
    )
}

fn bgc_response(lower_query: &str) -> VisualizationResponse {
    let region = profiles::bgc_region(lower_query);

    if lower_query.contains("oxygen") {
        let table = profiles::oxygen_profile(region);
        let series = ChartSeries::styled(
            format!("Dissolved Oxygen (μmol/kg) - {}", region),
            table.to_vec(),
            profiles::OXYGEN_COLOR,
            profiles::OXYGEN_FILL,
        );
        return VisualizationResponse::chart(
            line_chart(&profiles::OXYGEN_DEPTH_LABELS, series),
            format!(
                "BGC ARGO float WMO 2902748 dissolved oxygen profile in the {}. Shows pronounced \
                 oxygen minimum zone (OMZ) between 200-800m depth, characteristic of this \
                 region's biogeochemistry.",
                region
            ),
        );
    }

    // Chlorophyll: one table regardless of region.
    let series = ChartSeries::styled(
        "Chlorophyll-a (mg/m³)",
        profiles::CHLOROPHYLL_PROFILE.to_vec(),
        profiles::CHLOROPHYLL_COLOR,
        profiles::CHLOROPHYLL_FILL,
    );
    VisualizationResponse::chart(
        line_chart(&profiles::CHLOROPHYLL_DEPTH_LABELS, series),
        "BGC ARGO float chlorophyll-a profile showing deep chlorophyll maximum (DCM) around \
         50-75m depth, indicating primary productivity zone.",
    )
}

fn map_response(lower_query: &str) -> VisualizationResponse {
    let region = profiles::map_region(lower_query);

    VisualizationResponse::map(
        MapData {
            coordinates: profiles::float_positions(region),
            region: region.to_string(),
            parameter: "Active ARGO Floats".to_string(),
        },
        format!(
            "Current ARGO float positions in the {} with recent measurement data.",
            region
        ),
    )
}

// =============================================================================
// Tests
// =============================================================================
