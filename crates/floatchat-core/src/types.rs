use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Chat messages
// =============================================================================

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End-user input.
    User,
    /// Model or system-generated reply.
    Assistant,
    /// Fixed domain prompt prepended to relay calls.
    System,
}

impl Role {
    /// Wire-format name of the role, as sent to the completion endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// One entry in the append-only, in-memory conversation log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Create a message stamped with the current time.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

// =============================================================================
// Visualization payloads
// =============================================================================

/// Chart rendering style. Only line charts are produced today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
}

/// A single plotted series with its cosmetic styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
    pub point_background_color: String,
    pub point_radius: f64,
    pub point_hover_radius: f64,
    pub border_width: f64,
}

impl ChartSeries {
    /// Build a series with the standard styling for the given accent color.
    ///
    /// `background_color` is the accent at 10% opacity, matching the fill
    /// used under every profile line.
    pub fn styled(label: impl Into<String>, data: Vec<f64>, color: &str, fill: &str) -> Self {
        Self {
            label: label.into(),
            data,
            border_color: color.to_string(),
            background_color: fill.to_string(),
            tension: 0.2,
            point_background_color: color.to_string(),
            point_radius: 2.0,
            point_hover_radius: 4.0,
            border_width: 2.0,
        }
    }
}

/// Chart payload: depth labels on the x-axis, one or more value series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub chart_type: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

impl ChartData {
    /// Every series must have one value per x-axis label.
    pub fn is_consistent(&self) -> bool {
        self.datasets.iter().all(|s| s.data.len() == self.labels.len())
    }
}

/// Sensor class of an ARGO float.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatType {
    /// Temperature/salinity/pressure only.
    Core,
    /// Extended-depth profiling.
    Deep,
    /// Biogeochemical sensor package.
    Bgc,
}

/// One float marker on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatPosition {
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
    #[serde(rename = "type")]
    pub float_type: Option<FloatType>,
}

/// Map payload: float markers for a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub coordinates: Vec<FloatPosition>,
    pub region: String,
    pub parameter: String,
}

/// The data half of a visualization response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum VisualizationPayload {
    Chart(ChartData),
    Map(MapData),
    Text,
}

/// What the dashboard renders for one query: a payload plus a caption.
///
/// Synthesized fresh on every user query; the previous response is fully
/// replaced, never merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualizationResponse {
    #[serde(flatten)]
    pub payload: VisualizationPayload,
    pub message: String,
}

impl VisualizationResponse {
    pub fn chart(data: ChartData, message: impl Into<String>) -> Self {
        Self {
            payload: VisualizationPayload::Chart(data),
            message: message.into(),
        }
    }

    pub fn map(data: MapData, message: impl Into<String>) -> Self {
        Self {
            payload: VisualizationPayload::Map(data),
            message: message.into(),
        }
    }

    pub fn text(message: impl Into<String>) -> Self {
        Self {
            payload: VisualizationPayload::Text,
            message: message.into(),
        }
    }

    /// True when the payload carries no chart or map data.
    pub fn is_text(&self) -> bool {
        matches!(self.payload, VisualizationPayload::Text)
    }
}
