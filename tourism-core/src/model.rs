use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Error code attached to responses synthesized on the client side.
pub const CLIENT_ERROR_CODE: &str = "API_ERROR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismRequest {
    pub query: String,
    pub place: Option<String>,
}

impl TourismRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), place: None }
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub rain_probability: f64,
    #[serde(default)]
    pub place_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismResponse {
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default)]
    pub places: Option<Vec<PlaceInfo>>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
    pub success: bool,
}

impl TourismResponse {
    /// Failure-shaped response used when the request itself failed.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            place_name: None,
            weather: None,
            places: None,
            message: message.into(),
            error: Some(CLIENT_ERROR_CODE.to_string()),
            success: false,
        }
    }

    /// Places list, treating `null` and `[]` the same.
    pub fn places(&self) -> &[PlaceInfo] {
        self.places.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub query: String,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub user_ip: Option<String>,
    #[serde(default)]
    pub has_weather: bool,
    #[serde(default)]
    pub has_places: bool,
    #[serde(default)]
    pub weather_temp: Option<f64>,
    #[serde(default)]
    pub weather_rain_prob: Option<f64>,
    #[serde(default)]
    pub places_count: u32,
    #[serde(default)]
    pub error: Option<String>,
    pub success: bool,
    pub created_at: String,
}

impl HistoryEntry {
    /// Human-readable creation time.
    ///
    /// The backend emits naive ISO timestamps (`2024-05-01T10:15:30.123456`);
    /// RFC 3339 values are accepted too. Anything else is returned verbatim.
    pub fn display_time(&self) -> String {
        const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return dt.format(FORMAT).to_string();
        }

        match NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(ndt) => ndt.format(FORMAT).to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStats {
    pub total_queries: u64,
    pub successful_queries: u64,
    pub unique_places: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEnvelope {
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope {
    pub success: bool,
    pub stats: QueryStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceHistoryEnvelope {
    pub success: bool,
    pub place_name: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Payload of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}
