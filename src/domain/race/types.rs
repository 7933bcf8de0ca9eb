use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A loosely-typed scalar as it arrives from the results feed.
///
/// Positions, points and grid slots are published as JSON strings (`"3"`, `"25"`),
/// but hand-written fixtures and other feeds use plain numbers. Normalization
/// happens in [`super::normalize`], never at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// True for an empty or whitespace-only text value.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Int(v) => write!(f, "{}", v),
            RawValue::Float(v) => write!(f, "{}", v),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FastestLap {
    #[serde(default)]
    pub rank: Option<RawValue>,
}

/// One competitor's result in one race.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DriverResult {
    #[serde(default)]
    pub position: Option<RawValue>,
    #[serde(default)]
    pub points: Option<RawValue>,
    #[serde(default)]
    pub grid: Option<RawValue>,
    /// `"Finished"` or a retirement cause / lapped marker such as `"+1 Lap"`.
    #[serde(default)]
    pub status: String,
    #[serde(rename = "FastestLap", default, skip_serializing_if = "Option::is_none")]
    pub fastest_lap: Option<FastestLap>,
}

impl DriverResult {
    /// Classified finish with the literal `"Finished"` status.
    pub fn finished(position: u32, points: f64, grid: u32) -> Self {
        Self {
            position: Some(RawValue::Text(position.to_string())),
            points: Some(RawValue::Text(points.to_string())),
            grid: Some(RawValue::Text(grid.to_string())),
            status: "Finished".to_string(),
            fastest_lap: None,
        }
    }

    /// Non-finish: position marker `"R"`, no points.
    pub fn retired(status: &str, grid: u32) -> Self {
        Self {
            position: Some(RawValue::Text("R".to_string())),
            points: Some(RawValue::Text("0".to_string())),
            grid: Some(RawValue::Text(grid.to_string())),
            status: status.to_string(),
            fastest_lap: None,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_grid(mut self, grid: Option<RawValue>) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_fastest_lap_rank(mut self, rank: u32) -> Self {
        self.fastest_lap = Some(FastestLap {
            rank: Some(RawValue::Text(rank.to_string())),
        });
        self
    }
}

/// A single race as seen by one competitor.
///
/// `results` mirrors the feed's `Results` array; the analytics only ever read the
/// first entry, the caller is responsible for having selected the right driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    #[serde(rename = "raceName", default)]
    pub race_name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_round", default)]
    pub round: u32,
    #[serde(rename = "Results", default)]
    pub results: Vec<DriverResult>,
}

impl RaceResult {
    pub fn new(round: u32, race_name: &str, date: Option<NaiveDate>, result: DriverResult) -> Self {
        Self {
            race_name: race_name.to_string(),
            date,
            round,
            results: vec![result],
        }
    }

    /// The competitor's entry, if the feed carried one.
    pub fn result(&self) -> Option<&DriverResult> {
        self.results.first()
    }

    /// Status of the first entry, empty when there is none.
    pub fn status(&self) -> &str {
        self.result().map(|r| r.status.as_str()).unwrap_or("")
    }
}

fn deserialize_round<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match RawValue::deserialize(deserializer)? {
        RawValue::Int(v) => u32::try_from(v).map_err(serde::de::Error::custom),
        RawValue::Float(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
        RawValue::Float(v) => Err(serde::de::Error::custom(format!("invalid round: {}", v))),
        RawValue::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid round '{}': {}", s, e))),
    }
}
