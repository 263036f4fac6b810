//! Labeled safety zones used as intermediate routing nodes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Error, ScorerConfig};

/// Safety label attached to a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Danger,
}

impl SafetyLevel {
    /// Penalty this level contributes to every edge touching the zone
    pub fn penalty(self, config: &ScorerConfig) -> f64 {
        match self {
            SafetyLevel::Safe => 0.0,
            SafetyLevel::Caution => config.caution_penalty,
            SafetyLevel::Danger => config.danger_penalty,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SafetyLevel::Safe => "safe",
            SafetyLevel::Caution => "caution",
            SafetyLevel::Danger => "danger",
        }
    }
}

impl FromStr for SafetyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(SafetyLevel::Safe),
            "caution" => Ok(SafetyLevel::Caution),
            "danger" => Ok(SafetyLevel::Danger),
            _ => Err(Error::InvalidInput(format!("unknown safety level '{s}'"))),
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Safety zone
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyZone {
    /// Human readable label, e.g. "Connaught Place"
    pub name: String,
    pub coordinate: Coordinate,
    pub safety_level: SafetyLevel,
    /// Radius for map display in meters, not used for routing
    pub display_radius: Option<f64>,
}

impl SafetyZone {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, safety_level: SafetyLevel) -> Self {
        Self {
            name: name.into(),
            coordinate,
            safety_level,
            display_radius: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a negative or non-finite radius.
    pub fn with_display_radius(mut self, radius: f64) -> Result<Self, Error> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidInput(format!(
                "display radius {radius} of zone '{}' must be a non-negative number",
                self.name
            )));
        }
        self.display_radius = Some(radius);
        Ok(self)
    }
}
