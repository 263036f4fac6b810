use serde::{Deserialize, Serialize};

use crate::{DANGER_PENALTY, Error};

/// Tuning knobs for route scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScorerConfig {
    /// Added to an edge once per dangerous endpoint
    pub danger_penalty: f64,
    /// Added to an edge once per caution endpoint
    pub caution_penalty: f64,
    /// Node count above which graph construction logs a warning
    pub large_graph_warning: usize,
    /// Hard limit on zones per call, unlimited when `None`
    pub max_zones: Option<usize>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            danger_penalty: DANGER_PENALTY,
            caution_penalty: 0.0,
            large_graph_warning: 500,
            max_zones: None,
        }
    }
}

impl ScorerConfig {
    /// Checks that penalties keep every edge weight non-negative
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] describing the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("danger_penalty", self.danger_penalty),
            ("caution_penalty", self.caution_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "{field} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.max_zones == Some(0) {
            log::warn!("max_zones is 0, only direct start-end routes will be accepted");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_penalty_is_rejected() {
        let config = ScorerConfig {
            danger_penalty: -1.0,
            ..ScorerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));

        let config = ScorerConfig {
            caution_penalty: f64::NAN,
            ..ScorerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ScorerConfig = serde_json::from_str(r#"{"caution_penalty": 0.5}"#).unwrap();
        assert_eq!(config.caution_penalty, 0.5);
        assert_eq!(config.danger_penalty, DANGER_PENALTY);
        assert_eq!(config.max_zones, None);
    }
}
