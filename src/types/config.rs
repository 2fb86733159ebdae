use crate::error::MaintenanceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    #[serde(default)]
    pub closed_form: ClosedFormConfig,
    #[serde(default)]
    pub eligibility: EligibilityConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub point_estimate: PointEstimateConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClosedFormConfig {
    pub low_rate: f64,
    pub high_rate: f64,
    pub low_floor: f64,
    pub high_floor: f64,
    pub diminishing_returns: bool,
    pub diminishing_factor: f64,
}

impl Default for ClosedFormConfig {
    fn default() -> Self {
        Self {
            low_rate: 0.06,
            high_rate: 0.08,
            low_floor: 350.0,
            high_floor: 450.0,
            diminishing_returns: true,
            diminishing_factor: 0.95,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub max_age: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self { max_age: 21 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AgeBracket {
    pub max_age: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AgeOverride {
    pub age: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub brackets: Vec<AgeBracket>,
    pub overrides: Vec<AgeOverride>,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            brackets: vec![
                AgeBracket {
                    max_age: 9,
                    weight: 1.2,
                },
                AgeBracket {
                    max_age: 17,
                    weight: 1.0,
                },
                AgeBracket {
                    max_age: u32::MAX,
                    weight: 0.8,
                },
            ],
            overrides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClampMode {
    IncomeShare,
    Fixed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PointEstimateConfig {
    pub clamp: ClampMode,
    pub floor: f64,
    pub cap_share: f64,
    pub ceiling: f64,
    pub low_spread: f64,
    pub high_spread: f64,
}

impl Default for PointEstimateConfig {
    fn default() -> Self {
        Self {
            clamp: ClampMode::IncomeShare,
            floor: 100.0,
            cap_share: 0.10,
            ceiling: 1000.0,
            low_spread: 0.9,
            high_spread: 1.1,
        }
    }
}

// Feature order: father income, mother income, child count, mean age weight.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub means: [f64; 4],
    pub scales: [f64; 4],
    pub coefficients: [f64; 4],
    pub intercept: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            means: [4000.0, 3000.0, 2.0, 1.0],
            scales: [1500.0, 1200.0, 1.0, 0.2],
            coefficients: [60.0, 48.0, 40.0, 10.0],
            intercept: 450.0,
        }
    }
}

impl MaintenanceConfig {
    pub fn validate(&self) -> Result<(), MaintenanceError> {
        let closed = &self.closed_form;
        for (key, value) in [
            ("closed_form.low_rate", closed.low_rate),
            ("closed_form.high_rate", closed.high_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MaintenanceError::ConfigParse(format!(
                    "{key} must be between 0.0 and 1.0"
                )));
            }
        }
        if closed.low_rate > closed.high_rate {
            return Err(MaintenanceError::ConfigParse(
                "closed_form.low_rate cannot exceed closed_form.high_rate".to_string(),
            ));
        }
        for (key, value) in [
            ("closed_form.low_floor", closed.low_floor),
            ("closed_form.high_floor", closed.high_floor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MaintenanceError::ConfigParse(format!(
                    "{key} must be a non-negative amount"
                )));
            }
        }
        if closed.low_floor > closed.high_floor {
            return Err(MaintenanceError::ConfigParse(
                "closed_form.low_floor cannot exceed closed_form.high_floor".to_string(),
            ));
        }
        if !(closed.diminishing_factor > 0.0 && closed.diminishing_factor <= 1.0) {
            return Err(MaintenanceError::ConfigParse(
                "closed_form.diminishing_factor must be in (0.0, 1.0]".to_string(),
            ));
        }

        validate_weights(&self.weights)?;

        let point = &self.point_estimate;
        if !point.floor.is_finite() || point.floor < 0.0 {
            return Err(MaintenanceError::ConfigParse(
                "point_estimate.floor must be a non-negative amount".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&point.cap_share) {
            return Err(MaintenanceError::ConfigParse(
                "point_estimate.cap_share must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !point.ceiling.is_finite() || point.ceiling < point.floor {
            return Err(MaintenanceError::ConfigParse(
                "point_estimate.ceiling must not be below point_estimate.floor".to_string(),
            ));
        }
        if !(point.low_spread > 0.0 && point.low_spread <= 1.0) {
            return Err(MaintenanceError::ConfigParse(
                "point_estimate.low_spread must be in (0.0, 1.0]".to_string(),
            ));
        }
        if !point.high_spread.is_finite() || point.high_spread < 1.0 {
            return Err(MaintenanceError::ConfigParse(
                "point_estimate.high_spread must be at least 1.0".to_string(),
            ));
        }

        let model = &self.model;
        let all_finite = model
            .means
            .iter()
            .chain(model.scales.iter())
            .chain(model.coefficients.iter())
            .chain(std::iter::once(&model.intercept))
            .all(|value| value.is_finite());
        if !all_finite {
            return Err(MaintenanceError::ConfigParse(
                "model parameters must be finite numbers".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_weights(weights: &WeightsConfig) -> Result<(), MaintenanceError> {
    let mut previous: Option<u32> = None;
    for bracket in &weights.brackets {
        if !bracket.weight.is_finite() || bracket.weight <= 0.0 {
            return Err(MaintenanceError::ConfigParse(format!(
                "weights.brackets weight for max_age {} must be positive",
                bracket.max_age
            )));
        }
        if let Some(prev) = previous {
            if bracket.max_age <= prev {
                return Err(MaintenanceError::ConfigParse(
                    "weights.brackets max_age values must be strictly increasing".to_string(),
                ));
            }
        }
        previous = Some(bracket.max_age);
    }

    let mut seen = HashSet::new();
    for entry in &weights.overrides {
        if !entry.weight.is_finite() || entry.weight <= 0.0 {
            return Err(MaintenanceError::ConfigParse(format!(
                "weights.overrides weight for age {} must be positive",
                entry.age
            )));
        }
        if !seen.insert(entry.age) {
            return Err(MaintenanceError::ConfigParse(format!(
                "weights.overrides contains duplicate age: {}",
                entry.age
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: MaintenanceConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.closed_form.low_rate, 0.06);
        assert_eq!(cfg.closed_form.high_rate, 0.08);
        assert_eq!(cfg.closed_form.low_floor, 350.0);
        assert_eq!(cfg.eligibility.max_age, 21);
        assert_eq!(cfg.weights.brackets.len(), 3);
        assert_eq!(cfg.point_estimate.clamp, ClampMode::IncomeShare);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_partial_sections_keeps_other_defaults() {
        let toml_str = r#"
[closed_form]
low_floor = 0.0
high_floor = 0.0

[point_estimate]
clamp = "fixed"
low_spread = 0.75
high_spread = 1.25

[weights]
overrides = [{ age = 4, weight = 1.3 }]
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        assert_eq!(cfg.closed_form.low_floor, 0.0);
        assert_eq!(cfg.closed_form.low_rate, 0.06);
        assert!(cfg.closed_form.diminishing_returns);
        assert_eq!(cfg.point_estimate.clamp, ClampMode::Fixed);
        assert_eq!(cfg.point_estimate.ceiling, 1000.0);
        assert_eq!(
            cfg.weights.overrides,
            vec![AgeOverride {
                age: 4,
                weight: 1.3
            }]
        );
        assert_eq!(cfg.weights.brackets.len(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_rates() {
        let toml_str = r#"
[closed_form]
low_rate = 0.09
high_rate = 0.08
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("low_rate cannot exceed"));
    }

    #[test]
    fn validate_rejects_inverted_floors() {
        let toml_str = r#"
[closed_form]
low_floor = 500.0
high_floor = 450.0
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("low_floor cannot exceed"));
    }

    #[test]
    fn validate_rejects_spread_that_would_invert_range() {
        let toml_str = r#"
[point_estimate]
high_spread = 0.9
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("high_spread must be at least 1.0"));
    }

    #[test]
    fn validate_rejects_unsorted_brackets() {
        let toml_str = r#"
[weights]
brackets = [{ max_age = 17, weight = 1.0 }, { max_age = 9, weight = 1.2 }]
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn validate_rejects_duplicate_override_age() {
        let toml_str = r#"
[weights]
overrides = [{ age = 3, weight = 1.1 }, { age = 3, weight = 1.4 }]
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate age: 3"));
    }

    #[test]
    fn validate_rejects_non_positive_weight() {
        let toml_str = r#"
[weights]
overrides = [{ age = 3, weight = 0.0 }]
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_diminishing_factor() {
        let toml_str = r#"
[closed_form]
diminishing_factor = 0.0
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_ceiling_below_floor() {
        let toml_str = r#"
[point_estimate]
floor = 500.0
ceiling = 400.0
"#;
        let cfg: MaintenanceConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("ceiling must not be below"));
    }
}
