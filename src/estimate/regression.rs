use crate::types::config::ModelConfig;

pub const FEATURE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub father_income: f64,
    pub mother_income: f64,
    pub child_count: f64,
    pub mean_weight: f64,
}

impl Features {
    fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.father_income,
            self.mother_income,
            self.child_count,
            self.mean_weight,
        ]
    }
}

/// A linear regressor behind a standard scaler. Built once at startup and
/// borrowed read-only by every estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel {
    means: [f64; FEATURE_COUNT],
    scales: [f64; FEATURE_COUNT],
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl RegressionModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            means: config.means,
            scales: config.scales,
            coefficients: config.coefficients,
            intercept: config.intercept,
        }
    }

    pub fn predict(&self, features: &Features) -> f64 {
        features
            .as_array()
            .iter()
            .enumerate()
            .map(|(index, value)| {
                // zero-variance feature: scaler leaves it centred only
                let scale = if self.scales[index] == 0.0 {
                    1.0
                } else {
                    self.scales[index]
                };
                (value - self.means[index]) / scale * self.coefficients[index]
            })
            .sum::<f64>()
            + self.intercept
    }
}

impl Default for RegressionModel {
    fn default() -> Self {
        Self::from_config(&ModelConfig::default())
    }
}
