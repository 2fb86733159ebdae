use crate::types::config::{AgeBracket, AgeOverride, WeightsConfig};

// Overrides win over brackets; an age past the last bracket weighs 1.0.
#[derive(Debug, Clone)]
pub struct AgeWeights {
    brackets: Vec<AgeBracket>,
    overrides: Vec<AgeOverride>,
}

impl AgeWeights {
    pub fn from_config(config: &WeightsConfig) -> Self {
        Self {
            brackets: config.brackets.clone(),
            overrides: config.overrides.clone(),
        }
    }

    pub fn weight_for(&self, age: u32) -> f64 {
        if let Some(entry) = self.overrides.iter().find(|entry| entry.age == age) {
            return entry.weight;
        }
        self.brackets
            .iter()
            .find(|bracket| age <= bracket.max_age)
            .map(|bracket| bracket.weight)
            .unwrap_or(1.0)
    }

    pub fn mean_weight(&self, ages: &[u32]) -> f64 {
        if ages.is_empty() {
            return 0.0;
        }
        let sum: f64 = ages.iter().map(|age| self.weight_for(*age)).sum();
        sum / ages.len() as f64
    }
}

impl Default for AgeWeights {
    fn default() -> Self {
        Self::from_config(&WeightsConfig::default())
    }
}
