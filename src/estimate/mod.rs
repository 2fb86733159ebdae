pub mod closed_form;
pub mod point_estimate;
pub mod regression;
pub mod weights;

use crate::error::{MaintenanceError, Result};
use crate::types::config::MaintenanceConfig;
use crate::types::estimate::{Basis, ChildShare, Incomes, MaintenanceResult, Strategy};
use regression::RegressionModel;
use tracing::{info, warn};
use weights::AgeWeights;

#[derive(Debug, Clone)]
pub struct Computed {
    pub children: Vec<ChildShare>,
    pub min_amount: f64,
    pub max_amount: f64,
    pub basis: Basis,
}

/// Maps parental incomes and children's ages to a monthly maintenance range.
pub struct MaintenanceEstimator<'a> {
    config: &'a MaintenanceConfig,
    model: &'a RegressionModel,
    weights: AgeWeights,
}

impl<'a> MaintenanceEstimator<'a> {
    pub fn new(config: &'a MaintenanceConfig, model: &'a RegressionModel) -> Self {
        Self {
            config,
            model,
            weights: AgeWeights::from_config(&config.weights),
        }
    }

    pub fn estimate(
        &self,
        incomes: Incomes,
        children_ages: &[u32],
        strategy: Strategy,
    ) -> Result<MaintenanceResult> {
        validate_income("father", incomes.father)?;
        validate_income("mother", incomes.mother)?;
        if !incomes.total().is_finite() {
            return Err(MaintenanceError::InvalidInput(
                "combined income is too large to compute".to_string(),
            ));
        }

        let (eligible, excluded) = split_eligible(children_ages, self.config.eligibility.max_age);
        if !excluded.is_empty() {
            warn!(
                excluded = ?excluded,
                max_age = self.config.eligibility.max_age,
                "excluding children above the eligibility ceiling"
            );
        }
        if eligible.is_empty() {
            return Err(MaintenanceError::InvalidInput(format!(
                "no eligible children (ages must be at most {})",
                self.config.eligibility.max_age
            )));
        }

        let total_income = incomes.total();
        let computed = match strategy {
            Strategy::ClosedForm => closed_form::compute(
                total_income,
                &eligible,
                &self.weights,
                &self.config.closed_form,
            ),
            Strategy::PointEstimate => point_estimate::compute(
                incomes,
                &eligible,
                &self.weights,
                self.model,
                &self.config.point_estimate,
            ),
        };

        info!(
            strategy = strategy.label(),
            min = computed.min_amount,
            max = computed.max_amount,
            children = eligible.len(),
            "maintenance range estimated"
        );

        Ok(MaintenanceResult {
            strategy,
            min_amount: computed.min_amount,
            max_amount: computed.max_amount,
            total_income,
            basis: computed.basis,
            children: computed.children,
            excluded_ages: excluded,
        })
    }
}

fn validate_income(parent: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MaintenanceError::InvalidInput(format!(
            "{parent}'s income must be a finite amount"
        )));
    }
    if value < 0.0 {
        return Err(MaintenanceError::InvalidInput(format!(
            "{parent}'s income cannot be negative (got {value})"
        )));
    }
    Ok(())
}

fn split_eligible(ages: &[u32], max_age: u32) -> (Vec<u32>, Vec<u32>) {
    ages.iter().copied().partition(|&age| age <= max_age)
}
