use crate::estimate::weights::AgeWeights;
use crate::estimate::Computed;
use crate::types::config::ClosedFormConfig;
use crate::types::estimate::{round_cents, Basis, ChildShare};
use tracing::debug;

/// `ages` must be non-empty and already filtered for eligibility.
pub fn compute(
    total_income: f64,
    ages: &[u32],
    weights: &AgeWeights,
    config: &ClosedFormConfig,
) -> Computed {
    let count = ages.len() as f64;
    let factor = diminishing_factor(config, ages.len());
    let low_pool = total_income * config.low_rate * factor;
    let high_pool = total_income * config.high_rate * factor;
    debug!(total_income, low_pool, high_pool, factor, "closed-form pools");

    let mut min_sum = 0.0;
    let mut max_sum = 0.0;
    let children = ages
        .iter()
        .map(|&age| {
            let weight = weights.weight_for(age);
            let low = (low_pool * weight / count).max(config.low_floor);
            let high = (high_pool * weight / count).max(config.high_floor);
            min_sum += low;
            max_sum += high;
            ChildShare {
                age,
                weight,
                min: round_cents(low),
                max: round_cents(high),
            }
        })
        .collect();

    Computed {
        children,
        min_amount: round_cents(min_sum),
        max_amount: round_cents(max_sum),
        basis: Basis::ClosedForm {
            low_rate: config.low_rate,
            high_rate: config.high_rate,
            low_floor: config.low_floor,
            high_floor: config.high_floor,
            diminishing_factor: factor,
        },
    }
}

fn diminishing_factor(config: &ClosedFormConfig, child_count: usize) -> f64 {
    if !config.diminishing_returns || child_count <= 1 {
        return 1.0;
    }
    config
        .diminishing_factor
        .powi(child_count.saturating_sub(1) as i32)
}
