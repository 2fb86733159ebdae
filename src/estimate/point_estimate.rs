use crate::estimate::regression::{Features, RegressionModel};
use crate::estimate::weights::AgeWeights;
use crate::estimate::Computed;
use crate::types::config::{ClampMode, PointEstimateConfig};
use crate::types::estimate::{round_cents, Basis, ChildShare, Incomes};
use tracing::{debug, warn};

pub fn compute(
    incomes: Incomes,
    ages: &[u32],
    weights: &AgeWeights,
    model: &RegressionModel,
    config: &PointEstimateConfig,
) -> Computed {
    let total_income = incomes.total();
    let child_weights: Vec<f64> = ages.iter().map(|&age| weights.weight_for(age)).collect();
    let weight_sum: f64 = child_weights.iter().sum();

    let features = Features {
        father_income: incomes.father,
        mother_income: incomes.mother,
        child_count: ages.len() as f64,
        mean_weight: weights.mean_weight(ages),
    };
    let raw = model.predict(&features);
    let (band_low, band_high) = band(total_income, config);
    let point = if raw.is_nan() {
        band_low
    } else {
        raw.clamp(band_low, band_high)
    };
    let clamped = point != raw;
    if clamped {
        warn!(raw, point, band_low, band_high, "point estimate clamped into band");
    }
    debug!(?features, raw, point, "point estimate evaluated");

    let min_total = point * config.low_spread;
    let max_total = point * config.high_spread;
    let children = ages
        .iter()
        .zip(&child_weights)
        .map(|(&age, &weight)| {
            let share = weight / weight_sum;
            ChildShare {
                age,
                weight,
                min: round_cents(min_total * share),
                max: round_cents(max_total * share),
            }
        })
        .collect();

    Computed {
        children,
        min_amount: round_cents(min_total),
        max_amount: round_cents(max_total),
        basis: Basis::PointEstimate {
            point: round_cents(point),
            band_low: round_cents(band_low),
            band_high: round_cents(band_high),
            clamped,
        },
    }
}

fn band(total_income: f64, config: &PointEstimateConfig) -> (f64, f64) {
    let high = match config.clamp {
        ClampMode::IncomeShare => total_income * config.cap_share,
        ClampMode::Fixed => config.ceiling,
    };
    (config.floor, high.max(config.floor))
}
