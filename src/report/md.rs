use super::money;
use crate::types::estimate::{Basis, MaintenanceResult};

pub fn to_markdown(result: &MaintenanceResult) -> String {
    let mut output = String::new();
    output.push_str("# Maintenance Estimate\n\n");
    output.push_str(&format!("Strategy: {}\n\n", result.strategy.label()));
    output.push_str("## Range\n\n");
    output.push_str(&format!(
        "- minimum: {}\n- maximum: {}\n- total income: {}\n\n",
        money(result.min_amount),
        money(result.max_amount),
        money(result.total_income)
    ));

    output.push_str("## Basis\n\n");
    match &result.basis {
        Basis::ClosedForm {
            low_rate,
            high_rate,
            low_floor,
            high_floor,
            diminishing_factor,
        } => {
            output.push_str(&format!(
                "- income share: {:.2}% - {:.2}%\n- per-child floor: {} - {}\n- diminishing factor: {:.4}\n\n",
                low_rate * 100.0,
                high_rate * 100.0,
                money(*low_floor),
                money(*high_floor),
                diminishing_factor
            ));
        }
        Basis::PointEstimate {
            point,
            band_low,
            band_high,
            clamped,
        } => {
            output.push_str(&format!(
                "- point estimate: {}\n- band: {} - {}\n- clamped: {}\n\n",
                money(*point),
                money(*band_low),
                money(*band_high),
                if *clamped { "yes" } else { "no" }
            ));
        }
    }

    output.push_str("## Children\n\n");
    output.push_str("| age | weight | minimum | maximum |\n");
    output.push_str("|---|---|---|---|\n");
    for child in &result.children {
        output.push_str(&format!(
            "| {} | {:.2} | {} | {} |\n",
            child.age,
            child.weight,
            money(child.min),
            money(child.max)
        ));
    }

    if result.has_exclusions() {
        output.push_str("\n## Excluded\n\n");
        for age in &result.excluded_ages {
            output.push_str(&format!("- age {age}: above eligibility ceiling\n"));
        }
    }

    output
}
