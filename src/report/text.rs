use super::money;
use crate::types::estimate::{Basis, MaintenanceResult};

pub fn to_text(result: &MaintenanceResult) -> String {
    let mut output = String::new();
    output.push_str("Maintenance Range:\n");
    output.push_str(&format!("Minimum Maintenance: {}\n", money(result.min_amount)));
    output.push_str(&format!("Maximum Maintenance: {}\n", money(result.max_amount)));
    output.push_str(&format!("Total Income: {}\n", money(result.total_income)));

    match &result.basis {
        Basis::ClosedForm {
            low_rate,
            high_rate,
            low_floor,
            high_floor,
            ..
        } => {
            output.push_str(&format!(
                "Percentage Range for Maintenance: {}% - {}%\n",
                percent(*low_rate),
                percent(*high_rate)
            ));
            output.push_str(&format!(
                "Base Maintenance per Child: {} - {}\n",
                money(*low_floor),
                money(*high_floor)
            ));
        }
        Basis::PointEstimate {
            point, clamped, ..
        } => {
            output.push_str(&format!(
                "Point Estimate: {}{}\n",
                money(*point),
                if *clamped { " (clamped)" } else { "" }
            ));
        }
    }

    for child in &result.children {
        output.push_str(&format!(
            "Child aged {}: {} - {}\n",
            child.age,
            money(child.min),
            money(child.max)
        ));
    }
    if result.has_exclusions() {
        let ages = result
            .excluded_ages
            .iter()
            .map(|age| age.to_string())
            .collect::<Vec<_>>();
        output.push_str(&format!("Excluded (over age limit): {}\n", ages.join(", ")));
    }

    output
}

fn percent(rate: f64) -> String {
    let value = rate * 100.0;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}
