use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    ClosedForm,
    PointEstimate,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::ClosedForm => "closed-form",
            Strategy::PointEstimate => "point-estimate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incomes {
    pub father: f64,
    pub mother: f64,
}

impl Incomes {
    pub fn new(father: f64, mother: f64) -> Self {
        Self { father, mother }
    }

    pub fn total(&self) -> f64 {
        self.father + self.mother
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChildShare {
    pub age: u32,
    pub weight: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Basis {
    ClosedForm {
        low_rate: f64,
        high_rate: f64,
        low_floor: f64,
        high_floor: f64,
        diminishing_factor: f64,
    },
    PointEstimate {
        point: f64,
        band_low: f64,
        band_high: f64,
        clamped: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceResult {
    pub strategy: Strategy,
    pub min_amount: f64,
    pub max_amount: f64,
    pub total_income: f64,
    pub basis: Basis,
    pub children: Vec<ChildShare>,
    pub excluded_ages: Vec<u32>,
}

impl MaintenanceResult {
    pub fn has_exclusions(&self) -> bool {
        !self.excluded_ages.is_empty()
    }
}

pub fn round_cents(value: f64) -> f64 {
    let cents = value * 100.0;
    if !cents.is_finite() {
        // already far past cent precision
        return value;
    }
    cents.round() / 100.0
}
