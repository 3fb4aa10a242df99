//! Plain data types flowing through the report pipeline.

/// Categorical grouping key (a job or work area). Compared exactly: values
/// differing only in case or whitespace are distinct scopes.
pub type Scope = String;

/// One row of the labor-hours input.
#[derive(Debug, Clone, PartialEq)]
pub struct LaborRecord {
    pub employee: String,
    /// Kept verbatim; dates take no part in the arithmetic.
    pub date: String,
    pub scope: Scope,
    pub hours: f64,
    pub rate: f64,
}

/// One row of the material-purchases input.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    pub date: String,
    pub item: String,
    pub scope: Scope,
    pub cost: f64,
}

/// A labor record with its derived cost columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LaborCost {
    pub record: LaborRecord,
    /// `rate * hours`.
    pub cost: f64,
    pub cost_with_tax: f64,
    pub cost_with_overhead: f64,
}

/// A material record with its derived cost columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCost {
    pub record: MaterialRecord,
    pub cost_with_tax: f64,
    pub cost_with_overhead: f64,
}

/// Per-scope sums of one source table. `hours` is only populated for labor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeSummary {
    pub scope: Scope,
    pub hours: Option<f64>,
    pub cost: f64,
    pub cost_with_tax: f64,
    pub cost_with_overhead: f64,
}

impl ScopeSummary {
    pub fn new(scope: impl Into<Scope>) -> Self {
        Self {
            scope: scope.into(),
            hours: None,
            cost: 0.0,
            cost_with_tax: 0.0,
            cost_with_overhead: 0.0,
        }
    }
}

/// Labor and material overhead-inclusive costs merged for one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalCostRow {
    pub scope: Scope,
    /// Zero when the scope has no labor records.
    pub labor_cost_with_overhead: f64,
    /// Zero when the scope has no material records.
    pub material_cost_with_overhead: f64,
    pub total_cost: f64,
}

/// The three tables making up a generated report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub labor: Vec<ScopeSummary>,
    pub material: Vec<ScopeSummary>,
    pub totals: Vec<TotalCostRow>,
}
