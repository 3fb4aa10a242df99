use std::collections::BTreeMap;

use crate::costing::error::{ReportError, Result};
use crate::costing::model::{LaborCost, MaterialCost, Report, Scope, ScopeSummary, TotalCostRow};
use crate::costing::schema::{
    self, COST_WITH_OVERHEAD, COST_WITH_TAX, LABOR_COST_WITH_OVERHEAD,
    MATERIAL_COST_WITH_OVERHEAD, TOTAL_COST,
};

/// Sums hours and costs per scope. Rows come back sorted by scope.
pub fn summarize_labor(costs: &[LaborCost]) -> Vec<ScopeSummary> {
    let mut groups: BTreeMap<&str, ScopeSummary> = BTreeMap::new();
    for cost in costs {
        let summary = groups
            .entry(cost.record.scope.as_str())
            .or_insert_with(|| ScopeSummary {
                hours: Some(0.0),
                ..ScopeSummary::new(cost.record.scope.clone())
            });
        if let Some(hours) = summary.hours.as_mut() {
            *hours += cost.record.hours;
        }
        summary.cost += cost.cost;
        summary.cost_with_tax += cost.cost_with_tax;
        summary.cost_with_overhead += cost.cost_with_overhead;
    }
    groups.into_values().collect()
}

/// Sums material costs per scope. Rows come back sorted by scope.
pub fn summarize_material(costs: &[MaterialCost]) -> Vec<ScopeSummary> {
    let mut groups: BTreeMap<&str, ScopeSummary> = BTreeMap::new();
    for cost in costs {
        let summary = groups
            .entry(cost.record.scope.as_str())
            .or_insert_with(|| ScopeSummary::new(cost.record.scope.clone()));
        summary.cost += cost.record.cost;
        summary.cost_with_tax += cost.cost_with_tax;
        summary.cost_with_overhead += cost.cost_with_overhead;
    }
    groups.into_values().collect()
}

/// Outer-joins the two summaries on scope. A scope missing from one side
/// contributes zero for that side.
pub fn merge_totals(labor: &[ScopeSummary], material: &[ScopeSummary]) -> Vec<TotalCostRow> {
    let mut merged: BTreeMap<&Scope, (f64, f64)> = BTreeMap::new();
    for summary in labor {
        merged.entry(&summary.scope).or_default().0 += summary.cost_with_overhead;
    }
    for summary in material {
        merged.entry(&summary.scope).or_default().1 += summary.cost_with_overhead;
    }

    merged
        .into_iter()
        .map(|(scope, (labor, material))| TotalCostRow {
            scope: scope.clone(),
            labor_cost_with_overhead: labor,
            material_cost_with_overhead: material,
            total_cost: labor + material,
        })
        .collect()
}

/// Rejects totals that overflowed; such values cannot be written to a sheet.
pub fn ensure_finite(report: &Report) -> Result<()> {
    for row in report.labor.iter().chain(&report.material) {
        check(&row.scope, schema::HOURS, row.hours.unwrap_or_default())?;
        check(&row.scope, schema::COST, row.cost)?;
        check(&row.scope, COST_WITH_TAX, row.cost_with_tax)?;
        check(&row.scope, COST_WITH_OVERHEAD, row.cost_with_overhead)?;
    }
    for row in &report.totals {
        check(&row.scope, LABOR_COST_WITH_OVERHEAD, row.labor_cost_with_overhead)?;
        check(&row.scope, MATERIAL_COST_WITH_OVERHEAD, row.material_cost_with_overhead)?;
        check(&row.scope, TOTAL_COST, row.total_cost)?;
    }
    Ok(())
}

fn check(scope: &str, column: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ReportError::NonFiniteTotal {
            scope: scope.to_string(),
            column: column.to_string(),
        })
    }
}
