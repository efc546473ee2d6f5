use super::model::{round2, Dataset};

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Aggregate KPIs over one dataset. Never persisted; recomputed on every
/// filter change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Revenue-weighted: `total_profit / total_revenue * 100`, rounded to
    /// 2 decimals. NOT the mean of per-row margins. `0.0` when total revenue
    /// is zero (including the empty dataset).
    pub average_margin_pct: f64,
}

/// Compute summary KPIs over all records of `dataset`.
pub fn aggregate(dataset: &Dataset) -> KpiSummary {
    let total_revenue: f64 = dataset.records.iter().map(|r| r.revenue).sum();
    let total_profit: f64 = dataset.records.iter().map(|r| r.profit).sum();
    let average_margin_pct = if total_revenue == 0.0 {
        0.0
    } else {
        round2(total_profit / total_revenue * 100.0)
    };

    KpiSummary {
        total_revenue,
        total_profit,
        average_margin_pct,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::filter::filter_years;
    use crate::data::ingest::demo_dataset;
    use crate::data::model::{Record, YEAR};

    fn dataset_of(rows: &[(i64, f64, f64)]) -> Dataset {
        let records = rows
            .iter()
            .map(|&(year, revenue, costs)| Record::new(year, revenue, costs, BTreeMap::new()))
            .collect();
        Dataset::from_rows(vec![YEAR.to_string()], records)
    }

    #[test]
    fn empty_dataset_aggregates_to_zeros() {
        let kpis = aggregate(&dataset_of(&[]));
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.total_profit, 0.0);
        assert_eq!(kpis.average_margin_pct, 0.0);
    }

    #[test]
    fn zero_total_revenue_does_not_divide() {
        let kpis = aggregate(&dataset_of(&[(2020, 0.0, 10.0), (2021, 0.0, 5.0)]));
        assert_eq!(kpis.total_profit, -15.0);
        assert_eq!(kpis.average_margin_pct, 0.0);
    }

    #[test]
    fn two_row_scenario() {
        let kpis = aggregate(&dataset_of(&[(2020, 100.0, 80.0), (2021, 0.0, 10.0)]));
        assert_eq!(kpis.total_revenue, 100.0);
        assert_eq!(kpis.total_profit, 10.0);
        assert_eq!(kpis.average_margin_pct, 10.0);
    }

    #[test]
    fn margin_is_revenue_weighted_not_mean_of_rows() {
        // Row margins are 10% and 100%; their mean would be 55%. The tiny
        // 1-unit revenue row must not drag the summary up.
        let ds = dataset_of(&[(2020, 100.0, 90.0), (2021, 1.0, 0.0)]);
        let kpis = aggregate(&ds);

        assert_eq!(kpis.average_margin_pct, round2(11.0 / 101.0 * 100.0));
        assert_eq!(kpis.average_margin_pct, 10.89);
        assert_ne!(kpis.average_margin_pct, 55.0);
    }

    #[test]
    fn demo_dataset_totals() {
        let kpis = aggregate(&demo_dataset());
        assert_eq!(kpis.total_revenue, 12577.0);
        assert_eq!(kpis.total_profit, 3407.0);
        assert_eq!(kpis.average_margin_pct, 27.09);
    }

    #[test]
    fn filtered_demo_totals_shrink() {
        let filtered = filter_years(&demo_dataset(), 2018, 2025);
        let kpis = aggregate(&filtered);

        assert_eq!(kpis.total_revenue, 10527.0);
        assert_eq!(kpis.total_profit, 2981.0);
        assert_eq!(kpis.average_margin_pct, 28.32);
    }
}
