use super::model::{Dataset, Measure, Record};

// ---------------------------------------------------------------------------
// View modes
// ---------------------------------------------------------------------------

/// Which presentation the central panel shows. Selection lives in the UI; the
/// projection itself is a pure function of `(dataset, mode)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    TimeSeries,
    Comparison,
    Tabular,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::TimeSeries, ViewMode::Comparison, ViewMode::Tabular];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::TimeSeries => "Time series",
            ViewMode::Comparison => "Comparison",
            ViewMode::Tabular => "Table",
        }
    }
}

// ---------------------------------------------------------------------------
// Projection shapes
// ---------------------------------------------------------------------------

/// One measure's `(year, value)` sequence, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSeries {
    pub measure: Measure,
    pub points: Vec<(i64, f64)>,
}

/// One `(year, measure, value)` triple of the long-form comparison view.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub year: i64,
    pub measure: Measure,
    pub value: f64,
}

/// A dataset reshaped for one view mode. No mode aggregates; KPIs come from
/// [`super::metrics`] independently.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Per-measure line series for a multi-line plot over time.
    TimeSeries(Vec<MeasureSeries>),
    /// Long relational form for a grouped-bar rendering.
    Comparison(Vec<ComparisonRow>),
    /// The full record set with numeric cells rounded to 2 decimals,
    /// column order preserved. Pagination is the presentation's concern.
    Tabular(Dataset),
}

/// Shape `dataset` for the given view mode.
pub fn project(dataset: &Dataset, mode: ViewMode) -> Projection {
    match mode {
        ViewMode::TimeSeries => Projection::TimeSeries(
            Measure::ALL
                .iter()
                .map(|&measure| MeasureSeries {
                    measure,
                    points: dataset
                        .records
                        .iter()
                        .map(|r| (r.year, measure.value(r)))
                        .collect(),
                })
                .collect(),
        ),
        ViewMode::Comparison => {
            // Measures outer, years inner: all Revenue rows, then Costs, then
            // Profit, matching a column-wise melt of the table.
            let mut rows = Vec::with_capacity(Measure::ALL.len() * dataset.len());
            for &measure in &Measure::ALL {
                for r in &dataset.records {
                    rows.push(ComparisonRow {
                        year: r.year,
                        measure,
                        value: measure.value(r),
                    });
                }
            }
            Projection::Comparison(rows)
        }
        ViewMode::Tabular => Projection::Tabular(Dataset {
            records: dataset.records.iter().map(round_record).collect(),
            columns: dataset.columns.clone(),
        }),
    }
}

/// Round every numeric field of a record to 2 decimals, independently.
fn round_record(r: &Record) -> Record {
    use super::model::round2;
    Record {
        year: r.year,
        revenue: round2(r.revenue),
        costs: round2(r.costs),
        profit: round2(r.profit),
        profit_margin_pct: round2(r.profit_margin_pct),
        extra: r
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.round2()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ingest::{demo_dataset, parse_csv};
    use crate::data::model::{CellValue, YEAR};

    #[test]
    fn time_series_covers_all_measures_in_dataset_order() {
        let ds = demo_dataset();
        let Projection::TimeSeries(series) = project(&ds, ViewMode::TimeSeries) else {
            panic!("expected a time-series projection");
        };

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].measure, Measure::Revenue);
        assert_eq!(series[0].points[0], (2016, 1000.0));
        assert_eq!(series[2].measure, Measure::Profit);
        assert_eq!(series[2].points[9], (2025, 1551.0 - 1044.0));

        let years: Vec<i64> = series[1].points.iter().map(|&(y, _)| y).collect();
        assert_eq!(years, (2016..=2025).collect::<Vec<i64>>());
    }

    #[test]
    fn comparison_is_long_form() {
        let ds = demo_dataset();
        let Projection::Comparison(rows) = project(&ds, ViewMode::Comparison) else {
            panic!("expected a comparison projection");
        };

        assert_eq!(rows.len(), 30);
        // Measures outer, years inner.
        assert_eq!(rows[0].measure, Measure::Revenue);
        assert_eq!(rows[0].year, 2016);
        assert_eq!(rows[10].measure, Measure::Costs);
        assert_eq!(rows[10].year, 2016);
        assert_eq!(rows[29].measure, Measure::Profit);
        assert_eq!(rows[29].year, 2025);
    }

    #[test]
    fn tabular_keeps_rows_and_columns_rounds_cells() {
        let csv = "Year,Revenue,Costs,Growth\n2020,100.567,80.444,0.123\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        let Projection::Tabular(table) = project(&ds, ViewMode::Tabular) else {
            panic!("expected a tabular projection");
        };

        assert_eq!(table.columns, ds.columns);
        assert_eq!(table.len(), ds.len());
        assert_eq!(table.records[0].revenue, 100.57);
        assert_eq!(table.records[0].costs, 80.44);
        assert_eq!(table.records[0].profit, 20.12);
        assert_eq!(
            table.records[0].extra.get("Growth"),
            Some(&CellValue::Float(0.12))
        );
    }

    #[test]
    fn empty_dataset_projects_to_empty_shapes() {
        let ds = Dataset::from_rows(vec![YEAR.to_string()], Vec::new());

        match project(&ds, ViewMode::TimeSeries) {
            Projection::TimeSeries(series) => {
                assert!(series.iter().all(|s| s.points.is_empty()))
            }
            _ => panic!("expected a time-series projection"),
        }
        match project(&ds, ViewMode::Comparison) {
            Projection::Comparison(rows) => assert!(rows.is_empty()),
            _ => panic!("expected a comparison projection"),
        }
    }
}
