use std::collections::BTreeMap;
use std::fmt;

/// Canonical column names. Required input columns are matched case-exact.
pub const YEAR: &str = "Year";
pub const REVENUE: &str = "Revenue";
pub const COSTS: &str = "Costs";
pub const PROFIT: &str = "Profit";
pub const MARGIN: &str = "Profit_Margin_%";

/// Round to 2 decimal digits, the precision used for margins and table cells.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in a passthrough column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value for columns beyond the required three.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Round a numeric cell to 2 decimals; non-numeric cells pass through.
    pub fn round2(&self) -> CellValue {
        match self {
            CellValue::Float(v) => CellValue::Float(round2(*v)),
            other => other.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Measure – the three plottable measures of a record
// ---------------------------------------------------------------------------

/// The numeric measures charts draw: raw revenue and costs, derived profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Measure {
    Revenue,
    Costs,
    Profit,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Revenue, Measure::Costs, Measure::Profit];

    pub fn label(self) -> &'static str {
        match self {
            Measure::Revenue => REVENUE,
            Measure::Costs => COSTS,
            Measure::Profit => PROFIT,
        }
    }

    /// The record field this measure reads.
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Measure::Revenue => record.revenue,
            Measure::Costs => record.costs,
            Measure::Profit => record.profit,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one year's row
// ---------------------------------------------------------------------------

/// One financial row. The derived fields are computed at construction, so a
/// record never exists with them unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i64,
    pub revenue: f64,
    pub costs: f64,
    /// `revenue - costs`.
    pub profit: f64,
    /// `profit / revenue * 100`, rounded to 2 decimals; `0.0` when `revenue == 0`.
    pub profit_margin_pct: f64,
    /// Passthrough columns: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(year: i64, revenue: f64, costs: f64, extra: BTreeMap<String, CellValue>) -> Self {
        let profit = revenue - costs;
        let profit_margin_pct = if revenue == 0.0 {
            0.0
        } else {
            round2(profit / revenue * 100.0)
        };
        Record {
            year,
            revenue,
            costs,
            profit,
            profit_margin_pct,
            extra,
        }
    }

    /// Look up a cell by column name. Derived columns shadow passthrough
    /// columns of the same name.
    pub fn cell(&self, column: &str) -> CellValue {
        match column {
            YEAR => CellValue::Integer(self.year),
            REVENUE => CellValue::Float(self.revenue),
            COSTS => CellValue::Float(self.costs),
            PROFIT => CellValue::Float(self.profit),
            MARGIN => CellValue::Float(self.profit_margin_pct),
            other => self.extra.get(other).cloned().unwrap_or(CellValue::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – one coherent snapshot
// ---------------------------------------------------------------------------

/// An ordered collection of records (insertion order = input row order) plus
/// the full column list: input header order with the derived columns appended.
/// Immutable once built; filtering and projection produce new values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub columns: Vec<String>,
}

impl Dataset {
    /// Assemble a dataset from already-validated rows and the input's header
    /// order, appending the derived column names.
    pub fn from_rows(input_columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut columns = input_columns;
        for derived in [PROFIT, MARGIN] {
            if !columns.iter().any(|c| c == derived) {
                columns.push(derived.to_string());
            }
        }
        Dataset { records, columns }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum year present, or `None` for an empty dataset.
    pub fn year_span(&self) -> Option<(i64, i64)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}
