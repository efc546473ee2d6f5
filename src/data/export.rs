use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write a dataset as CSV: full column list (derived columns included), one
/// row per record, in order.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(&dataset.columns).context("writing CSV header")?;
    for record in &dataset.records {
        let row: Vec<String> = dataset
            .columns
            .iter()
            .map(|col| record.cell(col).to_string())
            .collect();
        w.write_record(&row).context("writing CSV row")?;
    }
    w.flush().context("flushing CSV")?;
    Ok(())
}

/// Export a dataset to a CSV file at `path`.
pub fn export_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating '{}'", path.display()))?;
    write_csv(dataset, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ingest::parse_csv;
    use crate::data::project::{project, Projection, ViewMode};

    #[test]
    fn exports_all_columns_in_order() {
        let ds = parse_csv(b"Year,Region,Revenue,Costs\n2020,EMEA,100,80\n").unwrap();
        let Projection::Tabular(table) = project(&ds, ViewMode::Tabular) else {
            panic!("expected a tabular projection");
        };

        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Year,Region,Revenue,Costs,Profit,Profit_Margin_%")
        );
        assert_eq!(lines.next(), Some("2020,EMEA,100.00,80.00,20.00,20.00"));
    }

    #[test]
    fn exported_csv_reimports() {
        let ds = parse_csv(b"Year,Revenue,Costs\n2020,100,80\n2021,0,10\n").unwrap();
        let mut buf = Vec::new();
        write_csv(&ds, &mut buf).unwrap();

        // Derived columns in the payload are ignored and recomputed.
        let reimported = parse_csv(&buf).unwrap();
        assert_eq!(reimported, ds);
    }
}
