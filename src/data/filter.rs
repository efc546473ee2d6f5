use super::model::Dataset;

// ---------------------------------------------------------------------------
// Year-range filter
// ---------------------------------------------------------------------------

/// Restrict a dataset to records with `min_year <= year <= max_year`.
///
/// Returns a new dataset; the source is untouched and row order is preserved.
/// An inverted range (`min_year > max_year`) degenerates to an empty dataset
/// rather than an error.
pub fn filter_years(dataset: &Dataset, min_year: i64, max_year: i64) -> Dataset {
    Dataset {
        records: dataset
            .records
            .iter()
            .filter(|r| r.year >= min_year && r.year <= max_year)
            .cloned()
            .collect(),
        columns: dataset.columns.clone(),
    }
}
