use crate::color::MeasureColors;
use crate::data::filter::filter_years;
use crate::data::ingest::{self, IngestError};
use crate::data::metrics::{aggregate, KpiSummary};
use crate::data::model::Dataset;
use crate::data::project::ViewMode;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Slider bounds used when the dataset has no rows to derive a span from.
const FALLBACK_SPAN: (i64, i64) = (2016, 2025);

/// Initial year selection over the demo dataset.
const INITIAL_RANGE: (i64, i64) = (2018, 2025);

/// The full UI state, independent of rendering.
///
/// `dataset` is the one process-wide snapshot. Ingest replaces it wholesale;
/// nothing mutates it in place.
pub struct AppState {
    /// Current dataset snapshot (starts as the built-in demo).
    pub dataset: Dataset,

    /// Inclusive year selection `(min, max)`.
    pub year_range: (i64, i64),

    /// Active view mode (tab).
    pub mode: ViewMode,

    /// `dataset` restricted to `year_range` (cached, rebuilt on every change).
    pub filtered: Dataset,

    /// KPIs over `filtered`, rebuilt alongside it.
    pub kpis: KpiSummary,

    /// Colour per measure, shared by all charts.
    pub colors: MeasureColors,

    /// When set, ingest failures are surfaced instead of silently falling
    /// back to the demo dataset.
    pub strict_ingest: bool,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let dataset = ingest::demo_dataset();
        let filtered = filter_years(&dataset, INITIAL_RANGE.0, INITIAL_RANGE.1);
        let kpis = aggregate(&filtered);
        Self {
            dataset,
            year_range: INITIAL_RANGE,
            mode: ViewMode::default(),
            filtered,
            kpis,
            colors: MeasureColors::default(),
            strict_ingest: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Replace the current snapshot wholesale and reset the year selection to
    /// its full span.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.year_range = dataset.year_span().unwrap_or(FALLBACK_SPAN);
        self.dataset = dataset;
        self.status_message = None;
        self.refilter();
    }

    /// Bounds for the year sliders.
    pub fn year_bounds(&self) -> (i64, i64) {
        self.dataset.year_span().unwrap_or(FALLBACK_SPAN)
    }

    /// Apply a new year selection and rebuild the caches.
    pub fn set_year_range(&mut self, min_year: i64, max_year: i64) {
        self.year_range = (min_year, max_year);
        self.refilter();
    }

    /// Recompute the filtered snapshot and its KPIs.
    pub fn refilter(&mut self) {
        self.filtered = filter_years(&self.dataset, self.year_range.0, self.year_range.1);
        self.kpis = aggregate(&self.filtered);
    }

    /// Apply an ingest outcome under the current fallback policy: strict mode
    /// surfaces the error and keeps the current snapshot, otherwise a failed
    /// upload silently becomes the demo dataset (logged, not shown).
    pub fn apply_ingest(&mut self, result: Result<Dataset, IngestError>) {
        match result {
            Ok(dataset) => {
                log::info!("Loaded {} rows, columns {:?}", dataset.len(), dataset.columns);
                self.set_dataset(dataset);
            }
            Err(e) if self.strict_ingest => {
                log::error!("Ingest failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
            Err(e) => {
                log::warn!("Ingest failed ({e}), falling back to demo data");
                self.set_dataset(ingest::demo_dataset());
            }
        }
    }
}
