//! Rendering layer: panel layout, charts, and the data table.
//!
//! Consumes the data layer's outputs (dataset, KPI summary, projections);
//! no data shaping happens here.

pub mod panels;
pub mod plot;
