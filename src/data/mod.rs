//! Data layer: the ingest → filter → aggregate/project pipeline.
//!
//! ```text
//!  .csv / .json upload (or built-in demo)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  ingest  │  parse + validate → Dataset (derived profit columns)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  inclusive year range → new Dataset
//!   └──────────┘
//!        │
//!        ├────────────► metrics  (KPI summary)
//!        │
//!        └────────────► project  (time-series / comparison / table shapes)
//! ```
//!
//! Every step is a pure function over immutable dataset values; the only
//! process-wide state is the current snapshot held by the app, replaced
//! wholesale on each upload.

pub mod export;
pub mod filter;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod project;
