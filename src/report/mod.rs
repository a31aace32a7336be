//! Report module - report selection and chart-ready aggregation

mod builder;
mod selection;

use crate::data::ProcessorError;
use crate::stats::StatsError;
use thiserror::Error;

pub use builder::{ChartKind, ChartSpec, DashboardView, ReportBuilder};
pub use selection::{ReportType, Selection};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown report type '{0}'")]
    UnknownReport(String),
    #[error("Year '{0}' is not a number")]
    InvalidYear(String),
    #[error("Year {year} is outside the selectable range {first}-{last}")]
    YearOutOfRange { year: i64, first: i64, last: i64 },
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl ReportError {
    /// True when the error comes from the user's selection rather than the computation.
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            ReportError::UnknownReport(_)
                | ReportError::InvalidYear(_)
                | ReportError::YearOutOfRange { .. }
        )
    }
}
