//! Automobile Sales Dashboard
//!
//! Loads a historical automobile sales CSV once and serves yearly and
//! recession-period statistics as charts on a single web page.

pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod stats;
pub mod web;

pub use config::{DashboardConfig, ServerConfig};
pub use data::{DataLoader, DataSource, SalesRecord, SalesTable};
pub use report::{DashboardView, ReportBuilder, ReportType, Selection};
pub use web::{build_router, AppState};
