//! Stats module - grouped aggregation

mod calculator;

pub use calculator::{AggregateRow, AggregateTable, Aggregation, StatsCalculator, StatsError};
