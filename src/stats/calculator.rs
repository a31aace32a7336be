//! Statistics Calculator Module
//! Grouped aggregation (mean / sum) of a measure keyed by a categorical column.

use crate::config::CategoryOrder;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// How a group's values are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Mean,
    Sum,
}

impl Aggregation {
    fn apply(self, expr: Expr) -> Expr {
        match self {
            Aggregation::Mean => expr.mean(),
            Aggregation::Sum => expr.sum(),
        }
    }
}

/// One group of an aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: String,
    pub value: f64,
}

/// Grouped summary of `value_column` keyed by `key_column`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub key_column: String,
    pub value_column: String,
    pub aggregation: Aggregation,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn value_of(&self, key: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.key == key).map(|r| r.value)
    }

    /// Stable reorder by a fixed category order; unlisted keys keep their
    /// relative order after the listed ones.
    pub fn reordered(mut self, order: &CategoryOrder) -> Self {
        self.rows.sort_by_key(|r| order.rank(&r.key));
        self
    }
}

/// Stateless aggregation helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Group `df` by `key`, combine `value` per group, sort ascending by key.
    ///
    /// Keys are rendered as strings (years become "2020") after sorting, so
    /// numeric keys keep numeric order. Groups whose aggregate is null are
    /// dropped, so an empty frame gives an empty table.
    pub fn group_aggregate(
        df: &DataFrame,
        key: &str,
        value: &str,
        aggregation: Aggregation,
    ) -> Result<AggregateTable, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(key)])
            .agg([aggregation.apply(col(value).cast(DataType::Float64))])
            .sort_by_exprs([col(key)], SortMultipleOptions::default());
        Self::collect_table(grouped, key, value, aggregation)
    }

    /// Like [`Self::group_aggregate`] but groups keep the order in which
    /// their key first appears in `df`.
    pub fn group_aggregate_stable(
        df: &DataFrame,
        key: &str,
        value: &str,
        aggregation: Aggregation,
    ) -> Result<AggregateTable, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by_stable([col(key)])
            .agg([aggregation.apply(col(value).cast(DataType::Float64))]);
        Self::collect_table(grouped, key, value, aggregation)
    }

    fn collect_table(
        grouped: LazyFrame,
        key: &str,
        value: &str,
        aggregation: Aggregation,
    ) -> Result<AggregateTable, StatsError> {
        let grouped = grouped
            .select([col(key).cast(DataType::String), col(value)])
            .collect()?;

        let keys = grouped.column(key)?.str()?;
        let values = grouped.column(value)?.f64()?;
        let rows = keys
            .into_iter()
            .zip(values.into_iter())
            .filter_map(|(k, v)| {
                Some(AggregateRow {
                    key: k?.to_string(),
                    value: v?,
                })
            })
            .collect();

        Ok(AggregateTable {
            key_column: key.to_string(),
            value_column: value.to_string(),
            aggregation,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df![
            "Year" => [1981i64, 1980, 1980, 1981, 1982],
            "Vehicle_Type" => ["Sports", "Sports", "Executivecar", "Sports", "Truck"],
            "Automobile_Sales" => [4.0, 1.0, 2.0, 6.0, 9.0],
        ]
        .unwrap()
    }

    #[test]
    fn mean_by_year_is_sorted_by_year() {
        let table =
            StatsCalculator::group_aggregate(&frame(), "Year", "Automobile_Sales", Aggregation::Mean)
                .unwrap();
        assert_eq!(table.keys(), vec!["1980", "1981", "1982"]);
        assert_eq!(table.values(), vec![1.5, 5.0, 9.0]);
        assert_eq!(table.aggregation, Aggregation::Mean);
    }

    #[test]
    fn sum_by_category_matches_raw_rows() {
        let table = StatsCalculator::group_aggregate(
            &frame(),
            "Vehicle_Type",
            "Automobile_Sales",
            Aggregation::Sum,
        )
        .unwrap();
        assert_eq!(table.value_of("Sports"), Some(11.0));
        assert_eq!(table.value_of("Executivecar"), Some(2.0));
        assert_eq!(table.value_of("Truck"), Some(9.0));
    }

    #[test]
    fn empty_frame_gives_empty_table() {
        let empty = frame().head(Some(0));
        let table =
            StatsCalculator::group_aggregate(&empty, "Year", "Automobile_Sales", Aggregation::Sum)
                .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.key_column, "Year");
    }

    #[test]
    fn stable_grouping_keeps_first_appearance_order() {
        let table = StatsCalculator::group_aggregate_stable(
            &frame(),
            "Year",
            "Automobile_Sales",
            Aggregation::Sum,
        )
        .unwrap();
        assert_eq!(table.keys(), vec!["1981", "1980", "1982"]);
        assert_eq!(table.values(), vec![10.0, 3.0, 9.0]);
    }

    #[test]
    fn unknown_categories_keep_data_order_after_known_ones() {
        let df = df![
            "Vehicle_Type" => ["Zeta", "Alpha", "Sports"],
            "Automobile_Sales" => [1.0, 2.0, 3.0],
        ]
        .unwrap();
        let table = StatsCalculator::group_aggregate_stable(
            &df,
            "Vehicle_Type",
            "Automobile_Sales",
            Aggregation::Sum,
        )
        .unwrap()
        .reordered(&CategoryOrder::vehicle_types());
        assert_eq!(table.keys(), vec!["Sports", "Zeta", "Alpha"]);
    }

    #[test]
    fn reordered_follows_category_order_with_unknown_last() {
        let table = StatsCalculator::group_aggregate_stable(
            &frame(),
            "Vehicle_Type",
            "Automobile_Sales",
            Aggregation::Sum,
        )
        .unwrap()
        .reordered(&CategoryOrder::vehicle_types());
        assert_eq!(table.keys(), vec!["Sports", "Executivecar", "Truck"]);
    }
}
