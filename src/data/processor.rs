//! Data Processor Module
//! Row filters over the sales table (recession rows, rows of a single year).

use super::record::{columns, SalesTable};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Stateless row selection over a [`SalesTable`].
pub struct DataProcessor;

impl DataProcessor {
    /// Rows observed during a recession (`Recession == 1`).
    pub fn recession_rows(table: &SalesTable) -> Result<DataFrame, ProcessorError> {
        let filtered = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(columns::RECESSION).eq(lit(1i64)))
            .collect()?;
        Ok(filtered)
    }

    /// Rows of a single year. A year without data yields an empty frame.
    pub fn rows_for_year(table: &SalesTable, year: i64) -> Result<DataFrame, ProcessorError> {
        let filtered = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(columns::YEAR).eq(lit(year)))
            .collect()?;
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;

    fn table() -> SalesTable {
        SalesTable::from_records(&[
            SalesRecord::new(1980, "Jan", "Sports", 10.0, 1.0, true),
            SalesRecord::new(1980, "Feb", "Sports", 20.0, 2.0, false),
            SalesRecord::new(1981, "Jan", "Executivecar", 30.0, 3.0, true),
            SalesRecord::new(1982, "Mar", "Executivecar", 40.0, 4.0, false),
        ])
        .unwrap()
    }

    #[test]
    fn recession_rows_keeps_flagged_rows_only() {
        let rows = DataProcessor::recession_rows(&table()).unwrap();
        assert_eq!(rows.height(), 2);
        let flags: Vec<Option<i64>> = rows
            .column(columns::RECESSION)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(flags, vec![Some(1), Some(1)]);
    }

    #[test]
    fn rows_for_year_filters_by_year() {
        let rows = DataProcessor::rows_for_year(&table(), 1980).unwrap();
        assert_eq!(rows.height(), 2);
    }

    #[test]
    fn rows_for_missing_year_is_empty_not_error() {
        let rows = DataProcessor::rows_for_year(&table(), 1999).unwrap();
        assert_eq!(rows.height(), 0);
        assert_eq!(rows.width(), columns::ALL.len());
    }
}
