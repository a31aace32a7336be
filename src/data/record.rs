//! Sales Table Module
//! The immutable in-memory dataset and its typed row representation.

use polars::prelude::*;

/// Column names of the sales dataset.
pub mod columns {
    pub const YEAR: &str = "Year";
    pub const MONTH: &str = "Month";
    pub const VEHICLE_TYPE: &str = "Vehicle_Type";
    pub const AUTOMOBILE_SALES: &str = "Automobile_Sales";
    pub const ADVERTISING_EXPENDITURE: &str = "Advertising_Expenditure";
    pub const RECESSION: &str = "Recession";

    pub const ALL: [&str; 6] = [
        YEAR,
        MONTH,
        VEHICLE_TYPE,
        AUTOMOBILE_SALES,
        ADVERTISING_EXPENDITURE,
        RECESSION,
    ];
}

/// One (Year, Month, Vehicle_Type) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub year: i64,
    pub month: String,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    pub recession: bool,
}

impl SalesRecord {
    pub fn new(
        year: i64,
        month: &str,
        vehicle_type: &str,
        automobile_sales: f64,
        advertising_expenditure: f64,
        recession: bool,
    ) -> Self {
        Self {
            year,
            month: month.to_string(),
            vehicle_type: vehicle_type.to_string(),
            automobile_sales,
            advertising_expenditure,
            recession,
        }
    }
}

/// Read-only sales dataset with normalised column types.
///
/// Year and Recession are Int64, Month and Vehicle_Type are String, the two
/// measures are Float64. No other columns are kept.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
}

impl SalesTable {
    /// Wrap a frame that already has the normalised schema.
    pub(crate) fn from_normalized(df: DataFrame) -> Self {
        Self { df }
    }

    /// Build a table from typed records.
    pub fn from_records(records: &[SalesRecord]) -> PolarsResult<Self> {
        let df = DataFrame::new(vec![
            Column::new(
                columns::YEAR.into(),
                records.iter().map(|r| r.year).collect::<Vec<i64>>(),
            ),
            Column::new(
                columns::MONTH.into(),
                records.iter().map(|r| r.month.clone()).collect::<Vec<String>>(),
            ),
            Column::new(
                columns::VEHICLE_TYPE.into(),
                records
                    .iter()
                    .map(|r| r.vehicle_type.clone())
                    .collect::<Vec<String>>(),
            ),
            Column::new(
                columns::AUTOMOBILE_SALES.into(),
                records
                    .iter()
                    .map(|r| r.automobile_sales)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                columns::ADVERTISING_EXPENDITURE.into(),
                records
                    .iter()
                    .map(|r| r.advertising_expenditure)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                columns::RECESSION.into(),
                records
                    .iter()
                    .map(|r| i64::from(r.recession))
                    .collect::<Vec<i64>>(),
            ),
        ])?;
        Ok(Self { df })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Distinct years present in the dataset, ascending.
    pub fn years(&self) -> Vec<i64> {
        let Ok(years) = self.df.column(columns::YEAR).and_then(|c| c.i64()) else {
            return Vec::new();
        };
        let mut distinct: Vec<i64> = years.into_iter().flatten().collect();
        distinct.sort_unstable();
        distinct.dedup();
        distinct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_records_builds_normalised_schema() {
        let table = SalesTable::from_records(&[
            SalesRecord::new(1981, "Jan", "Sports", 10.0, 100.0, true),
            SalesRecord::new(1980, "Feb", "Sports", 12.0, 120.0, false),
        ])
        .unwrap();

        let df = table.dataframe();
        assert_eq!(table.row_count(), 2);
        assert_eq!(df.get_column_names().len(), columns::ALL.len());
        assert_eq!(df.column(columns::YEAR).unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column(columns::MONTH).unwrap().dtype(), &DataType::String);
        assert_eq!(
            df.column(columns::RECESSION).unwrap().dtype(),
            &DataType::Int64
        );
        assert_eq!(table.years(), vec![1980, 1981]);
    }

    #[test]
    fn empty_table_has_no_years() {
        let table = SalesTable::from_records(&[]).unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.years().is_empty());
    }
}
