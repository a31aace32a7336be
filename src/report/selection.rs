//! Report selection: the two report types and the user's dropdown state.

use super::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The report picked in the statistics dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportType {
    #[default]
    #[serde(rename = "Yearly Statistics")]
    Yearly,
    #[serde(rename = "Recession Period Statistics")]
    Recession,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Yearly, ReportType::Recession];

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Yearly => "Yearly Statistics",
            ReportType::Recession => "Recession Period Statistics",
        }
    }

    /// Whether the year dropdown applies to this report.
    pub fn uses_year(self) -> bool {
        matches!(self, ReportType::Yearly)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::ALL
            .into_iter()
            .find(|r| r.label() == s.trim())
            .ok_or_else(|| ReportError::UnknownReport(s.to_string()))
    }
}

/// Current dropdown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub report: ReportType,
    pub year: Option<i64>,
}

impl Selection {
    pub fn yearly(year: i64) -> Self {
        Self {
            report: ReportType::Yearly,
            year: Some(year),
        }
    }

    pub fn recession() -> Self {
        Self {
            report: ReportType::Recession,
            year: None,
        }
    }

    /// Build a selection from raw query values; blank values mean "not chosen".
    ///
    /// The year is only validated for reports that use it. Other reports keep
    /// a parseable year so the page can restore it, and drop anything else.
    pub fn from_raw(report: Option<&str>, year: Option<&str>) -> Result<Self, ReportError> {
        let report = match report.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse()?,
            None => ReportType::default(),
        };
        let year = match year.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(year) => Some(year),
                Err(_) if !report.uses_year() => None,
                Err(_) => return Err(ReportError::InvalidYear(raw.to_string())),
            },
            None => None,
        };
        Ok(Self { report, year })
    }
}
