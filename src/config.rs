//! Configuration Module
//! Immutable dashboard configuration (palette, category orders, selectable years)
//! and process settings read from the environment.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::env;
use std::ops::RangeInclusive;

/// Public dataset used when no data source is configured.
pub const DEFAULT_DATA_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";

pub const FIRST_YEAR: i64 = 1980;
pub const LAST_YEAR: i64 = 2023;
pub const DEFAULT_YEAR: i64 = 2020;

/// An sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    /// Single-series line color.
    pub const SERIES: Rgb = Rgb(0x63, 0x6E, 0xFA);

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Fixed vehicle type → color mapping with a fallback for unknown types.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePalette {
    colors: HashMap<String, Rgb>,
    fallback: Rgb,
}

impl Default for VehiclePalette {
    fn default() -> Self {
        Self::new(
            [
                ("Supperminicar", Rgb(0x00, 0x6B, 0xA4)),
                ("Mediumfamilycar", Rgb(0xFF, 0x80, 0x0E)),
                ("Smallfamiliycar", Rgb(0xAB, 0xAB, 0xAB)),
                ("Sports", Rgb(0x59, 0x59, 0x59)),
                ("Executivecar", Rgb(0x5F, 0x9E, 0xD1)),
            ],
            Rgb::BLACK,
        )
    }
}

impl VehiclePalette {
    pub fn new<I, S>(colors: I, fallback: Rgb) -> Self
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(|(k, c)| (k.into(), c)).collect(),
            fallback,
        }
    }

    /// Color for a vehicle type, or the fallback when the type is not mapped.
    pub fn color_for(&self, vehicle_type: &str) -> Rgb {
        self.colors
            .get(vehicle_type)
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// A fixed display ordering for categorical labels.
///
/// Labels that are not part of the ordering rank after every listed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrder {
    labels: Vec<String>,
}

impl CategoryOrder {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn months() -> Self {
        Self::new([
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ])
    }

    pub fn vehicle_types() -> Self {
        Self::new([
            "Mediumfamilycar",
            "Smallfamiliycar",
            "Supperminicar",
            "Sports",
            "Executivecar",
        ])
    }

    pub fn rank(&self, label: &str) -> usize {
        self.labels
            .iter()
            .position(|l| l == label)
            .unwrap_or(self.labels.len())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Everything the report builder needs besides the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub title: String,
    pub heading: String,
    pub palette: VehiclePalette,
    pub month_order: CategoryOrder,
    pub vehicle_type_order: CategoryOrder,
    pub years: RangeInclusive<i64>,
    pub default_year: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Automobile Statistics Dashboard".to_string(),
            heading: "Automobile Sales Dashboard".to_string(),
            palette: VehiclePalette::default(),
            month_order: CategoryOrder::months(),
            vehicle_type_order: CategoryOrder::vehicle_types(),
            years: FIRST_YEAR..=LAST_YEAR,
            default_year: DEFAULT_YEAR,
        }
    }
}

impl DashboardConfig {
    pub fn is_selectable_year(&self, year: i64) -> bool {
        self.years.contains(&year)
    }

    pub fn selectable_years(&self) -> impl Iterator<Item = i64> {
        self.years.clone()
    }
}

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_source: String,
    pub bind_addr: String,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_source: env_string("AUTOSALES_DATA_SOURCE", defaults.data_source),
            bind_addr: env_string("AUTOSALES_BIND", defaults.bind_addr),
            log_json: env_bool("AUTOSALES_LOG_JSON", defaults.log_json),
        }
    }
}

fn env_string(name: &str, default: String) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_falls_back_for_unknown_vehicle_type() {
        let palette = VehiclePalette::default();
        assert_eq!(palette.color_for("Sports"), Rgb(0x59, 0x59, 0x59));
        assert_eq!(palette.color_for("Hovercraft"), Rgb::BLACK);
    }

    #[test]
    fn category_order_ranks_unknown_labels_last() {
        let order = CategoryOrder::vehicle_types();
        assert_eq!(order.rank("Mediumfamilycar"), 0);
        assert_eq!(order.rank("Executivecar"), 4);
        assert_eq!(order.rank("Truck"), 5);
    }

    #[test]
    fn month_order_is_calendar_order() {
        let order = CategoryOrder::months();
        assert_eq!(order.labels().len(), 12);
        assert!(order.rank("Jan") < order.rank("Feb"));
        assert!(order.rank("Nov") < order.rank("Dec"));
    }

    #[test]
    fn default_years_span_1980_to_2023() {
        let config = DashboardConfig::default();
        assert_eq!(config.selectable_years().count(), 44);
        assert!(config.is_selectable_year(1980));
        assert!(config.is_selectable_year(2023));
        assert!(!config.is_selectable_year(2024));
        assert_eq!(config.default_year, 2020);
    }

    #[test]
    fn rgb_serializes_as_hex() {
        let json = serde_json::to_string(&Rgb(0x00, 0x6B, 0xA4)).unwrap();
        assert_eq!(json, "\"#006BA4\"");
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
