use serde::{Deserialize, Serialize};

/// One input row: cell values in header column order
pub type RawRecord = Vec<String>;

/// A geographic position in signed decimal degrees (south/west negative)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self { latitude, longitude })
    }
}

/// A normalized, geocoded camp ready to be placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampRecord {
    pub category: String,
    pub display_name: String,
    pub coordinate: Coordinate,
    /// Start date as written in the sheet
    pub start_date: String,
    /// End date as written in the sheet
    pub end_date: String,
    /// ISO start date used by the date-range filter, when the sheet value parses
    pub start_iso: Option<String>,
    pub end_iso: Option<String>,
    pub address: String,
    pub email: String,
    pub team_names: Vec<String>,
}
