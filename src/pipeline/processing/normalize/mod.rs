use serde::Serialize;
use tracing::{debug, instrument};

use crate::constants::{is_rank_placeholder, requires_coordinates, CANCELLED_TRUE};
use crate::pipeline::ingestion::TsvTable;
use crate::pipeline::processing::columns::{CanonicalField, HeaderMap};
use crate::pipeline::processing::coordinates::parse_coordinate;
use crate::pipeline::processing::dates::iso_date;
use crate::types::{CampRecord, RawRecord};

/// Counters describing what happened to each input row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationStats {
    pub total_rows: usize,
    pub cancelled: usize,
    pub missing_coordinates: usize,
}

/// Everything the normalizer produces: the records, plus warnings for
/// primary-category rows that could not be placed on the map
#[derive(Debug, Clone, Default)]
pub struct NormalizationOutcome {
    pub records: Vec<CampRecord>,
    pub warnings: Vec<String>,
    pub stats: NormalizationStats,
}

/// Why a row did not become a record
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Record(Box<CampRecord>),
    Cancelled,
    NoCoordinates { warning: Option<String> },
}

/// Turns raw spreadsheet rows into camp records
pub struct CampNormalizer<'a> {
    headers: &'a HeaderMap,
}

impl<'a> CampNormalizer<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    /// Normalize every row, preserving input order
    #[instrument(skip_all, fields(rows = table.rows.len()))]
    pub fn normalize(&self, table: &TsvTable) -> NormalizationOutcome {
        let mut outcome = NormalizationOutcome::default();
        outcome.stats.total_rows = table.rows.len();

        for (index, row) in table.rows.iter().enumerate() {
            // Row 1 is the header in the sheet
            let sheet_row = index + 2;
            match self.normalize_row(row, sheet_row) {
                RowOutcome::Record(record) => outcome.records.push(*record),
                RowOutcome::Cancelled => {
                    debug!("Row {} is cancelled, skipping", sheet_row);
                    outcome.stats.cancelled += 1;
                }
                RowOutcome::NoCoordinates { warning } => {
                    debug!("Row {} has no usable coordinates, skipping", sheet_row);
                    outcome.stats.missing_coordinates += 1;
                    outcome.warnings.extend(warning);
                }
            }
        }

        outcome
    }

    /// Normalize a single row. `sheet_row` is only used in warning text.
    pub fn normalize_row(&self, row: &RawRecord, sheet_row: usize) -> RowOutcome {
        let field = |f: CanonicalField| self.headers.get(row, f);

        if field(CanonicalField::Cancelled) == CANCELLED_TRUE {
            return RowOutcome::Cancelled;
        }

        let category = field(CanonicalField::Category);
        let display_name = self.display_name(row);
        let gps = field(CanonicalField::Gps);

        let Some(coordinate) = parse_coordinate(gps) else {
            // An empty cell is not a parse failure
            let warning = (!gps.is_empty() && requires_coordinates(category)).then(|| {
                let label = if display_name.is_empty() {
                    "(no name)"
                } else {
                    display_name.as_str()
                };
                format!("Row {sheet_row}: {label} ({category}) has unrecognized GPS coordinates: '{gps}'")
            });
            return RowOutcome::NoCoordinates { warning };
        };

        let start_date = field(CanonicalField::StartDate);
        let end_date = field(CanonicalField::EndDate);

        RowOutcome::Record(Box::new(CampRecord {
            category: category.to_string(),
            display_name,
            coordinate,
            start_iso: iso_date(start_date),
            end_iso: iso_date(end_date),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            address: field(CanonicalField::Address).to_string(),
            email: field(CanonicalField::Email).to_string(),
            team_names: self.team_names(row),
        }))
    }

    /// "<nr> <instructor rank> <first> <last> <scout rank>", skipping empty
    /// parts and placeholder ranks
    pub fn display_name(&self, row: &RawRecord) -> String {
        let rank = |f: CanonicalField| {
            let value = self.headers.get(row, f);
            if is_rank_placeholder(value) {
                ""
            } else {
                value
            }
        };

        [
            self.headers.get(row, CanonicalField::Number),
            rank(CanonicalField::InstructorRank),
            self.headers.get(row, CanonicalField::FirstName),
            self.headers.get(row, CanonicalField::LastName),
            rank(CanonicalField::ScoutRank),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Non-empty team names in slot order
    pub fn team_names(&self, row: &RawRecord) -> Vec<String> {
        CanonicalField::team_slots()
            .map(|slot| self.headers.get(row, slot))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}
