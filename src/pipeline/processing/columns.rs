use std::collections::HashMap;
use tracing::{debug, warn};

use crate::constants::*;

/// Stable identifiers for the columns the normalizer reads,
/// decoupled from the localized header text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Number,
    Category,
    Gps,
    Cancelled,
    InstructorRank,
    FirstName,
    LastName,
    ScoutRank,
    Address,
    Email,
    StartDate,
    EndDate,
    /// Team name slot, 1-based
    Team(u8),
}

impl CanonicalField {
    /// Match an already trimmed header label
    pub fn from_label(label: &str) -> Option<Self> {
        let field = match label {
            COL_NUMBER => Self::Number,
            COL_CATEGORY => Self::Category,
            COL_GPS => Self::Gps,
            COL_CANCELLED => Self::Cancelled,
            COL_INSTRUCTOR_RANK => Self::InstructorRank,
            COL_FIRST_NAME => Self::FirstName,
            COL_LAST_NAME => Self::LastName,
            COL_SCOUT_RANK => Self::ScoutRank,
            COL_ADDRESS => Self::Address,
            COL_EMAIL => Self::Email,
            COL_START_DATE => Self::StartDate,
            COL_END_DATE => Self::EndDate,
            other => {
                let slot: u8 = other.strip_prefix(COL_TEAM_PREFIX)?.trim().parse().ok()?;
                if !(1..=TEAM_SLOTS).contains(&slot) {
                    return None;
                }
                Self::Team(slot)
            }
        };
        Some(field)
    }

    pub fn team_slots() -> impl Iterator<Item = Self> {
        (1..=TEAM_SLOTS).map(Self::Team)
    }
}

/// Column lookup table resolved once from the header row
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<CanonicalField, usize>,
}

impl HeaderMap {
    /// Resolve header labels to canonical fields. Labels are trimmed before
    /// matching; when two columns resolve to the same field the later one wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut columns = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let label = header.as_ref().trim();
            let Some(field) = CanonicalField::from_label(label) else {
                continue;
            };
            if let Some(previous) = columns.insert(field, index) {
                debug!(
                    "Column '{}' at index {} replaces earlier index {} for {:?}",
                    label, index, previous, field
                );
            }
        }

        let map = Self { columns };
        if !map.contains(CanonicalField::Gps) {
            warn!("Header row has no '{}' column; no rows can be placed on the map", COL_GPS);
        }
        map
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn index_of(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Trimmed cell value for `field`, or `""` when the column or cell is absent
    pub fn get<'a>(&self, row: &'a [String], field: CanonicalField) -> &'a str {
        self.index_of(field)
            .and_then(|index| row.get(index))
            .map(|value| value.trim())
            .unwrap_or("")
    }
}
