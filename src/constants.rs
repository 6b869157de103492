/// Column labels as they appear in the spreadsheet export header row.
/// Matching happens after trimming surrounding whitespace.
pub const COL_NUMBER: &str = "Nr";
pub const COL_CATEGORY: &str = "Forma wyjazdu (znormalizowana)";
pub const COL_GPS: &str = "Współrzędne GPS";
pub const COL_CANCELLED: &str = "Odwołany?";
pub const COL_INSTRUCTOR_RANK: &str = "Stopień instruktorski komendanta/komendantki";
pub const COL_FIRST_NAME: &str = "Imię komendanta/komendantki";
pub const COL_LAST_NAME: &str = "Nazwisko komendanta/komendantki";
pub const COL_SCOUT_RANK: &str = "Stopień harcerski komendanta/komendantki";
pub const COL_ADDRESS: &str = "Adres lub trasa wyjazdu";
pub const COL_EMAIL: &str = "Adres mailowy w domenie @zhr.pl";
pub const COL_START_DATE: &str = "Data rozpoczęcia wyjazdu";
pub const COL_END_DATE: &str = "Data zakończenia wyjazdu";

/// Team columns are numbered "Nazwa drużyny 1" .. "Nazwa drużyny 8"
pub const COL_TEAM_PREFIX: &str = "Nazwa drużyny ";
pub const TEAM_SLOTS: u8 = 8;

/// Value of the cancellation column that marks a row as cancelled
pub const CANCELLED_TRUE: &str = "TRUE";

/// Rank values that mean "no rank" and are left out of display names
pub const RANK_PLACEHOLDERS: &[&str] = &["brak", "-"];

// Camp categories
pub const CATEGORY_CAMP: &str = "obóz stały";
pub const CATEGORY_COLONY: &str = "kolonia";

/// Categories whose rows are expected to always carry coordinates.
/// A row in one of these that cannot be placed on the map produces a warning.
pub const CATEGORIES_REQUIRING_GPS: &[&str] = &[CATEGORY_CAMP, CATEGORY_COLONY];

pub fn requires_coordinates(category: &str) -> bool {
    CATEGORIES_REQUIRING_GPS.contains(&category)
}

pub fn is_rank_placeholder(rank: &str) -> bool {
    RANK_PLACEHOLDERS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(rank))
}
