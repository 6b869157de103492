use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::types::Coordinate;

/// Notation a coordinate string was recognized in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFormat {
    /// "53.5301, 20.7875" (decimal comma allowed: "53,5301, 20,7875")
    DecimalPair,
    /// "51.518794 N, 22.896442 E"
    CompassDecimal,
    /// 53°44'07.0"N 21°38'39.3"E
    Dms,
}

impl CoordinateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecimalPair => "decimal pair",
            Self::CompassDecimal => "compass decimal",
            Self::Dms => "degrees-minutes-seconds",
        }
    }
}

/// One recognizable coordinate notation
pub trait CoordinateMatcher: Send + Sync {
    fn format(&self) -> CoordinateFormat;

    /// Parse `input` (already trimmed), or `None` if it is not in this notation
    fn try_match(&self, input: &str) -> Option<Coordinate>;
}

const NUMBER: &str = r"\d+(?:[.,]\d+)?";

// Two signed numbers split on the first comma that follows a complete
// number; anything after the second number is ignored.
static DECIMAL_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^([+-]?{NUMBER})\s*,\s*([+-]?{NUMBER})")).expect("valid decimal pair regex")
});

static COMPASS_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({NUMBER})\s*°?\s*([NSns])\s*,?\s*({NUMBER})\s*°?\s*([EWew])"
    ))
    .expect("valid compass regex")
});

static DMS: Lazy<Regex> = Lazy::new(|| {
    let axis = |hemispheres: &str| {
        format!(r#"(\d+)\s*°\s*(\d+)\s*['′’]\s*({NUMBER})\s*(?:''|"|″|”)\s*([{hemispheres}])"#)
    };
    Regex::new(&format!(r"{}[\s,]*{}", axis("NSns"), axis("EWew"))).expect("valid DMS regex")
});

fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', ".").parse().ok()
}

fn is_negative_hemisphere(letter: &str) -> bool {
    matches!(letter, "S" | "s" | "W" | "w")
}

pub struct DecimalPairMatcher;

impl CoordinateMatcher for DecimalPairMatcher {
    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::DecimalPair
    }

    fn try_match(&self, input: &str) -> Option<Coordinate> {
        // "51,5 N 22,8 E" also splits into two numbers here ("51" and "5");
        // a hemisphere letter after the first number makes it compass notation.
        if COMPASS_DECIMAL.is_match(input) {
            return None;
        }
        let caps = DECIMAL_PAIR.captures(input)?;
        Coordinate::new(parse_number(&caps[1])?, parse_number(&caps[2])?)
    }
}

pub struct CompassDecimalMatcher;

impl CoordinateMatcher for CompassDecimalMatcher {
    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::CompassDecimal
    }

    fn try_match(&self, input: &str) -> Option<Coordinate> {
        let caps = COMPASS_DECIMAL.captures(input)?;
        let mut latitude = parse_number(&caps[1])?;
        let mut longitude = parse_number(&caps[3])?;
        if is_negative_hemisphere(&caps[2]) {
            latitude = -latitude;
        }
        if is_negative_hemisphere(&caps[4]) {
            longitude = -longitude;
        }
        Coordinate::new(latitude, longitude)
    }
}

pub struct DmsMatcher;

impl DmsMatcher {
    /// Read one axis from four consecutive capture groups starting at `first`
    fn axis(caps: &Captures<'_>, first: usize) -> Option<f64> {
        let degrees: f64 = caps[first].parse().ok()?;
        let minutes: f64 = caps[first + 1].parse().ok()?;
        let seconds = parse_number(&caps[first + 2])?;
        if minutes >= 60.0 || seconds >= 60.0 {
            return None;
        }
        Some(dms_to_decimal(
            degrees,
            minutes,
            seconds,
            is_negative_hemisphere(&caps[first + 3]),
        ))
    }
}

impl CoordinateMatcher for DmsMatcher {
    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Dms
    }

    fn try_match(&self, input: &str) -> Option<Coordinate> {
        let caps = DMS.captures(input)?;
        Coordinate::new(Self::axis(&caps, 1)?, Self::axis(&caps, 5)?)
    }
}

pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, negative: bool) -> f64 {
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    if negative {
        -value
    } else {
        value
    }
}

/// Ordered set of matchers; the first one that recognizes the input wins
pub struct CoordinateParser {
    matchers: Vec<Box<dyn CoordinateMatcher>>,
}

impl CoordinateParser {
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(DecimalPairMatcher),
                Box::new(CompassDecimalMatcher),
                Box::new(DmsMatcher),
            ],
        }
    }

    /// Parse and report which notation matched
    pub fn parse_detailed(&self, raw: &str) -> Option<(CoordinateFormat, Coordinate)> {
        let input = raw.trim();
        if input.is_empty() {
            return None;
        }
        self.matchers
            .iter()
            .find_map(|m| m.try_match(input).map(|c| (m.format(), c)))
    }

    pub fn parse(&self, raw: &str) -> Option<Coordinate> {
        self.parse_detailed(raw).map(|(_, coordinate)| coordinate)
    }
}

impl Default for CoordinateParser {
    fn default() -> Self {
        Self::new()
    }
}

static PARSER: Lazy<CoordinateParser> = Lazy::new(CoordinateParser::new);

/// Parse a GPS cell in any supported notation. Never fails loudly:
/// empty or unrecognized input yields `None`.
pub fn parse_coordinate(raw: &str) -> Option<Coordinate> {
    PARSER.parse(raw)
}

pub fn parse_coordinate_detailed(raw: &str) -> Option<(CoordinateFormat, Coordinate)> {
    PARSER.parse_detailed(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Option<Coordinate> {
        Some(Coordinate { latitude: lat, longitude: lng })
    }

    #[test]
    fn test_decimal_pair() {
        assert_eq!(parse_coordinate("53.5301, 20.7875"), coord(53.5301, 20.7875));
        assert_eq!(
            parse_coordinate("53.53010681604106,20.78754993842591"),
            coord(53.53010681604106, 20.78754993842591)
        );
        assert_eq!(parse_coordinate("-33.86, +151.2"), coord(-33.86, 151.2));
        assert_eq!(parse_coordinate("  52.1 , 21.0  "), coord(52.1, 21.0));
    }

    #[test]
    fn test_decimal_pair_with_decimal_commas() {
        assert_eq!(parse_coordinate("53,5301, 20,7875"), coord(53.5301, 20.7875));
        assert_eq!(parse_coordinate("53,5301,20,7875"), coord(53.5301, 20.7875));
        assert_eq!(parse_coordinate("53.5301, 20,7875"), coord(53.5301, 20.7875));
    }

    #[test]
    fn test_decimal_pair_ignores_trailing_text() {
        assert_eq!(
            parse_coordinate("53.5301, 20.7875 (polana nad jeziorem)"),
            coord(53.5301, 20.7875)
        );
        assert_eq!(parse_coordinate("53.5301, 20.7875, 14.0"), coord(53.5301, 20.7875));
        assert_eq!(parse_coordinate("53.5301, 20.7875 Nidzica"), coord(53.5301, 20.7875));
    }

    #[test]
    fn test_decimal_pair_followed_by_short_word() {
        assert_eq!(parse_coordinate("53.5301, 20.7875 w lesie"), coord(53.5301, 20.7875));
        assert_eq!(parse_coordinate("53.5301, 20.7875 N"), coord(53.5301, 20.7875));
        assert_eq!(parse_coordinate("53,5301, 20,7875 w lesie"), coord(53.5301, 20.7875));
        assert_eq!(
            parse_coordinate_detailed("53.5301, 20.7875 e").map(|(f, _)| f),
            Some(CoordinateFormat::DecimalPair)
        );
    }

    #[test]
    fn test_compass_decimal() {
        assert_eq!(
            parse_coordinate("51.518794 N, 22.896442 E"),
            coord(51.518794, 22.896442)
        );
        assert_eq!(
            parse_coordinate("51.518794 S, 22.896442 W"),
            coord(-51.518794, -22.896442)
        );
        assert_eq!(
            parse_coordinate("51.518794N 22.896442E"),
            coord(51.518794, 22.896442)
        );
        assert_eq!(
            parse_coordinate_detailed("51,5 N 22,8 e"),
            Some((CoordinateFormat::CompassDecimal, Coordinate { latitude: 51.5, longitude: 22.8 }))
        );
        assert_eq!(
            parse_coordinate("51,518794 S, 22,896442 W"),
            coord(-51.518794, -22.896442)
        );
    }

    #[test]
    fn test_dms() {
        let expected_lat = 53.0 + 44.0 / 60.0 + 7.0 / 3600.0;
        let expected_lng = 21.0 + 38.0 / 60.0 + 39.3 / 3600.0;
        assert_eq!(
            parse_coordinate("53°44'07.0\"N 21°38'39.3\"E"),
            coord(expected_lat, expected_lng)
        );
        assert_eq!(
            parse_coordinate("53°44'07.0\"S 21°38'39.3\"W"),
            coord(-expected_lat, -expected_lng)
        );
    }

    #[test]
    fn test_dms_typographic_marks() {
        let expected_lat = 50.0 + 3.0 / 60.0 + 12.5 / 3600.0;
        let expected_lng = 19.0 + 56.0 / 60.0 + 1.0 / 3600.0;
        assert_eq!(
            parse_coordinate("50°3′12,5″N, 19°56′1″E"),
            coord(expected_lat, expected_lng)
        );
        assert_eq!(
            parse_coordinate("50°3'12.5''N 19°56'1''E"),
            coord(expected_lat, expected_lng)
        );
    }

    #[test]
    fn test_dms_rejects_out_of_range_components() {
        assert_eq!(parse_coordinate("53°61'07.0\"N 21°38'39.3\"E"), None);
        assert_eq!(parse_coordinate("53°44'60.0\"N 21°38'39.3\"E"), None);
    }

    #[test]
    fn test_formats_reported() {
        assert_eq!(
            parse_coordinate_detailed("53.5, 20.7").map(|(f, _)| f),
            Some(CoordinateFormat::DecimalPair)
        );
        assert_eq!(
            parse_coordinate_detailed("53°44'07.0\"N 21°38'39.3\"E").map(|(f, _)| f),
            Some(CoordinateFormat::Dms)
        );
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("   "), None);
        assert_eq!(parse_coordinate("brak"), None);
        assert_eq!(parse_coordinate("Mazury, okolice Giżycka"), None);
        assert_eq!(parse_coordinate("53.5301"), None);
        assert_eq!(parse_coordinate("https://maps.app.goo.gl/xyz"), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(parse_coordinate("123.4, 20.0"), None);
        assert_eq!(parse_coordinate("53.4, 200.0"), None);
    }
}
