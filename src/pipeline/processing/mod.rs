// Pipeline processing: header resolution, coordinate parsing, and normalization

pub mod columns;
pub mod coordinates;
pub mod dates;
pub mod normalize;

pub use columns::{CanonicalField, HeaderMap};
pub use coordinates::{parse_coordinate, parse_coordinate_detailed, CoordinateFormat};
pub use normalize::{CampNormalizer, NormalizationOutcome, NormalizationStats};
