// Pipeline ingestion: reading the spreadsheet export and icon assets

use base64::Engine as _;
use csv::{ByteRecord, ReaderBuilder, Trim};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::error::{CampMapError, Result};
use crate::types::RawRecord;

/// A tab-separated export loaded fully into memory
#[derive(Debug, Clone, Default)]
pub struct TsvTable {
    /// Header labels exactly as they appear in the file (untrimmed)
    pub headers: Vec<String>,
    /// Data rows, each padded to the header width
    pub rows: Vec<RawRecord>,
    /// SHA-256 of the raw file contents
    pub source_digest: String,
}

/// An SVG icon encoded for inline use in the generated page
#[derive(Debug, Clone, PartialEq)]
pub struct IconAsset {
    pub data_uri: String,
}

/// Read the TSV export at `path`. Any I/O failure is fatal.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_records(path: &Path) -> Result<TsvTable> {
    let bytes = fs::read(path).map_err(|source| CampMapError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_tsv(&bytes)?;
    info!(
        "Read {} rows with {} columns",
        table.rows.len(),
        table.headers.len()
    );
    Ok(table)
}

/// Parse TSV content from memory. A UTF-8 byte order mark is skipped,
/// blank lines are ignored and invalid UTF-8 is decoded lossily.
pub fn parse_tsv(bytes: &[u8]) -> Result<TsvTable> {
    let source_digest = source_digest(bytes);
    let content = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(content);

    let headers = decode_record(reader.byte_headers()?);
    let width = headers.len();

    let mut rows = Vec::new();
    for (index, result) in reader.byte_records().enumerate() {
        let mut row = decode_record(&result?);
        if row.iter().all(|cell| cell.trim().is_empty()) {
            debug!("Skipping blank row {}", index + 1);
            continue;
        }
        if row.len() < width {
            row.resize(width, String::new());
        }
        rows.push(row);
    }

    Ok(TsvTable {
        headers,
        rows,
        source_digest,
    })
}

/// Invalid UTF-8 is replaced rather than failing the whole file
fn decode_record(record: &ByteRecord) -> RawRecord {
    record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect()
}

/// Load an SVG file and encode it as a base64 data URI
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_icon(path: &Path) -> Result<IconAsset> {
    let bytes = fs::read(path).map_err(|source| CampMapError::Asset {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded icon ({} bytes)", bytes.len());
    Ok(IconAsset::from_svg(&bytes))
}

impl IconAsset {
    pub fn from_svg(bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data_uri: format!("data:image/svg+xml;base64,{}", encoded),
        }
    }
}

/// Hex-encoded SHA-256 of the raw input
pub fn source_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_pads_short_rows_and_skips_blank_lines() {
        let input = "Nr\tForma\tGPS\n12\tobóz stały\t53.5, 20.7\n\n\t\t\n13\tkolonia\n";
        let table = parse_tsv(input.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Nr", "Forma", "GPS"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2], "53.5, 20.7");
        assert_eq!(table.rows[1], vec!["13", "kolonia", ""]);
    }

    #[test]
    fn test_parse_tsv_strips_bom_and_keeps_header_whitespace() {
        let input = "\u{feff}Nr\t Odwołany? \n1\tTRUE\n";
        let table = parse_tsv(input.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Nr", " Odwołany? "]);
        assert_eq!(table.rows[0], vec!["1", "TRUE"]);
    }

    #[test]
    fn test_parse_tsv_handles_quoted_cells() {
        let input = "Nr\tGPS\n1\t\"53°44'07.0\"\"N 21°38'39.3\"\"E\"\n";
        let table = parse_tsv(input.as_bytes()).unwrap();

        assert_eq!(table.rows[0][1], "53°44'07.0\"N 21°38'39.3\"E");
    }

    #[test]
    fn test_parse_tsv_keeps_rows_with_invalid_utf8() {
        let table = parse_tsv(b"Nr\tGPS\n1\t53.5, 20.7\n2\t\xff\xfe\n").unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "53.5, 20.7"]);
        assert_eq!(table.rows[1][0], "2");
        assert_eq!(table.rows[1][1], "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_icon_data_uri() {
        let icon = IconAsset::from_svg(b"<svg/>");
        assert_eq!(icon.data_uri, "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_source_digest_is_stable() {
        let a = source_digest(b"Nr\n1\n");
        let b = source_digest(b"Nr\n1\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, source_digest(b"Nr\n2\n"));
    }

    #[test]
    fn test_missing_files_are_fatal() {
        let err = read_records(Path::new("/nonexistent/camps.tsv")).unwrap_err();
        assert!(matches!(err, CampMapError::Input { .. }));

        let err = load_icon(Path::new("/nonexistent/tent.svg")).unwrap_err();
        assert!(matches!(err, CampMapError::Asset { .. }));
    }
}
