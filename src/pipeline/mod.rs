// Data pipeline: ingestion, processing, and rendering

pub mod ingestion;
pub mod processing;
pub mod render;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{CampMapError, Result};
use ingestion::{load_icon, read_records};
use processing::{CampNormalizer, HeaderMap};
use render::{render_html, render_json, MapIcons, MapPage};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub total_rows: usize,
    pub generated: usize,
    pub cancelled: usize,
    pub missing_coordinates: usize,
    pub warnings: Vec<String>,
    pub output_file: PathBuf,
    pub json_file: Option<PathBuf>,
    pub source_digest: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Read the export and icons, normalize, and write the page.
    /// All inputs are read before anything is written, so a missing
    /// file leaves no partial output behind.
    #[instrument(skip_all, fields(input = %config.paths.input.display()))]
    pub fn run(config: &Config) -> Result<PipelineResult> {
        let paths = &config.paths;

        // Step 1: Read inputs
        info!("Reading camp records");
        let table = read_records(&paths.input)?;
        let icons = MapIcons {
            tent: load_icon(&paths.tent_icon)?,
            wolf: load_icon(&paths.wolf_icon)?,
        };

        // Step 2: Normalize
        let headers = HeaderMap::resolve(&table.headers);
        let outcome = CampNormalizer::new(&headers).normalize(&table);
        info!(
            "Normalized {} of {} rows ({} cancelled, {} without coordinates)",
            outcome.records.len(),
            outcome.stats.total_rows,
            outcome.stats.cancelled,
            outcome.stats.missing_coordinates
        );
        if !outcome.warnings.is_empty() {
            warn!("{} camps could not be placed on the map", outcome.warnings.len());
        }

        // Step 3: Render and write
        let page = MapPage::from(&config.map);
        let html = render_html(&outcome.records, &icons, &page, &table.source_digest)?;
        write_output(&paths.output, &html)?;
        info!("Wrote {}", paths.output.display());

        let json_file = match &paths.json_output {
            Some(path) => {
                write_output(path, &render_json(&outcome.records)?)?;
                info!("Wrote {}", path.display());
                Some(path.clone())
            }
            None => None,
        };

        Ok(PipelineResult {
            total_rows: outcome.stats.total_rows,
            generated: outcome.records.len(),
            cancelled: outcome.stats.cancelled,
            missing_coordinates: outcome.stats.missing_coordinates,
            warnings: outcome.warnings,
            output_file: paths.output.clone(),
            json_file,
            source_digest: table.source_digest,
        })
    }
}

/// Write `contents` to `path`, creating parent directories as needed
fn write_output(path: &Path, contents: &str) -> Result<()> {
    let to_error = |source: std::io::Error| CampMapError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
    }
    fs::write(path, contents).map_err(to_error)
}
