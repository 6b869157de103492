use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use camp_map::config::Config;
use camp_map::logging;
use camp_map::pipeline::processing::parse_coordinate_detailed;
use camp_map::Pipeline;

#[derive(Parser)]
#[command(name = "camp_map")]
#[command(about = "Builds a static map of scouting camps from a TSV export")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to $CAMP_MAP_CONFIG or ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the HTML map page
    Generate {
        /// Tab-separated export to read
        #[arg(long)]
        input: Option<PathBuf>,
        /// HTML file to write
        #[arg(long)]
        output: Option<PathBuf>,
        /// SVG icon for permanent camps and the default marker
        #[arg(long)]
        tent_icon: Option<PathBuf>,
        /// SVG icon for colonies
        #[arg(long)]
        wolf_icon: Option<PathBuf>,
        /// Also write the normalized records as JSON
        #[arg(long)]
        json_output: Option<PathBuf>,
    },
    /// Show how GPS values are interpreted
    CheckGps {
        /// Values as they appear in the sheet
        #[arg(required = true)]
        values: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = logging::init_logging(config.logging.dir.as_deref());

    match cli.command {
        Commands::Generate {
            input,
            output,
            tent_icon,
            wolf_icon,
            json_output,
        } => {
            let paths = &mut config.paths;
            if let Some(input) = input {
                paths.input = input;
            }
            if let Some(output) = output {
                paths.output = output;
            }
            if let Some(tent_icon) = tent_icon {
                paths.tent_icon = tent_icon;
            }
            if let Some(wolf_icon) = wolf_icon {
                paths.wolf_icon = wolf_icon;
            }
            if json_output.is_some() {
                paths.json_output = json_output;
            }

            let result = Pipeline::run(&config).context("Map generation failed")?;
            info!("Source digest {}", result.source_digest);

            println!(
                "Generated {} with {} camps.",
                result.output_file.display(),
                result.generated
            );
            if let Some(json_file) = &result.json_file {
                println!("Wrote records to {}", json_file.display());
            }
            if !result.warnings.is_empty() {
                println!("\nWarnings:");
                for warning in &result.warnings {
                    println!("  - {}", warning);
                }
            }
        }
        Commands::CheckGps { values } => {
            for value in &values {
                match parse_coordinate_detailed(value) {
                    Some((format, coordinate)) => println!(
                        "{:?} -> {}, {} ({})",
                        value,
                        coordinate.latitude,
                        coordinate.longitude,
                        format.as_str()
                    ),
                    None => println!("{:?} -> not recognized", value),
                }
            }
        }
    }

    Ok(())
}
