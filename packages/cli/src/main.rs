#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the FIR district map generator.
//!
//! Loads an FIR incident CSV export, selects one district, and renders an
//! interactive map of its incidents in the browser: either a density
//! heatmap or a scatter map with a hotspot report. Invoked with no
//! subcommand it drops into an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`fir_map_cli_utils::init_logger`]) to
//! route `log` output through `indicatif::MultiProgress` so that log lines
//! and progress bars never fight for the terminal.

mod interactive;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dialoguer::Input;
use fir_map_analytics::{
    DistrictQuery, centroid, district_counts, district_names, hotspot, select_district,
};
use fir_map_cli_utils::{IndicatifProgress, MultiProgress};
use fir_map_incident_models::IncidentRecord;
use fir_map_ingest::progress::ProgressCallback as _;
use fir_map_map::MapKind;

/// Input path used when `--file` is not given, matching the dataset
/// export's conventional name.
const DEFAULT_INPUT: &str = "output_file.csv";

/// Output directory used when `--out-dir` is not given.
const DEFAULT_OUT_DIR: &str = "maps";

#[derive(Parser)]
#[command(name = "fir_map", about = "District crime map generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a density heatmap of one district's incidents
    Heatmap {
        /// District name; prompted for interactively when omitted
        district: Option<String>,
        #[command(flatten)]
        options: MapOptions,
    },
    /// Render a scatter map of one district's incidents, then report the
    /// location with the most incidents and its dominant incident type
    Scatter {
        /// District name; prompted for interactively when omitted
        district: Option<String>,
        #[command(flatten)]
        options: MapOptions,
    },
    /// List the districts present in the dataset with incident counts
    Districts {
        /// Path to the incident CSV export
        #[arg(long, default_value = DEFAULT_INPUT)]
        file: PathBuf,
    },
}

/// Options shared by both map subcommands.
#[derive(Args)]
struct MapOptions {
    /// Path to the incident CSV export
    #[arg(long, default_value = DEFAULT_INPUT)]
    file: PathBuf,
    /// Directory the rendered HTML document is written to
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
    /// Write the document without opening it in the browser
    #[arg(long)]
    no_open: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = fir_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi);
    };

    match command {
        Commands::Heatmap { district, options } => {
            render_district_map(&multi, MapKind::Heatmap, district, &options)
        }
        Commands::Scatter { district, options } => {
            render_district_map(&multi, MapKind::Scatter, district, &options)
        }
        Commands::Districts { file } => list_districts(&multi, &file),
    }
}

/// Loads the dataset, selects the district, renders its map, and (for the
/// scatter variant) prints the hotspot report.
///
/// The district-not-found and no-data conditions print a message and
/// return normally; only loader and render failures are errors.
fn render_district_map(
    multi: &MultiProgress,
    kind: MapKind,
    district: Option<String>,
    options: &MapOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records(multi, &options.file)?;

    let district = match district {
        Some(name) => name.trim().to_owned(),
        None => prompt_district(kind)?,
    };

    let rows = match select_district(&records, &district) {
        DistrictQuery::NotFound => {
            println!("The district '{district}' is not found in the dataset.");
            let names = district_names(&records);
            if !names.is_empty() {
                println!("Available districts: {}", names.join(", "));
            }
            return Ok(());
        }
        DistrictQuery::NoData => {
            println!("No data available for district: {district}");
            return Ok(());
        }
        DistrictQuery::Found(rows) => rows,
    };

    // Found always carries at least one row, so the centroid exists.
    let Some(center) = centroid(&rows) else {
        println!("No data available for district: {district}");
        return Ok(());
    };

    let html = fir_map_map::render_map(&district, kind, &rows, center)?;
    let path = fir_map_map::write_map(&options.out_dir, &district, kind, &html)?;
    println!("{} saved to {}", kind.title_for(&district), path.display());

    if options.no_open {
        log::debug!("Skipping browser open (--no-open)");
    } else if let Err(e) = fir_map_map::open_map(&path) {
        log::warn!("Could not open {} in a browser: {e}", path.display());
    }

    if kind == MapKind::Scatter
        && let Some(spot) = hotspot(&rows)
    {
        println!();
        println!(
            "Location with the highest number of crimes in {district}: Latitude {}, Longitude {}",
            spot.latitude, spot.longitude
        );
        println!(
            "Crime type that is highest at this location: {} ({} of {} incidents)",
            spot.dominant_type, spot.dominant_type_count, spot.count
        );
    }

    Ok(())
}

/// Prints the sorted district inventory with incident counts.
fn list_districts(
    multi: &MultiProgress,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records(multi, file)?;
    let counts = district_counts(&records);

    if counts.is_empty() {
        println!("No districts with mappable incidents found.");
        return Ok(());
    }

    println!("{} districts:", counts.len());
    for (name, count) in counts {
        println!("  {name} ({count} incidents)");
    }

    Ok(())
}

/// Loads the incident CSV behind a records progress bar.
fn load_records(
    multi: &MultiProgress,
    file: &Path,
) -> Result<Vec<IncidentRecord>, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::records_bar(multi, "Loading incidents");

    let records = match fir_map_ingest::load_incidents(file, Some(Arc::clone(&progress))) {
        Ok(records) => records,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e.into());
        }
    };

    progress.finish(format!("Loaded {} incidents", records.len()));
    Ok(records)
}

/// Prompts for the district name, with wording matching the map variant.
fn prompt_district(kind: MapKind) -> Result<String, Box<dyn std::error::Error>> {
    let prompt = match kind {
        MapKind::Heatmap => "Enter the district name to generate the crime heatmap",
        MapKind::Scatter => "Enter the district name to generate the crime map",
    };

    let name: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(name.trim().to_owned())
}
