//! Interactive menu for the FIR map generator.
//!
//! Mirrors the subcommand surface for users who start the binary with no
//! arguments: pick a map kind, point at the CSV export, enter the district.

use dialoguer::{Input, Select};
use fir_map_cli_utils::MultiProgress;
use fir_map_map::MapKind;

use crate::{DEFAULT_INPUT, DEFAULT_OUT_DIR, MapOptions, render_district_map};

/// Runs the interactive map generation menu.
///
/// # Errors
///
/// Returns an error if user input, dataset loading, or rendering fails.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("FIR District Maps");
    println!();

    let choices = &["Density heatmap", "Scatter map with hotspot report"];

    let selection = Select::new()
        .with_prompt("Which map would you like to generate?")
        .items(choices)
        .default(0)
        .interact()?;

    let kind = match selection {
        0 => MapKind::Heatmap,
        1 => MapKind::Scatter,
        _ => unreachable!(),
    };

    let file: String = Input::new()
        .with_prompt("Path to the incident CSV")
        .default(DEFAULT_INPUT.to_string())
        .interact_text()?;

    let options = MapOptions {
        file: file.trim().into(),
        out_dir: DEFAULT_OUT_DIR.into(),
        no_open: false,
    };

    render_district_map(multi, kind, None, &options)
}
