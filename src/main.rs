//! cellgrid - Reactive spreadsheet engine driven from the command line

mod cli;
mod config;
mod error;
mod logger;

use anyhow::{Context, Result};
use cellgrid_core::{Command, Spreadsheet};
use cli::{Action, Options};
use std::env;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_usage();
            std::process::exit(1);
        }
    };
    if options.help {
        cli::print_usage();
        return;
    }

    logger::init(options.verbose);

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(options: Options) -> Result<()> {
    let (config, warnings) = config::load_config(options.config_file.as_ref());
    for warning in warnings {
        log::warn!("{}", warning);
    }

    let rows = options.rows.unwrap_or(config.rows);
    let columns = options.columns.unwrap_or(config.columns);
    let mut sheet = Spreadsheet::new(rows, columns)?;

    if let Some(path) = &options.file_path {
        if path.exists() {
            sheet
                .load_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
        } else {
            sheet.file_path = Some(path.clone());
        }
    }

    for action in options.actions {
        apply(&mut sheet, action)?;
    }

    match &options.output_file {
        Some(path) => {
            sheet
                .save_file_as(path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            println!("Saved to {}", path.display());
        }
        None => print_cells(&sheet),
    }
    Ok(())
}

fn apply(sheet: &mut Spreadsheet, action: Action) -> Result<()> {
    match action {
        Action::SetText(cell, text) => {
            let command = Command::change_text(sheet, cell, &text)?;
            sheet.execute(command);
        }
        Action::SetBackground(cell, color) => {
            let command = Command::change_background(sheet, [cell], color)?;
            sheet.execute(command);
        }
        Action::Undo => {
            if !sheet.undo() {
                log::warn!("Nothing to undo");
            }
        }
        Action::Redo => {
            if !sheet.redo() {
                log::warn!("Nothing to redo");
            }
        }
    }
    Ok(())
}

/// Print non-empty cells as `NAME<TAB>TEXT<TAB>VALUE`, row by row.
fn print_cells(sheet: &Spreadsheet) {
    for cell in sheet.cells().filter(|cell| !cell.text().is_empty()) {
        println!("{}\t{}\t{}", cell.name(), cell.text(), cell.value());
    }
}
