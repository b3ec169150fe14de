//! Command-line argument parsing.

use crate::error::CliError;
use cellgrid_core::{CellRef, Color};
use std::path::PathBuf;

/// One edit step, applied in command-line order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetText(CellRef, String),
    SetBackground(CellRef, Color),
    Undo,
    Redo,
}

#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub help: bool,
    pub verbose: bool,
    pub config_file: Option<PathBuf>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub file_path: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub actions: Vec<Action>,
}

pub fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Spreadsheet file to open (.xml)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>       Load settings from a TOML file");
    eprintln!("  --rows <N>                Number of rows (default: 50)");
    eprintln!("  --columns <N>             Number of columns, 1 to 26 (default: 26)");
    eprintln!("  -s, --set <CELL=TEXT>     Set a cell's text (can be repeated)");
    eprintln!("  -b, --bgcolor <CELL=HEX>  Set a cell's background, e.g. A1=FFFF0000 (can be repeated)");
    eprintln!("  --undo                    Undo the previous edit");
    eprintln!("  --redo                    Redo the last undone edit");
    eprintln!("  -o, --output <FILE>       Save the sheet as XML instead of printing it");
    eprintln!("  -v, --verbose             Log debug output to stderr");
    eprintln!("  -h, --help                Print help");
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => {
                options.help = true;
                return Ok(options);
            }
            "-v" | "--verbose" => options.verbose = true,
            "-c" | "--config" => {
                options.config_file = Some(PathBuf::from(value(args, &mut i)?));
            }
            "--rows" => options.rows = Some(number(arg, value(args, &mut i)?)?),
            "--columns" => options.columns = Some(number(arg, value(args, &mut i)?)?),
            "-s" | "--set" => {
                let (cell, text) = assignment(value(args, &mut i)?)?;
                options.actions.push(Action::SetText(cell, text.to_string()));
            }
            "-b" | "--bgcolor" => {
                let (cell, hex) = assignment(value(args, &mut i)?)?;
                let color = Color::from_hex(hex).ok_or_else(|| CliError::InvalidColor(hex.to_string()))?;
                options.actions.push(Action::SetBackground(cell, color));
            }
            "--undo" => options.actions.push(Action::Undo),
            "--redo" => options.actions.push(Action::Redo),
            "-o" | "--output" => {
                options.output_file = Some(PathBuf::from(value(args, &mut i)?));
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(CliError::UnknownOption(arg.to_string()));
            }
            _ => {
                if options.file_path.is_some() {
                    return Err(CliError::UnexpectedArgument(arg.to_string()));
                }
                options.file_path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Take the value following the option at `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(option.clone()))
}

fn number(option: &str, value: &str) -> Result<usize, CliError> {
    value.parse().map_err(|_| CliError::InvalidNumber {
        option: option.to_string(),
        value: value.to_string(),
    })
}

/// Split `CELL=VALUE` at the first `=`, so `A1==B1+1` sets a formula.
fn assignment(input: &str) -> Result<(CellRef, &str), CliError> {
    let (name, rest) = input
        .split_once('=')
        .ok_or_else(|| CliError::InvalidAssignment(input.to_string()))?;
    let name = name.trim();
    let cell = CellRef::from_str(name).ok_or_else(|| CliError::InvalidCell(name.to_string()))?;
    Ok((cell, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Options, CliError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn parses_actions_in_order() {
        let options = parse(&["-s", "A1=5", "--set", "B1==A1*2", "--undo", "-b", "A1=FFFF0000", "--redo"]).unwrap();
        assert_eq!(
            options.actions,
            vec![
                Action::SetText(CellRef::new(0, 0), "5".to_string()),
                Action::SetText(CellRef::new(0, 1), "=A1*2".to_string()),
                Action::Undo,
                Action::SetBackground(CellRef::new(0, 0), Color(0xFFFF0000)),
                Action::Redo,
            ]
        );
    }

    #[test]
    fn parses_paths_and_sizes() {
        let options = parse(&["sheet.xml", "-o", "out.xml", "--rows", "10", "--columns", "3", "-v"]).unwrap();
        assert_eq!(options.file_path, Some(PathBuf::from("sheet.xml")));
        assert_eq!(options.output_file, Some(PathBuf::from("out.xml")));
        assert_eq!(options.rows, Some(10));
        assert_eq!(options.columns, Some(3));
        assert!(options.verbose);
    }

    #[test]
    fn empty_text_is_allowed() {
        let options = parse(&["-s", "C2="]).unwrap();
        assert_eq!(options.actions, vec![Action::SetText(CellRef::new(1, 2), String::new())]);
    }

    #[test]
    fn help_stops_parsing() {
        assert!(parse(&["--help", "--bogus"]).unwrap().help);
    }

    #[test]
    fn reports_bad_arguments() {
        assert_eq!(parse(&["--set"]), Err(CliError::MissingValue("--set".to_string())));
        assert_eq!(parse(&["--bogus"]), Err(CliError::UnknownOption("--bogus".to_string())));
        assert_eq!(parse(&["a.xml", "b.xml"]), Err(CliError::UnexpectedArgument("b.xml".to_string())));
        assert_eq!(parse(&["-s", "A1"]), Err(CliError::InvalidAssignment("A1".to_string())));
        assert_eq!(parse(&["-s", "a1=2"]), Err(CliError::InvalidCell("a1".to_string())));
        assert_eq!(parse(&["-b", "A1=red"]), Err(CliError::InvalidColor("red".to_string())));
        assert!(matches!(parse(&["--rows", "ten"]), Err(CliError::InvalidNumber { .. })));
    }
}
