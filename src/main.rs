//! Sheetkeeper - row bookkeeping for tracker sheets

mod config;
mod error;
mod logging;

use anyhow::Context;
use chrono::{DateTime, Utc};
use error::CliError;
use sheetkeeper_core::automation::{SweepReport, fill_priorities_with, recolor_all_timestamps};
use sheetkeeper_core::document::FileFormat;
use sheetkeeper_core::{CellRef, Document};
use sheetkeeper_engine::engine::parse_timestamp;
use std::env;
use std::path::{Path, PathBuf};

fn print_usage() {
    eprintln!("Usage: sheetkeeper [OPTIONS] <FILE> <COMMAND> [ARGS]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <FILE>                    Sheet to work on (.grd or .csv)");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  edit <CELL> <VALUE>       Set a cell, then stamp the row and apply status rules");
    eprintln!("  recolor                   Recolour every timestamp in the date column");
    eprintln!("  fill-priorities [VALUE]   Fill blank priority cells (default from config)");
    eprintln!("  show                      Print the sheet");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>       Load settings from a TOML file");
    eprintln!("  --no-user-config          Ignore the per-user sheetkeeper.toml");
    eprintln!("  -o, --output <FILE>       Write the result here instead of FILE");
    eprintln!("  --now <TIMESTAMP>         Use this time instead of the clock (RFC 3339)");
    eprintln!("  -h, --help                Print help");
    eprintln!("  --                        Treat the remaining arguments as positional");
}

#[derive(Debug, PartialEq)]
enum Command {
    Edit { cell: CellRef, value: String },
    Recolor,
    FillPriorities { value: Option<String> },
    Show,
}

#[derive(Debug)]
struct Cli {
    file: PathBuf,
    command: Command,
    config_file: Option<PathBuf>,
    use_user_config: bool,
    output: Option<PathBuf>,
    now: Option<DateTime<Utc>>,
}

fn take_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> Result<String, CliError> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| CliError::Usage(format!("{} requires {}", flag, what)))
}

/// Parse arguments (without the program name). `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Cli>, CliError> {
    let mut config_file: Option<PathBuf> = None;
    let mut use_user_config = true;
    let mut output: Option<PathBuf> = None;
    let mut now: Option<DateTime<Utc>> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--config" => {
                let path = take_value(args, &mut i, "--config", "a file path")?;
                config_file = Some(PathBuf::from(path));
            }
            "--no-user-config" => use_user_config = false,
            "-o" | "--output" => {
                let path = take_value(args, &mut i, "--output", "a file path")?;
                output = Some(PathBuf::from(path));
            }
            "--now" => {
                let raw = take_value(args, &mut i, "--now", "a timestamp")?;
                let parsed = parse_timestamp(&raw).ok_or_else(|| {
                    CliError::Usage(format!("Invalid timestamp for --now: {}", raw))
                })?;
                now = Some(parsed);
            }
            "--" => {
                positional.extend(args[i + 1..].iter().cloned());
                break;
            }
            // After FILE and COMMAND, dashes belong to values such as "-1".
            arg if arg.starts_with('-') && positional.len() < 2 => {
                return Err(CliError::Usage(format!("Unknown option: {}", arg)));
            }
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let file = positional
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| CliError::Usage("Missing FILE".to_string()))?;
    let command_name = positional
        .next()
        .ok_or_else(|| CliError::Usage("Missing COMMAND".to_string()))?;
    let rest: Vec<String> = positional.collect();

    let command = match (command_name.as_str(), rest.as_slice()) {
        ("edit", [cell, value]) => Command::Edit {
            cell: CellRef::from_str(cell)
                .ok_or_else(|| CliError::Usage(format!("Invalid cell reference: {}", cell)))?,
            value: value.clone(),
        },
        ("edit", _) => return Err(CliError::Usage("edit requires <CELL> <VALUE>".to_string())),
        ("recolor", []) => Command::Recolor,
        ("fill-priorities", []) => Command::FillPriorities { value: None },
        ("fill-priorities", [value]) => Command::FillPriorities {
            value: Some(value.clone()),
        },
        ("show", []) => Command::Show,
        ("recolor" | "fill-priorities" | "show", extra) => {
            return Err(CliError::Usage(format!(
                "Unexpected argument: {}",
                extra.last().map(String::as_str).unwrap_or_default()
            )));
        }
        (other, _) => return Err(CliError::Usage(format!("Unknown command: {}", other))),
    };

    Ok(Some(Cli {
        file,
        command,
        config_file,
        use_user_config,
        output,
        now,
    }))
}

fn report_failures(report: &SweepReport) {
    for failure in &report.failures {
        eprintln!("Warning: {}: {}", failure.cell, failure.error);
    }
}

/// CSV stores values only, so colours written by `edit` and `recolor` would be lost.
fn warn_if_colours_dropped(command: &Command, target: &Path) {
    let writes_colours = matches!(command, Command::Edit { .. } | Command::Recolor);
    if writes_colours && FileFormat::from_path(target).ok() == Some(FileFormat::Csv) {
        eprintln!("Warning: {} is CSV; background colours are not saved", target.display());
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config_file.as_deref(), cli.use_user_config)?;
    let now = cli.now.unwrap_or_else(Utc::now);

    let mut doc = Document::with_file(Some(cli.file.clone()), &config)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;

    match &cli.command {
        Command::Show => {
            print!("{}", doc.render_table());
            return Ok(());
        }
        Command::Edit { cell, value } => {
            let outcome = doc.edit_cell(cell.clone(), value, &config, now)?;
            println!("Edited {}", cell);
            if let Some((stamped, color)) = outcome.stamped {
                println!("Stamped {} ({})", stamped, color);
            }
            if let Some(forced) = outcome.forced {
                println!("Set {} to {}", forced, doc.get_cell_display(&forced));
            }
        }
        Command::Recolor => {
            let report = recolor_all_timestamps(&mut doc, &config, now);
            report_failures(&report);
            println!("Recoloured {} timestamps", report.updated);
        }
        Command::FillPriorities { value } => {
            let value = value.as_deref().unwrap_or(&config.default_priority);
            let report = fill_priorities_with(&mut doc, &config, value);
            report_failures(&report);
            println!("Filled {} priorities", report.updated);
        }
    }

    warn_if_colours_dropped(&cli.command, cli.output.as_deref().unwrap_or(&cli.file));
    match &cli.output {
        Some(path) => doc
            .save_as(path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            doc.save_file()
                .with_context(|| format!("Failed to write {}", cli.file.display()))?;
        }
    }
    Ok(())
}

fn main() {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
