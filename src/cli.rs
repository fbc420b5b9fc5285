use std::fmt::Write as _;
use std::path::PathBuf;

use crate::calc::{aggregate, eligible_abilities, eligible_classes, Selection};
use crate::config::AppConfig;
use crate::data::validate::validate_catalog_dir;
use crate::data::{load_catalog_blocking, CatalogStore};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Calc,
    Eligible,
    Validate,
}

const USAGE: &str = "usage: skillcalc <serve|calc|eligible|validate>";

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("calc") => Some(Command::Calc),
        Some("eligible") => Some(Command::Eligible),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Entry point for the binary. Returns the process exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    crate::logging::init(&config.log_filter);
    run_with_config(args, config)
}

pub fn run_with_config(args: &[String], config: AppConfig) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(config),
        Some(Command::Calc) => handle_calc(args, &config),
        Some(Command::Eligible) => handle_eligible(args, &config),
        Some(Command::Validate) => handle_validate(args, &config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_serve(config: AppConfig) -> i32 {
    match server::run_server(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn load_catalog(config: &AppConfig) -> Option<CatalogStore> {
    match load_catalog_blocking(&config.data_dir) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            None
        }
    }
}

fn handle_calc(args: &[String], config: &AppConfig) -> i32 {
    let as_table = args.iter().any(|arg| arg == "--table");
    let positional: Vec<&String> = args.iter().skip(2).filter(|arg| *arg != "--table").collect();
    let Some((character, rest)) = positional.split_first() else {
        eprintln!("usage: skillcalc calc <character> [class|-----] [ability...] [--table]");
        return 2;
    };

    let mut selection = Selection::new(character.as_str());
    if let Some((class, abilities)) = rest.split_first() {
        selection.class = Some(class.to_string());
        selection.abilities = abilities.iter().map(|name| name.to_string()).collect();
    }

    let Some(catalog) = load_catalog(config) else {
        return 1;
    };
    let requirements = match aggregate(&catalog, &selection) {
        Ok(requirements) => requirements,
        Err(err) => {
            eprintln!("calculation failed: {err}");
            return 1;
        }
    };

    if as_table {
        let mut out = String::from("skill\trank\n");
        for (skill, rank) in requirements.iter() {
            let shown = if rank.value() == 0 { String::new() } else { rank.to_string() };
            let _ = writeln!(&mut out, "{skill}\t{shown}");
        }
        print!("{out}");
        return 0;
    }

    match serde_json::to_string_pretty(&requirements) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize requirements: {err}");
            1
        }
    }
}

fn handle_eligible(args: &[String], config: &AppConfig) -> i32 {
    let Some(name) = args.get(2) else {
        eprintln!("usage: skillcalc eligible <character>");
        return 2;
    };
    let Some(catalog) = load_catalog(config) else {
        return 1;
    };
    let character = match catalog.character(name) {
        Ok(character) => character,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let payload = serde_json::json!({
        "character": character.name,
        "classes": eligible_classes(&catalog, character),
        "abilities": eligible_abilities(&catalog, character),
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize eligibility: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String], config: &AppConfig) -> i32 {
    let data_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());

    let report = match validate_catalog_dir(&data_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} diagnostic(s)", report.diagnostics.len());
        1
    } else {
        println!(
            "validation passed: {} ({} diagnostic(s))",
            data_dir.display(),
            report.diagnostics.len()
        );
        0
    }
}
