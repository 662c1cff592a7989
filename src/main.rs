//! settlement-report CLI
//!
//! Produce the daily settlement report from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Report over 100 random instructions plus the two reference rows
//! settlement-report report
//!
//! # Report over instructions from a JSON file, as JSON
//! settlement-report report --input instructions.json --format json
//!
//! # Write a reproducible sample file
//! settlement-report generate --rows 50 --seed 42 --output instructions.json
//! ```

use chrono::Local;
use settlement_report::config::{OutputFormat, ReportConfig};
use settlement_report::core::calendar;
use settlement_report::core::currency::Currency;
use settlement_report::core::instruction::{InstructionInput, InstructionSet};
use settlement_report::report::daily::DailyReport;
use settlement_report::simulation::sample_data::{build_sample_set, generate_random_instructions};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"settlement-report — daily trade settlement reporting

USAGE:
    settlement-report <COMMAND> [OPTIONS]

COMMANDS:
    report      Report USD settled per day and rank counterparties
    generate    Generate random sample instructions as JSON
    currencies  List the ISO 4217 reference table and working weeks
    help        Show this message

OPTIONS (report):
    --input <FILE>      JSON instructions file (default: generated sample data)
    --config <FILE>     JSON config file
    --rows <N>          Number of random instructions (default: 100)
    --seed <N>          RNG seed for reproducible sample data
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --rows <N>          Number of instructions (default: 100)
    --seed <N>          RNG seed
    --output <FILE>     Write to file instead of stdout

Logging is controlled with RUST_LOG (default: warn).

EXAMPLES:
    settlement-report report
    settlement-report report --rows 1000 --seed 7
    settlement-report report --input instructions.json --format json
    settlement-report generate --rows 20 --seed 1 --output instructions.json"#
    );
}

/// JSON schema for input instructions.
#[derive(serde::Serialize, serde::Deserialize)]
struct InstructionsFile {
    instructions: Vec<InstructionInput>,
}

fn load_instructions(path: &str) -> InstructionSet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: InstructionsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "instructions": [
    {{ "entity": "foo", "side": "B", "agreed_fx": "0.50", "currency": "SGD",
      "instruction_date": "2016-01-01", "settlement_date": "2016-01-02",
      "units": 200, "price_per_unit": "100.25" }}
  ]
}}"#
        );
        process::exit(1);
    });

    InstructionSet::from_inputs(&file.instructions).unwrap_or_else(|e| {
        eprintln!("Invalid instruction: {}", e);
        process::exit(1);
    })
}

fn required_value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    required_value(args, i, flag, "a number")
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("{} requires a number", flag);
            process::exit(1);
        })
}

fn cmd_report(args: &[String]) {
    let mut input_path = None;
    let mut config_path = None;
    let mut rows = None;
    let mut seed = None;
    let mut format = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(required_value(args, i, "--input", "a file path").to_string());
            }
            "--config" => {
                i += 1;
                config_path = Some(required_value(args, i, "--config", "a file path").to_string());
            }
            "--rows" => {
                i += 1;
                rows = Some(parse_number(args, i, "--rows"));
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_number(args, i, "--seed"));
            }
            "--format" => {
                i += 1;
                let value = required_value(args, i, "--format", "'text' or 'json'");
                format = Some(value.parse::<OutputFormat>().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => ReportConfig::from_file(&path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        }),
        None => ReportConfig::default(),
    };
    if let Some(rows) = rows {
        config.sample.rows = rows;
    }
    if seed.is_some() {
        config.sample.seed = seed;
    }
    if let Some(format) = format {
        config.format = format;
    }

    let set = match input_path {
        Some(path) => load_instructions(&path),
        None => build_sample_set(&config.sample, Local::now().date_naive()).unwrap_or_else(|e| {
            eprintln!("Error building sample data: {}", e);
            process::exit(1);
        }),
    };

    let report = DailyReport::build(&set).unwrap_or_else(|e| {
        eprintln!("Error building report: {}", e);
        process::exit(1);
    });
    match config.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            });
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Daily Trade Reporting Engine");
            print!("{}", report);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = ReportConfig::default().sample;
    config.include_seed_rows = false;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                config.rows = parse_number(args, i, "--rows");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number(args, i, "--seed"));
            }
            "--output" => {
                i += 1;
                output_path = Some(required_value(args, i, "--output", "a file path").to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let instructions = generate_random_instructions(&config, Local::now().date_naive());
    let output = InstructionsFile {
        instructions: instructions.iter().map(InstructionInput::from).collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        eprintln!("Error serializing instructions: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} instructions → {}", output.instructions.len(), path);
    } else {
        println!("{}", json);
    }
}

fn cmd_currencies() {
    println!("{:<5} {:>3} {:>5}  {:<7} NAME", "CODE", "NUM", "MINOR", "WEEK");
    for currency in Currency::all() {
        let minor = currency
            .minor_unit()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let week = if calendar::uses_shifted_pattern(currency) {
            "Sun-Thu"
        } else {
            "Mon-Fri"
        };
        println!(
            "{:<5} {:>3} {:>5}  {:<7} {}",
            currency.code(),
            currency.numeric_code_padded(),
            minor,
            week,
            currency.name()
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "generate" => cmd_generate(rest),
        "currencies" => cmd_currencies(),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
