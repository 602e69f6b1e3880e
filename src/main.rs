mod debug_report;

use std::io::{self, IsTerminal, Read};
use traiter::{Context, Options, Parser};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ctx = Context { field: config.field.clone() };
    let opts = Options::default();

    match config.format {
        Format::Debug => {
            let parser = Parser::new();
            let (traits, traces) = if std::env::var_os("TRAITER_DEBUG_RULES").is_some() {
                parser.parse_traced_with(&config.input, &ctx, &opts)
            } else {
                (parser.parse_with(&config.input, &ctx, &opts), Vec::new())
            };
            debug_report::print_run(&config.input, &traits, &traces, config.color);
        }
        Format::Csv => {
            let traits = Parser::new().parse_with(&config.input, &ctx, &opts);
            let row = traiter::writers::to_csv_row(&traits);
            if let Err(err) = traiter::writers::write_csv(io::stdout(), &[row]) {
                eprintln!("error: failed to write CSV: {err}");
                std::process::exit(1);
            }
        }
        Format::Json => {
            let traits = Parser::new().parse_with(&config.input, &ctx, &opts);
            match traiter::writers::to_json(&traits) {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    eprintln!("error: failed to write JSON: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Debug,
    Csv,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Format::Debug),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(format!("error: unknown --format '{other}' (expected csv, json or debug)")),
        }
    }
}

struct CliConfig {
    input: String,
    field: Option<String>,
    format: Format,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut field: Option<String> = None;
    let mut format = Format::Debug;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("traiter {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--format" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                format = value.parse()?;
            }
            "--field" => {
                let value = args.next().ok_or_else(|| "error: --field expects a value".to_string())?;
                field = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--format=") => {
                format = arg.trim_start_matches("--format=").parse()?;
            }
            _ if arg.starts_with("--field=") => {
                field = Some(arg.trim_start_matches("--field=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, field, format, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "traiter {version}

Stacked-regex biological trait extraction CLI.

Usage:
  traiter [OPTIONS] [--] <input...>
  traiter [OPTIONS] --input <text>

Options:
  -i, --input <text>     Input text to parse. If omitted, reads remaining args
                         or stdin when no args are provided.
  --field <name>         Source field name, passed through as parsing context.
  --format <fmt>         Output format: csv, json or debug. Default: debug.
  --color                Force ANSI color output (debug format only).
  --no-color             Disable ANSI color output (debug format only).
  -h, --help             Show this help message.
  -V, --version          Print version information.

Environment:
  TRAITER_DEBUG_RULES=1  In debug format, also print the token stream at
                          each pass boundary (scan, replace, group).

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
