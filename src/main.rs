/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the TALLY scripting engine project.
 *
 * TALLY is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally::diagnostics::DiagnosticPrinter;
use tally::{parse_with_limit, tokenize, Config, Engine, Error};

/// Tally - evaluate a tiny numeric script and print the result
#[derive(Parser, Debug)]
#[command(name = "tally", version, about, long_about = None)]
struct Args {
    /// Read the script from this file
    #[arg(short, long, conflicts_with = "source")]
    file: Option<PathBuf>,

    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the tokens as JSON instead of evaluating
    #[arg(long)]
    tokens: bool,

    /// Print the parsed tree as JSON instead of evaluating
    #[arg(long)]
    ast: bool,

    /// Script text (if neither this nor --file is given, reads stdin)
    source: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let (name, source) = match read_source(&args) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match execute(&args, &source, config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            DiagnosticPrinter::new(name, source).print(&e);
            ExitCode::FAILURE
        }
    }
}

fn read_source(args: &Args) -> Result<(String, String), String> {
    if let Some(path) = &args.file {
        let source = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read the input file '{}': {e}", path.display()))?;
        return Ok((path.display().to_string(), source));
    }

    if let Some(source) = &args.source {
        return Ok(("<input>".to_string(), source.clone()));
    }

    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(|e| format!("Failed to read standard input: {e}"))?;
    Ok(("<stdin>".to_string(), source))
}

fn execute(args: &Args, source: &str, config: Config) -> Result<String, Error> {
    if args.tokens {
        let tokens = tokenize(source)?;
        return Ok(to_json(&tokens));
    }

    if args.ast {
        let tokens = tokenize(source)?;
        let program = parse_with_limit(&tokens, config.max_nesting_depth)?;
        return Ok(to_json(&program));
    }

    let value = Engine::with_config(config).run(source)?;
    Ok(value.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
