//! Placeholder API CLI
//!
//! Usage:
//!   placeholder-api [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>        TOML config (colors, text placeholders, preview player/server)
//!   --no-player                Parse without a player context
//!   --check                    Report tokens that would stay unresolved
//!   -l, --list                 List registered placeholders
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use placeholder_api::{strip_formatting, Config, PlaceholderApi, StaticPlayer};

#[derive(Parser, Debug)]
#[command(name = "placeholder-api")]
#[command(about = "Expand {placeholder} tokens in game-server messages")]
struct Cli {
    /// Input file, one message per line (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parse without a player context
    #[arg(long)]
    no_player: bool,

    /// Remove format codes from the output
    #[arg(long)]
    strip: bool,

    /// Turn format codes in the output back into {color} tokens
    #[arg(long, conflicts_with = "strip")]
    revert: bool,

    /// Color each character of the output, e.g. --gradient red,gold,yellow
    #[arg(long, value_delimiter = ',', value_name = "COLORS")]
    gradient: Vec<String>,

    /// Color each word of the output
    #[arg(long, value_delimiter = ',', value_name = "COLORS", conflicts_with = "gradient")]
    word_gradient: Vec<String>,

    /// Report tokens that would stay unresolved and exit non-zero if any
    #[arg(long)]
    check: bool,

    /// List registered placeholders
    #[arg(short, long)]
    list: bool,

    /// Debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// `--debug` wins over `RUST_LOG`; the default level is WARN.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("placeholder_api=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("placeholder_api=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("placeholder-api starting with args: {:?}", cli);

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let api = PlaceholderApi::<StaticPlayer>::from_config(&config);
    api.init(Arc::new(config.server.clone().unwrap_or_default()));

    if cli.list {
        for identifier in api.registered_placeholders() {
            println!("{}", identifier);
        }
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            (buffer, "<stdin>".to_string())
        }
    };

    let player = if cli.no_player {
        None
    } else {
        Some(config.player.clone().unwrap_or_default())
    };

    if cli.check {
        let mut unresolved = 0;
        for line in source.lines() {
            // Diagnostic spans are per line; shift them into the whole source
            let offset = line.as_ptr() as usize - source.as_ptr() as usize;
            for mut diagnostic in api.check(line, player.as_ref()) {
                diagnostic.span = diagnostic.span.start + offset..diagnostic.span.end + offset;
                eprint!("{}", diagnostic.format(&source, &filename));
                unresolved += 1;
            }
        }
        if unresolved > 0 {
            eprintln!("{} unresolved placeholder(s)", unresolved);
            std::process::exit(1);
        }
        return;
    }

    let lines: Vec<&str> = source.lines().collect();
    for line in api.parse_multiple(&lines, player.as_ref()) {
        let line = if !cli.gradient.is_empty() {
            api.character_gradient(&line, &cli.gradient)
        } else if !cli.word_gradient.is_empty() {
            api.word_gradient(&line, &cli.word_gradient)
        } else {
            line
        };

        if cli.strip {
            println!("{}", strip_formatting(&line));
        } else if cli.revert {
            println!("{}", api.revert(&line));
        } else {
            println!("{}", line);
        }
    }
}

fn print_intro() {
    println!(
        r#"Placeholder API - expand {{placeholder}} tokens in game-server messages

USAGE:
    placeholder-api [OPTIONS] [FILE]
    echo '<message>' | placeholder-api

OPTIONS:
    -c, --config <FILE>       Colors, text placeholders, preview player/server (TOML)
    --no-player               Parse without a player context
    --strip                   Remove format codes from the output
    --revert                  Turn format codes back into {{color}} tokens
    --gradient <COLORS>       Per-character gradient, e.g. red,gold,yellow
    --word-gradient <COLORS>  Per-word gradient
    --check                   Report unresolved tokens
    -l, --list                List registered placeholders
    -d, --debug               Debug logging
    -h, --help                Print help

SYNTAX:
    {{identifier}}             e.g. {{player}}, {{server_online}}, {{red}}
    {{identifier:params}}      only for placeholders that accept parameters

QUICK START:
    echo '{{gold}}{{player}}{{reset}} joined ({{server_online}}/{{server_max}})' | placeholder-api"#
    );
}
