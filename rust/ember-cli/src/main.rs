//! Ember CLI: list and invoke runtime builtins from the shell.

use clap::{Parser as ClapParser, Subcommand};
use ember_runtime::config::{ConfigError, RuntimeConfig};
use ember_runtime::json::value_from_json;
use ember_runtime::{registry, Value};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ANSI color helpers
fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}
fn gray(s: &str) -> String {
    format!("\x1b[90m{}\x1b[0m", s)
}

/// Exit status when the builtin itself returned an error value.
const EXIT_ERROR_VALUE: i32 = 2;

#[derive(ClapParser)]
#[command(name = "ember", version, about = "Ember runtime builtins")]
struct Cli {
    /// Use this config file instead of searching for ember.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered builtin with its arity
    List,
    /// Call a builtin. Each argument is parsed as JSON, or taken as a plain
    /// string when it is not valid JSON
    Call {
        /// Builtin name, e.g. `split` or `MapGet`
        name: String,

        /// Arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown builtin '{0}' (run `ember list` to see what is available)")]
    UnknownBuiltin(String),
    #[error("{0}")]
    Fault(String),
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", red("error:"), e);
            std::process::exit(1);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Commands::List => {
            cmd_list();
            Ok(0)
        }
        Commands::Call { name, args } => cmd_call(&config, &name, &args),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", red("error:"), e);
            std::process::exit(1);
        }
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<RuntimeConfig, CliError> {
    let cfg = match explicit {
        Some(path) => RuntimeConfig::load_from(path)?,
        None => RuntimeConfig::load()?,
    };
    Ok(cfg)
}

/// `EMBER_LOG` wins over the configured level. Logs go to stderr so they
/// never mix with results.
fn init_logging(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_env("EMBER_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() {
    for name in registry::names() {
        if let Some(builtin) = registry::lookup(name) {
            println!("{:<14} {}", bold(name), gray(&builtin.arity().to_string()));
        }
    }
}

/// Returns the process exit code.
fn cmd_call(config: &RuntimeConfig, name: &str, raw_args: &[String]) -> Result<i32, CliError> {
    let builtin =
        registry::lookup(name).ok_or_else(|| CliError::UnknownBuiltin(name.to_string()))?;
    let args: Vec<Value> = raw_args.iter().map(|a| parse_arg(a)).collect();
    debug!(builtin = name, argc = args.len(), "calling builtin");

    let outcome = config.guard().run(|| builtin.call(&args));
    if !outcome.completed() {
        return Err(CliError::Fault(outcome.diagnostic().to_string()));
    }

    let value = outcome.into_value();
    println!("{}", value);
    Ok(if value.is_error() { EXIT_ERROR_VALUE } else { 0 })
}

/// JSON when it parses, otherwise the raw text as a String.
fn parse_arg(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => value_from_json(&json),
        Err(_) => Value::from(raw),
    }
}
