use clap::{ArgAction, Parser, Subcommand};
use futures::executor::block_on_stream;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stream_mapper::{extract, ndjson, DecodeError, Extracted, MapOptions, MapperError, MapperStreamExt, Path};

#[derive(Parser)]
#[command(name = "smap")]
#[command(about = "Extract and decode JSON objects from newline-delimited JSON", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value found at a dotted key path for every input line
    Extract {
        /// Dotted key path, e.g. `taskList.tasks`
        #[arg(short, long)]
        path: Path,

        /// NDJSON input file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Decode one object per input line
    Object {
        /// Dotted root path leading to the object
        #[arg(short, long)]
        root: Option<Path>,

        /// JSON file holding `{"root": [...]}`; flags take precedence
        #[arg(long)]
        options: Option<PathBuf>,

        /// NDJSON input file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Decode an array of objects per input line
    Array {
        /// Dotted root path leading to the array
        #[arg(short, long)]
        root: Option<Path>,

        /// Dotted path applied to every array element
        #[arg(short, long)]
        inner: Option<Path>,

        /// JSON file holding `{"root": [...], "inner": [...]}`; flags take precedence
        #[arg(long)]
        options: Option<PathBuf>,

        /// NDJSON input file (defaults to stdin)
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid options file {}: {source}", .path.display())]
    Options {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error("{failed} of {total} events failed")]
    Failed { failed: usize, total: usize },
}

/// Counts events so the exit status can reflect failures.
#[derive(Default)]
struct Tally {
    total:  usize,
    failed: usize,
}

impl Tally {
    fn success(&mut self, value: Value) {
        self.total += 1;
        println!("{}", value);
    }

    fn failure(&mut self, kind: &str, message: impl std::fmt::Display) {
        self.total += 1;
        self.failed += 1;
        eprintln!("error[{}]: {}", kind, message);
    }

    fn mapped(&mut self, error: MapperError) {
        let kind = if error.is_decoding() { "decoding" } else { "underlying" };
        self.failure(kind, error);
    }

    fn finish(self) -> Result<(), CliError> {
        info!(total = self.total, failed = self.failed, "done");
        if self.failed > 0 {
            return Err(CliError::Failed {
                failed: self.failed,
                total:  self.total,
            });
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("smap: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(command: Commands) -> Result<(), CliError> {
    let mut tally = Tally::default();

    match command {
        Commands::Extract { path, input } => {
            let events = Box::pin(ndjson(open_input(input.as_ref())?));
            for event in block_on_stream(events) {
                match event {
                    Ok(value) => match extract(&value, Some(&path)) {
                        Extracted::Found(found) => tally.success(found.clone()),
                        Extracted::NotFound => tally.failure("extract", format!("not found: {}", path)),
                    },
                    Err(e) => tally.failure("input", e),
                }
            }
        }

        Commands::Object { root, options, input } => {
            let options = MapOptions { root, inner: None }.or(load_options(options.as_ref())?);
            debug!(?options, "decoding objects");

            let events = ndjson(open_input(input.as_ref())?);
            let decoded = Box::pin(events.map_to_type_with(identity, options.root));
            for result in block_on_stream(decoded) {
                match result {
                    Ok(object) => tally.success(Value::Object(object)),
                    Err(e) => tally.mapped(e),
                }
            }
        }

        Commands::Array { root, inner, options, input } => {
            let options = MapOptions { root, inner }.or(load_options(options.as_ref())?);
            debug!(?options, "decoding arrays");

            let events = ndjson(open_input(input.as_ref())?);
            let decoded = Box::pin(events.map_to_type_array_with(identity, options.root, options.inner));
            for result in block_on_stream(decoded) {
                match result {
                    Ok(objects) => tally.success(Value::Array(objects.into_iter().map(Value::Object).collect())),
                    Err(e) => tally.mapped(e),
                }
            }
        }
    }

    tally.finish()
}

/// Decodes an object as itself.
fn identity(object: &Map<String, Value>) -> Result<Map<String, Value>, DecodeError> {
    Ok(object.clone())
}

fn open_input(input: Option<&PathBuf>) -> Result<Box<dyn BufRead>, CliError> {
    match input {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn load_options(path: Option<&PathBuf>) -> Result<MapOptions, CliError> {
    let Some(path) = path else {
        return Ok(MapOptions::default());
    };
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Options {
        path: path.clone(),
        source,
    })
}
