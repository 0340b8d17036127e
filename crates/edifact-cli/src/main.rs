use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use edifact_annotate::{report, CodeDictionary, SegmentDictionary};
use edifact_parser::{make_edi, parse_edi, EmitOptions, ParseOptions};
use edifact_xml::{deserialize, make_xml, parse_xml, pretty_xml, serialize, XmlTextError};

#[derive(Parser)]
#[command(name = "edifact")]
#[command(about = "Parses, emits, and annotates UN/EDIFACT interchanges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an interchange and print diagnostics (segment count, delimiters).
    Parse {
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Re-emit an interchange, optionally normalising its delimiters.
    Emit {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Force a UNA segment even if the input had none.
        #[arg(long, default_value = "false")]
        with_una: bool,
    },

    /// Convert an interchange to its structural XML form.
    ToXml {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        root_tag: Option<String>,
    },

    /// Convert structural XML back to wire-format EDIFACT.
    FromXml {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Pretty-print an interchange's structural XML form.
    Pretty {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        root_tag: Option<String>,
    },

    /// Render a dictionary-annotated textual report.
    Report {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Path to the segment dictionary (SD) JSON document.
        #[arg(long)]
        segment_dictionary: PathBuf,
        /// Path to the code dictionary (ED) JSON document.
        #[arg(long)]
        code_dictionary: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse dictionary {path}: {source}")]
    Dictionary {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Parse(#[from] edifact_parser::ParseError),
    #[error(transparent)]
    Mapping(#[from] edifact_xml::MappingError),
    #[error(transparent)]
    XmlText(#[from] XmlTextError),
    #[error(transparent)]
    Delimiters(#[from] edifact_types::DelimiterConflict),
}

fn read_input(input: &Option<PathBuf>) -> Result<Vec<u8>, CliError> {
    match input {
        Some(path) => fs::read(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn write_output(output: &Option<PathBuf>, bytes: &[u8]) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, bytes).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout().write_all(bytes).map_err(|source| CliError::Write {
            path: "<stdout>".to_string(),
            source,
        }),
    }
}

fn read_dictionary<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Dictionary {
        path: path.display().to_string(),
        source,
    })
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Parse { input } => {
            let bytes = read_input(&input)?;
            let document = parse_edi(&bytes, ParseOptions::default())?;
            let summary = format!(
                "{} segments, UNA present: {}\n",
                document.len(),
                document.una().is_some()
            );
            io::stdout()
                .write_all(summary.as_bytes())
                .map_err(|source| CliError::Write {
                    path: "<stdout>".to_string(),
                    source,
                })
        }
        Commands::Emit {
            input,
            output,
            with_una,
        } => {
            let bytes = read_input(&input)?;
            let document = parse_edi(&bytes, ParseOptions::default())?;
            let mut options = EmitOptions::default();
            options.with_una = with_una;
            if let Some(delimiters) = document.una() {
                options.delimiters = delimiters.clone();
            }
            let emitted = make_edi(&document, &options)?;
            write_output(&output, &emitted)
        }
        Commands::ToXml {
            input,
            output,
            root_tag,
        } => {
            let bytes = read_input(&input)?;
            let document = parse_edi(&bytes, ParseOptions::default())?;
            let xml = make_xml(&document, root_tag.as_deref());
            let text = serialize(&xml)?;
            write_output(&output, text.as_bytes())
        }
        Commands::FromXml { input, output } => {
            let bytes = read_input(&input)?;
            let text = String::from_utf8_lossy(&bytes);
            let xml = deserialize(&text)?;
            let document = parse_xml(&xml)?;
            let emitted = make_edi(&document, &EmitOptions::default())?;
            write_output(&output, &emitted)
        }
        Commands::Pretty {
            input,
            output,
            root_tag,
        } => {
            let bytes = read_input(&input)?;
            let document = parse_edi(&bytes, ParseOptions::default())?;
            let xml = make_xml(&document, root_tag.as_deref());
            let text = pretty_xml(&xml, None);
            write_output(&output, text.as_bytes())
        }
        Commands::Report {
            input,
            output,
            segment_dictionary,
            code_dictionary,
        } => {
            let bytes = read_input(&input)?;
            let document = parse_edi(&bytes, ParseOptions::default())?;
            let sd: SegmentDictionary = read_dictionary(&segment_dictionary)?;
            let ed: CodeDictionary = read_dictionary(&code_dictionary)?;
            let text = report(&document, &sd, &ed);
            write_output(&output, text.as_bytes())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
