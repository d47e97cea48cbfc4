//! tool-spec CLI - validate tool invocations against their specification.
//!
//! Commands:
//! - validate: check one tool's inputs.json entry against tool.yml
//! - list: print a signature line per tool
//! - schema: print the JSON Schema of the specification or input document

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tool_spec::types::{ObservabilityConfig, ValidationConfig};
use tool_spec::{validate_inputs_with, Config, InputFile, SpecFile};

#[derive(Parser, Debug)]
#[command(name = "tool-spec", version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(long, global = true, env = "TOOL_SPEC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a tool's parameters and data against its specification.
    Validate {
        /// Specification document.
        #[arg(long, default_value = "/src/tool.yml", env = "TOOL_SPEC_FILE")]
        spec: PathBuf,

        /// Input document.
        #[arg(long, default_value = "/in/inputs.json", env = "TOOL_INPUTS_FILE")]
        inputs: PathBuf,

        /// Tool name to validate.
        #[arg(long, env = "TOOL_RUN")]
        tool: String,

        /// Reject parameters the tool does not declare.
        #[arg(long)]
        strict: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List the tools in a specification document.
    List {
        /// Specification document.
        #[arg(long, default_value = "/src/tool.yml", env = "TOOL_SPEC_FILE")]
        spec: PathBuf,
    },

    /// Print the JSON Schema of a document format.
    Schema {
        #[arg(value_enum, default_value_t = Document::Spec)]
        document: Document,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Document {
    Spec,
    Inputs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                tool_spec::observability::init_tracing(&ObservabilityConfig::default());
                tracing::error!("{err}");
                return ExitCode::from(2);
            }
        },
        None => Config::default(),
    };

    tool_spec::observability::init_tracing(&config.observability);

    match run(cli.command, &config) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands, config: &Config) -> tool_spec::Result<ExitCode> {
    match command {
        Commands::Validate {
            spec,
            inputs,
            tool,
            strict,
            format,
        } => {
            let spec_file = SpecFile::load(&spec)?;
            let input_file = InputFile::load(&inputs)?;
            let tool_spec = spec_file.get_tool(&tool)?;
            let tool_input = input_file.get_tool_input(&tool)?;

            let policy = ValidationConfig {
                fail_on_extra: strict || config.validation.fail_on_extra,
            };
            let report = validate_inputs_with(tool_spec, tool_input, &policy);

            tracing::info!(tool = %tool, errors = report.len(), "validation finished");

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text if report.is_valid() => println!("{tool}: inputs are valid"),
                Format::Text => {
                    println!("{tool}: {} validation error(s)", report.len());
                    for err in report.errors() {
                        println!("  - [{}] {}", err.kind.as_str(), err);
                    }
                }
            }

            Ok(if report.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }

        Commands::List { spec } => {
            let spec_file = SpecFile::load(&spec)?;
            for tool in spec_file.tools.values() {
                println!("{}", tool.signature());
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Schema { document } => {
            let schema = match document {
                Document::Spec => SpecFile::json_schema(),
                Document::Inputs => InputFile::json_schema(),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
