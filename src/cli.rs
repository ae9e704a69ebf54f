//! Defines the command-line interface for the application.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "instruction-gen",
    version,
    about = "Generate system instruction files from templates."
)]
pub struct Cli {
    /// Path to the template file.
    #[arg(long, value_name = "PATH")]
    pub template: PathBuf,

    /// Path for the generated output file.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// The name of the project. [default: "Unnamed Project"]
    #[arg(long, value_name = "NAME", allow_hyphen_values = true)]
    pub project_name: Option<String>,

    /// Comma-separated list of technologies. [default: "Not specified"]
    #[arg(long, value_name = "LIST", allow_hyphen_values = true)]
    pub technologies: Option<String>,

    /// The coding style guide. [default: "Not specified"]
    #[arg(long, value_name = "GUIDE", allow_hyphen_values = true)]
    pub style_guide: Option<String>,

    /// The testing framework used. [default: "Not specified"]
    #[arg(long, value_name = "FRAMEWORK", allow_hyphen_values = true)]
    pub testing_framework: Option<String>,

    /// Core rules for the AI agent. Use \n for new lines. [default: "- Follow standard best practices."]
    #[arg(long, value_name = "RULES", allow_hyphen_values = true)]
    pub rules: Option<String>,

    /// Bind an extra placeholder, e.g. --var OWNER=jane. May be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// A JSON, TOML or YAML file mapping placeholder keys to values.
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,

    /// Fail instead of emitting markers for placeholders without a value.
    #[arg(long)]
    pub strict: bool,

    /// Print the generated text to stdout without writing the output file.
    #[arg(long, conflicts_with = "diff")]
    pub dry_run: bool,

    /// Show a diff against the current output file instead of writing it.
    #[arg(long, conflicts_with = "dry_run")]
    pub diff: bool,
}
