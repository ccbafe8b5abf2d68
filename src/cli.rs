//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Policyscope - privacy policy summaries with severity badges
///
/// Paste or pipe a privacy policy and get a four-part summary (data
/// collection, sharing, retention, overall risk) rated Low/Medium/High.
///
/// Examples:
///   policyscope analyze --file privacy.txt
///   pbpaste | policyscope analyze --endpoint http://127.0.0.1:8080/analyze
///   policyscope analyze --text "We sell your data." --format json
///   OPENAI_API_KEY=sk-... policyscope serve --bind 0.0.0.0:8080
///   policyscope --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .policyscope.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .policyscope.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summarize a privacy policy through the analysis service
    Analyze(AnalyzeArgs),
    /// Run the analysis service (POST /analyze)
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Policy text to analyze
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the policy text from a file (stdin when neither --text nor --file is given)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Analysis service URL
    ///
    /// Can also be set via POLICYSCOPE_ENDPOINT or .policyscope.toml.
    #[arg(long, value_name = "URL", env = "POLICYSCOPE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (default: HTTP client default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (text, markdown, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Also write the rendered summary to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind (e.g. 127.0.0.1:8080)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Chat model used for the analysis
    #[arg(short, long, env = "POLICYSCOPE_MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL")]
    pub openai_url: Option<String>,

    /// Provider API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Output format for the rendered summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain terminal text (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            None => Err("A subcommand is required: analyze or serve".to_string()),
            Some(Command::Analyze(analyze)) => analyze.validate(),
            Some(Command::Serve(serve)) => serve.validate(),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

impl AnalyzeArgs {
    fn validate(&self) -> Result<(), String> {
        // Placeholder endpoints are left to the dispatcher, which falls back
        if let Some(ref endpoint) = self.endpoint {
            if !crate::config::is_placeholder_endpoint(endpoint)
                && !endpoint.starts_with("http://")
                && !endpoint.starts_with("https://")
            {
                return Err("Endpoint URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref file) = self.file {
            if !file.is_file() {
                return Err(format!("Policy file does not exist: {}", file.display()));
            }
        }

        Ok(())
    }
}

impl ServeArgs {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref url) = self.openai_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("OpenAI URL must start with 'http://' or 'https://'".to_string());
            }
        }

        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err("An API key is required: pass --api-key or set OPENAI_API_KEY".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
            command: Some(command),
        }
    }

    fn serve_args() -> ServeArgs {
        ServeArgs {
            api_key: Some("sk-test".to_string()),
            ..ServeArgs::default()
        }
    }

    #[test]
    fn test_validation_requires_subcommand() {
        let mut args = make_args(Command::Analyze(AnalyzeArgs::default()));
        args.command = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_endpoint() {
        let args = make_args(Command::Analyze(AnalyzeArgs {
            endpoint: Some("ftp://example.com".to_string()),
            ..AnalyzeArgs::default()
        }));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_allows_placeholder_endpoint() {
        let args = make_args(Command::Analyze(AnalyzeArgs {
            endpoint: Some(crate::config::PLACEHOLDER_ENDPOINT.to_string()),
            ..AnalyzeArgs::default()
        }));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_file() {
        let args = make_args(Command::Analyze(AnalyzeArgs {
            file: Some(PathBuf::from("/definitely/not/here/policy.txt")),
            ..AnalyzeArgs::default()
        }));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_serve_requires_api_key() {
        let mut serve = serve_args();
        assert!(make_args(Command::Serve(serve.clone())).validate().is_ok());

        serve.api_key = Some("  ".to_string());
        assert!(make_args(Command::Serve(serve)).validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Serve(serve_args()));
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Serve(serve_args()));
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_analyze_subcommand() {
        let args = Args::try_parse_from([
            "policyscope",
            "analyze",
            "--text",
            "We collect cookies.",
            "--format",
            "json",
        ])
        .unwrap();

        match args.command {
            Some(Command::Analyze(analyze)) => {
                assert_eq!(analyze.text.as_deref(), Some("We collect cookies."));
                assert_eq!(analyze.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
