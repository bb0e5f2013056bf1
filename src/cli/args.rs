//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// apiconf - Select the API base URL for the host a client is served from.
#[derive(Debug, Parser)]
#[command(name = "apiconf")]
#[command(author, version, long_about = None)]
#[command(about = "Select the API base URL for the host a client is served from")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .apiconf/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the API configuration (default if no command specified)
    Resolve(ResolveArgs),

    /// List configured environments
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResolveFormat {
    /// `{"apiBaseUrl": "..."}`
    #[default]
    Json,
    /// `apiBaseUrl: ...`
    Yaml,
    /// `API_BASE_URL=...`
    Env,
    /// The bare URL
    Url,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Hostname of the page (e.g., localhost, kaam-asaasan.app)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Full page URL; its host is used as the hostname
    #[arg(long, value_name = "URL", conflicts_with = "hostname")]
    pub page_url: Option<String>,

    /// Select an environment by name instead of by hostname
    #[arg(long, value_name = "ENV")]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ResolveFormat::Json)]
    pub format: ResolveFormat,

    /// Show which environment was chosen and why
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_describes_the_tool() {
        let about = Cli::command().get_about().map(|a| a.to_string());
        assert_eq!(
            about.as_deref(),
            Some("Select the API base URL for the host a client is served from")
        );
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["apiconf"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn resolve_with_hostname() {
        let cli =
            Cli::try_parse_from(["apiconf", "resolve", "--hostname", "localhost"]).unwrap();
        match cli.command {
            Some(Commands::Resolve(args)) => {
                assert_eq!(args.hostname.as_deref(), Some("localhost"));
                assert_eq!(args.format, ResolveFormat::Json);
                assert!(!args.explain);
            }
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn resolve_format_values() {
        let cli = Cli::try_parse_from(["apiconf", "resolve", "--format", "url"]).unwrap();
        match cli.command {
            Some(Commands::Resolve(args)) => assert_eq!(args.format, ResolveFormat::Url),
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn hostname_conflicts_with_page_url() {
        let result = Cli::try_parse_from([
            "apiconf",
            "resolve",
            "--hostname",
            "localhost",
            "--page-url",
            "http://localhost/",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["apiconf", "list", "--quiet", "--config", "x.yml"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["apiconf", "completions"]).is_err());
        assert!(Cli::try_parse_from(["apiconf", "completions", "bash"]).is_ok());
    }
}
