//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::collections::BTreeMap;
use std::env::VarError;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ResolveArgs};
use crate::config::layers::ConfigLayerStack;
use crate::config::loader::load_layers_with_env;
use crate::error::{ApiConfError, Result};
use crate::published::{PublishedConfig, API_CONFIG};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where commands read configuration from.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root used for `.apiconf/` discovery.
    pub project_root: PathBuf,
    /// Explicit config file, replacing discovery.
    pub config_path: Option<PathBuf>,
    /// Fixed variables read in place of the process environment.
    pub env: Option<BTreeMap<String, String>>,
}

impl CommandContext {
    /// Create a context for the given project root.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            env: None,
        }
    }

    /// Use an explicit config file.
    pub fn with_config_path(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    /// Read variables from `vars` instead of the process environment.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Look up an environment variable for this context.
    pub fn env_var(&self, key: &str) -> std::result::Result<String, VarError> {
        match &self.env {
            Some(vars) => vars.get(key).cloned().ok_or(VarError::NotPresent),
            None => std::env::var(key),
        }
    }

    /// Load the configuration layers.
    ///
    /// Missing or unparseable config files are reported through the UI and
    /// turned into `Ok(None)` so commands can exit with code 2.
    pub fn load_layers(&self, ui: &mut dyn UserInterface) -> Result<Option<ConfigLayerStack>> {
        let loaded = load_layers_with_env(&self.project_root, self.config_path.as_deref(), |key| {
            self.env_var(key)
        });
        match loaded {
            Ok(layers) => Ok(Some(layers)),
            Err(e @ ApiConfError::ConfigNotFound { .. })
            | Err(e @ ApiConfError::ConfigParseError { .. }) => {
                ui.error(&e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    context: CommandContext,
    published: &'a PublishedConfig,
}

impl CommandDispatcher<'static> {
    /// Create a dispatcher that publishes into the process-wide
    /// [`API_CONFIG`].
    pub fn new(context: CommandContext) -> Self {
        Self::with_published(context, &API_CONFIG)
    }
}

impl<'a> CommandDispatcher<'a> {
    /// Create a dispatcher that publishes into the given cell.
    pub fn with_published(context: CommandContext, published: &'a PublishedConfig) -> Self {
        Self { context, published }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Resolve(args)) => {
                let cmd = super::resolve::ResolveCommand::new(
                    self.context.clone(),
                    self.published,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to resolve with default args
                let cmd = super::resolve::ResolveCommand::new(
                    self.context.clone(),
                    self.published,
                    ResolveArgs::default(),
                );
                cmd.execute(ui)
            }
        }
    }
}
