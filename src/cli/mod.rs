//! Command-line interface for apiconf.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ListArgs, ResolveArgs, ResolveFormat};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
