//! List command implementation.
//!
//! The `apiconf list` command shows every configured environment, its base
//! URL, and the layer that supplied it.

use crate::cli::args::ListArgs;
use crate::error::{ApiConfError, Result};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(layers) = self.context.load_layers(ui)? else {
            return Ok(CommandResult::failure(2));
        };
        let table = layers.resolve();

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&table).map_err(|e| ApiConfError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let mut rows = Table::new(["ENVIRONMENT", "API BASE URL", "SOURCE"]);
        for (name, record) in table.iter() {
            rows.add_row([
                name,
                record.api_base_url.as_str(),
                layers.source_of(name).unwrap_or("-"),
            ]);
        }
        ui.message(&rows.render());

        Ok(CommandResult::success())
    }
}
