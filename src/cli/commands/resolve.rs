//! Resolve command implementation.
//!
//! The `apiconf resolve` command picks the environment for a hostname,
//! publishes the selected configuration, and prints it.

use crate::cli::args::{ResolveArgs, ResolveFormat};
use crate::environment::{EnvironmentResolver, EnvironmentSource, HostnameDetector};
use crate::error::{ApiConfError, Result};
use crate::published::{ApiConfig, PublishedConfig};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand<'a> {
    context: CommandContext,
    published: &'a PublishedConfig,
    args: ResolveArgs,
}

impl<'a> ResolveCommand<'a> {
    /// Create a new resolve command.
    pub fn new(context: CommandContext, published: &'a PublishedConfig, args: ResolveArgs) -> Self {
        Self {
            context,
            published,
            args,
        }
    }

    fn detector(&self) -> HostnameDetector {
        HostnameDetector::new()
            .with_hostname(self.args.hostname.clone())
            .with_page_url(self.args.page_url.clone())
    }
}

/// Render a configuration in the requested format.
pub fn render(config: &ApiConfig, format: ResolveFormat) -> Result<String> {
    let rendered = match format {
        ResolveFormat::Json => serde_json::to_string_pretty(config.record())
            .map_err(|e| ApiConfError::Other(e.into()))?,
        ResolveFormat::Yaml => serde_yaml::to_string(config.record())
            .map_err(|e| ApiConfError::Other(e.into()))?
            .trim_end()
            .to_string(),
        ResolveFormat::Env => format!("API_BASE_URL={}", config.api_base_url()),
        ResolveFormat::Url => config.api_base_url().to_string(),
    };
    Ok(rendered)
}

impl Command for ResolveCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(layers) = self.context.load_layers(ui)? else {
            return Ok(CommandResult::failure(2));
        };

        let resolver = EnvironmentResolver::new(layers);
        let detector = self.detector();
        let hostname = detector.with_env(|key| self.context.env_var(key));
        let config = match resolver.resolve(self.args.env.as_deref(), &hostname) {
            Ok(config) => config,
            Err(e @ ApiConfError::UnknownEnvironment { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };
        let config = self.published.publish(config)?;

        if let EnvironmentSource::Hostname(reading) = config.source() {
            if reading.hostname.is_empty() {
                ui.warning(&format!(
                    "Empty hostname from {}, treating as {}",
                    reading.read_via,
                    config.environment()
                ));
            }
        }

        if self.args.explain {
            ui.show_header("API configuration");
            ui.field("environment", config.environment());
            ui.field("source", &config.source().to_string());
            ui.field("apiBaseUrl", config.api_base_url());
            ui.field("layer", config.layer());
        } else {
            ui.message(&render(config, self.args.format)?);
        }

        ui.success(&format!(
            "Resolved {} ({})",
            config.environment(),
            config.source()
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::ui::{MockUI, OutputMode};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn context(root: &Path) -> CommandContext {
        CommandContext::new(root).with_env(BTreeMap::<String, String>::new())
    }

    fn args_for(hostname: &str) -> ResolveArgs {
        ResolveArgs {
            hostname: Some(hostname.to_string()),
            ..Default::default()
        }
    }

    fn run(root: &Path, args: ResolveArgs) -> (Result<CommandResult>, MockUI, PublishedConfig) {
        let cell = PublishedConfig::new();
        let mut ui = MockUI::new();
        let result = ResolveCommand::new(context(root), &cell, args).execute(&mut ui);
        (result, ui, cell)
    }

    #[test]
    fn localhost_prints_development_json() {
        let temp = TempDir::new().unwrap();
        let (result, ui, cell) = run(temp.path(), args_for("localhost"));

        assert!(result.unwrap().success);
        insta::assert_snapshot!(ui.stdout(), @r###"
        {
          "apiBaseUrl": "http://localhost:5000"
        }
        "###);
        assert_eq!(cell.get().unwrap().environment(), "development");
    }

    #[test]
    fn deployed_host_prints_production_json() {
        let temp = TempDir::new().unwrap();
        let (result, ui, _) = run(temp.path(), args_for("kaam-asaasan.app"));

        assert!(result.unwrap().success);
        let value: serde_json::Value = serde_json::from_str(&ui.stdout()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"apiBaseUrl": "https://kaam-asaasan-api.herokuapp.com"})
        );
    }

    #[test]
    fn page_url_is_classified() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            page_url: Some("http://127.0.0.1:5500/index.html".to_string()),
            format: ResolveFormat::Url,
            ..Default::default()
        };
        let (result, ui, _) = run(temp.path(), args);

        assert!(result.unwrap().success);
        assert_eq!(ui.stdout(), "http://localhost:5000");
    }

    #[test]
    fn env_format() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            format: ResolveFormat::Env,
            ..args_for("example.com")
        };
        let (_, ui, _) = run(temp.path(), args);
        assert_eq!(
            ui.stdout(),
            "API_BASE_URL=https://kaam-asaasan-api.herokuapp.com"
        );
    }

    #[test]
    fn yaml_format() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            format: ResolveFormat::Yaml,
            ..args_for("localhost")
        };
        let (_, ui, _) = run(temp.path(), args);
        assert!(ui.stdout().starts_with("apiBaseUrl:"));
        let record: crate::config::ConfigurationRecord = serde_yaml::from_str(&ui.stdout()).unwrap();
        assert_eq!(record.api_base_url, "http://localhost:5000");
    }

    #[test]
    fn explain_shows_fields() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            explain: true,
            ..args_for("kaam-asaasan.app")
        };
        let (_, ui, _) = run(temp.path(), args);

        assert_eq!(ui.field_value("environment"), Some("production"));
        assert_eq!(
            ui.field_value("source"),
            Some("hostname 'kaam-asaasan.app' via --hostname")
        );
        assert_eq!(ui.field_value("layer"), Some("builtin"));
        assert_eq!(ui.headers(), &["API configuration".to_string()]);
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn empty_hostname_warns_and_uses_production() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            format: ResolveFormat::Url,
            ..args_for("")
        };
        let (_, ui, _) = run(temp.path(), args);

        assert_eq!(ui.stdout(), "https://kaam-asaasan-api.herokuapp.com");
        assert!(ui.warnings()[0].contains("Empty hostname"));
    }

    #[test]
    fn success_status_names_environment() {
        let temp = TempDir::new().unwrap();
        let (_, ui, _) = run(temp.path(), args_for("localhost"));
        assert!(ui.successes()[0].contains("development"));
    }

    #[test]
    fn quiet_mode_prints_result_only() {
        let temp = TempDir::new().unwrap();
        let cell = PublishedConfig::new();
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ResolveCommand::new(context(temp.path()), &cell, args_for("localhost"))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.successes().is_empty());
        assert!(!ui.messages().is_empty());
    }

    #[test]
    fn env_flag_selects_without_hostname() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            env: Some("production".to_string()),
            format: ResolveFormat::Url,
            ..args_for("localhost")
        };
        let (_, ui, _) = run(temp.path(), args);
        assert_eq!(ui.stdout(), "https://kaam-asaasan-api.herokuapp.com");
    }

    #[test]
    fn unknown_env_exits_with_2() {
        let temp = TempDir::new().unwrap();
        let args = ResolveArgs {
            env: Some("staging".to_string()),
            ..Default::default()
        };
        let (result, ui, cell) = run(temp.path(), args);

        assert_eq!(result.unwrap().exit_code, 2);
        assert!(ui.errors()[0].contains("staging"));
        assert!(!cell.is_published());
    }

    #[test]
    fn project_config_overrides_production() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            "environments:\n  production:\n    api_base_url: https://api.example.com\n",
        )
        .unwrap();

        let args = ResolveArgs {
            format: ResolveFormat::Url,
            ..args_for("kaam-asaasan.app")
        };
        let (_, ui, _) = run(temp.path(), args);
        assert_eq!(ui.stdout(), "https://api.example.com");
    }

    #[test]
    fn hostname_and_override_come_from_context_env() {
        let temp = TempDir::new().unwrap();
        let cell = PublishedConfig::new();
        let mut ui = MockUI::new();
        let context = context(temp.path()).with_env([
            ("APICONF_HOSTNAME", "127.0.0.1"),
            ("APICONF_DEVELOPMENT_API_BASE_URL", "http://localhost:8080"),
        ]);
        let args = ResolveArgs {
            format: ResolveFormat::Url,
            ..Default::default()
        };

        let result = ResolveCommand::new(context, &cell, args).execute(&mut ui);

        assert!(result.unwrap().success);
        assert_eq!(ui.stdout(), "http://localhost:8080");
        assert_eq!(cell.get().unwrap().layer(), "environment");
    }

    #[test]
    fn missing_hostname_is_an_error() {
        let temp = TempDir::new().unwrap();
        let (result, _, cell) = run(temp.path(), ResolveArgs::default());
        assert!(matches!(
            result,
            Err(ApiConfError::HostnameUnavailable { .. })
        ));
        assert!(!cell.is_published());
    }

    #[test]
    fn broken_config_exits_with_2() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "environments: [").unwrap();

        let (result, ui, _) = run(temp.path(), args_for("localhost"));
        assert_eq!(result.unwrap().exit_code, 2);
        assert_eq!(ui.errors().len(), 1);
    }
}
