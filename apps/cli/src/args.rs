use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// Operator front end for screen configuration and navigation.
#[derive(Debug, Parser)]
#[command(name = "pforge", version, about)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML). Defaults to an optional `pforge.*`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store root, overriding `store.root`.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log level, overriding `logging.level`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists registered screens in registration order.
    Screens,
    /// Checks that every declared screen dependency is registered.
    Validate,
    /// Manages client brands.
    #[command(subcommand)]
    Client(ClientCommand),
    /// Prints the effective configuration of a screen.
    Resolve {
        #[command(flatten)]
        target: Target,
        /// Emit JSON instead of `key = value` lines.
        #[arg(long)]
        json: bool,
    },
    /// Applies `key=value` edits to a screen and saves them.
    Save {
        #[command(flatten)]
        target: Target,
        /// `key=value`; the value is parsed as JSON and falls back to a plain string.
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment, required = true)]
        assignments: Vec<(String, Value)>,
    },
    /// Reads or edits screen navigation.
    #[command(subcommand)]
    Nav(NavCommand),
    /// Renders a text preview with inherited colors filled in.
    Preview {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Debug, Args)]
pub struct Target {
    pub client_id: String,
    pub screen_id: String,
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Creates a client brand.
    Create(CreateClient),
    /// Lists stored clients.
    List,
    /// Deletes a client and every saved override.
    Delete { client_id: String },
}

#[derive(Debug, Args)]
pub struct CreateClient {
    pub client_id: String,
    #[arg(long, default_value = "")]
    pub app_name: String,
    #[arg(long, default_value = "")]
    pub logo_url: String,
    #[arg(long, default_value = "")]
    pub primary: String,
    #[arg(long, default_value = "")]
    pub secondary: String,
    #[arg(long, default_value = "")]
    pub accent: String,
    #[arg(long, default_value = "")]
    pub background: String,
    #[arg(long)]
    pub approach: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum NavCommand {
    /// Lists the navigation edges of a screen.
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Points an element at a target screen; omit the target to delete the edge.
    Set {
        #[command(flatten)]
        target: Target,
        element_id: String,
        target_screen_id: Option<String>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assignments_parse_json_then_fall_back_to_strings() {
        assert_eq!(parse_assignment("logo_size=96").unwrap(), ("logo_size".into(), json!(96)));
        assert_eq!(parse_assignment("show_avatar=false").unwrap(), ("show_avatar".into(), json!(false)));
        assert_eq!(parse_assignment("title=Hello there").unwrap(), ("title".into(), json!("Hello there")));
        assert_eq!(parse_assignment("primary_color=#FF0000").unwrap().1, json!("#FF0000"));
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from(["pforge", "--store", "/tmp/x", "nav", "set", "acme", "home", "menu_button"])
            .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Command::Nav(NavCommand::Set { target_screen_id: None, ref element_id, .. }) if element_id == "menu_button"
        ));
    }
}
