use clap::Parser;
use pforge::domain::config::EngineConfig;
use pforge_cli::{Cli, run};
use tempfile::TempDir;

struct Store {
    dir: TempDir,
}

impl Store {
    fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let root = self.dir.path().to_str().unwrap().to_owned();
        let mut argv = vec!["pforge", "--store", root.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;

        let mut out = Vec::new();
        run(&cli, EngineConfig::default(), &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    async fn ok(&self, args: &[&str]) -> String {
        self.run(args).await.unwrap()
    }

    async fn with_client(self) -> Self {
        self.ok(&[
            "client", "create", "acme", "--app-name", "Acme", "--logo-url", "https://cdn/acme.png",
            "--primary", "#0055AA", "--background", "#FFFFFF",
        ])
        .await;
        self
    }
}

#[tokio::test]
async fn lists_builtin_screens() {
    let out = Store::new().ok(&["screens"]).await;
    let ids: Vec<_> = out.lines().filter_map(|l| l.split_whitespace().next()).collect();
    assert_eq!(ids, ["logo", "login", "home", "menu", "profile", "cards"]);
    assert!(out.lines().next().unwrap().contains("entry,brand"));
}

#[tokio::test]
async fn validate_passes_for_the_builtin_catalog() {
    let out = Store::new().ok(&["validate"]).await;
    assert_eq!(out.trim(), "6 screens, all dependencies registered");
}

#[tokio::test]
async fn client_lifecycle() {
    let store = Store::new().with_client().await;
    assert_eq!(store.ok(&["client", "list"]).await.trim(), "acme");
    assert!(store.run(&["client", "create", "acme"]).await.is_err());

    store.ok(&["save", "acme", "home", "--set", "top_bar_title=Hi"]).await;
    let out = store.ok(&["client", "delete", "acme"]).await;
    assert_eq!(out.trim(), "deleted acme (1 overrides)");
    assert_eq!(store.ok(&["client", "list"]).await, "");
}

#[tokio::test]
async fn save_then_resolve_layers_brand_over_override() {
    let store = Store::new().with_client().await;
    store
        .ok(&["save", "acme", "home", "--set", "top_bar_title=Hello", "--set", "primary_color=#FF0000"])
        .await;

    let out = store.ok(&["resolve", "acme", "home"]).await;
    assert!(out.contains("top_bar_title = Hello"));
    assert!(out.contains("primary_color = #0055AA"));
    assert!(!out.contains("#FF0000"));

    let json: serde_json::Value =
        serde_json::from_str(&store.ok(&["resolve", "acme", "home", "--json"]).await).unwrap();
    assert_eq!(json["config"]["top_bar_title"], "Hello");
    assert_eq!(json["degraded"], false);
}

#[tokio::test]
async fn saving_the_brand_screen_updates_every_screen() {
    let store = Store::new().with_client().await;
    store.ok(&["save", "acme", "logo", "--set", "primary_color=#00AA00"]).await;

    let home = store.ok(&["resolve", "acme", "home"]).await;
    assert!(home.contains("primary_color = #00AA00"));
}

#[tokio::test]
async fn navigation_set_show_and_clear() {
    let store = Store::new().with_client().await;
    assert_eq!(store.ok(&["nav", "set", "acme", "home", "help_button", "faq"]).await.trim(), "help_button -> faq");

    let edges = store.ok(&["nav", "show", "acme", "home"]).await;
    assert!(edges.contains("help_button -> faq"));
    assert!(edges.contains("menu_button -> menu"));

    store.ok(&["nav", "set", "acme", "home", "help_button"]).await;
    assert!(!store.ok(&["nav", "show", "acme", "home"]).await.contains("help_button"));
}

#[tokio::test]
async fn preview_fills_inherited_colors() {
    let store = Store::new().with_client().await;
    let out = store.ok(&["preview", "acme", "cards"]).await;
    assert!(out.starts_with("== Cards ==\n"));
    assert!(out.contains("tile_bg_color: #FFFFFF"));
    assert!(out.contains("continue_button_color: #0055AA"));
}

#[tokio::test]
async fn unknown_screen_is_an_error() {
    let store = Store::new().with_client().await;
    assert!(store.run(&["resolve", "acme", "ghost"]).await.is_err());
}
