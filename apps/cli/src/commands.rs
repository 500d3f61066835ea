use crate::args::{ClientCommand, Cli, Command, CreateClient, NavCommand, Target};
use anyhow::{Context, Result, bail};
use pforge::domain::brand::{BrandPalette, ClientBrandConfig};
use pforge::domain::config::EngineConfig;
use pforge::domain::{ConfigMap, Value};
use pforge::features::navigation::NavigationGraph;
use pforge::features::session::EditorSession;
use pforge::{Platform, bootstrap};
use pforge_gateway::FileGateway;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Executes one command against the store configured in `config`.
///
/// # Errors
/// Bootstrap, store and gateway failures, a failed save, or a dependency check that
/// did not pass.
pub async fn run(cli: &Cli, mut config: EngineConfig, out: &mut impl Write) -> Result<()> {
    if let Some(store) = &cli.store {
        config.store.root.clone_from(store);
    }
    let platform = bootstrap(&config).context("Bootstrap failed")?;

    match &cli.command {
        Command::Screens => screens(&platform, out),
        Command::Validate => validate(&platform, out),
        Command::Client(command) => client(&config, command, out).await,
        Command::Resolve { target, json } => resolve(&platform, &config, target, *json, out).await,
        Command::Save { target, assignments } => save(&platform, &config, target, assignments, out).await,
        Command::Nav(command) => nav(&platform, &config, command, out).await,
        Command::Preview { target } => preview(&platform, &config, target, out).await,
    }
}

async fn open_store(config: &EngineConfig) -> Result<Arc<FileGateway>> {
    let gateway = FileGateway::open(&config.store.root)
        .await
        .with_context(|| format!("Cannot open store at {}", config.store.root.display()))?;
    Ok(Arc::new(gateway))
}

async fn activate(
    platform: &Platform,
    config: &EngineConfig,
    target: &Target,
) -> Result<EditorSession<FileGateway>> {
    let gateway = open_store(config).await?;
    let mut session = platform.open_session(gateway, &target.client_id).await?;
    session.activate(&target.screen_id).await?;
    Ok(session)
}

fn screens(platform: &Platform, out: &mut impl Write) -> Result<()> {
    for screen in platform.registry().list_all() {
        let mut flags = Vec::new();
        if screen.is_entry() {
            flags.push("entry");
        }
        if screen.owns_brand_colors() {
            flags.push("brand");
        }
        writeln!(
            out,
            "{:<10} {:<12} {:<10} deps: {}",
            screen.id,
            screen.metadata.display_name,
            flags.join(","),
            screen.dependencies.join(", ")
        )?;
    }
    Ok(())
}

fn validate(platform: &Platform, out: &mut impl Write) -> Result<()> {
    let report = platform.validator().validate_all();
    for (screen_id, missing) in &report.failures {
        writeln!(out, "{screen_id}: missing {}", missing.join(", "))?;
    }
    if !report.is_ok() {
        bail!("{} of {} screens have unregistered dependencies", report.failures.len(), report.checked);
    }
    writeln!(out, "{} screens, all dependencies registered", report.checked)?;
    Ok(())
}

async fn client(config: &EngineConfig, command: &ClientCommand, out: &mut impl Write) -> Result<()> {
    let gateway = open_store(config).await?;
    match command {
        ClientCommand::Create(args) => {
            gateway.create_client(brand(args)).await?;
            info!(client_id = %args.client_id, "Client created");
            writeln!(out, "created {}", args.client_id)?;
        },
        ClientCommand::List => {
            for client_id in gateway.list_clients().await? {
                writeln!(out, "{client_id}")?;
            }
        },
        ClientCommand::Delete { client_id } => {
            let removed = gateway.delete_client(client_id).await?;
            writeln!(out, "deleted {client_id} ({removed} overrides)")?;
        },
    }
    Ok(())
}

fn brand(args: &CreateClient) -> ClientBrandConfig {
    ClientBrandConfig {
        client_id: args.client_id.clone(),
        app_name: args.app_name.clone(),
        logo_url: args.logo_url.clone(),
        palette: BrandPalette {
            primary: args.primary.clone(),
            secondary: args.secondary.clone(),
            accent: args.accent.clone(),
            background: args.background.clone(),
        },
        approach_id: args.approach.clone(),
    }
}

async fn resolve(
    platform: &Platform,
    config: &EngineConfig,
    target: &Target,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let session = activate(platform, config, target).await?;
    let resolved = session.active().context("No active screen")?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(resolved)?)?;
        return Ok(());
    }
    write_config(&resolved.config, out)?;
    if resolved.degraded {
        writeln!(out, "# degraded: saved override unavailable")?;
    }
    Ok(())
}

fn write_config(config: &ConfigMap, out: &mut impl Write) -> Result<()> {
    for (key, value) in config {
        match value {
            Value::String(s) => writeln!(out, "{key} = {s}")?,
            other => writeln!(out, "{key} = {other}")?,
        }
    }
    Ok(())
}

async fn save(
    platform: &Platform,
    config: &EngineConfig,
    target: &Target,
    assignments: &[(String, Value)],
    out: &mut impl Write,
) -> Result<()> {
    let mut session = activate(platform, config, target).await?;
    for (key, value) in assignments {
        session.edit(key, value.clone())?;
    }
    if !session.save().await? {
        bail!("Saving {}/{} failed", target.client_id, target.screen_id);
    }
    writeln!(out, "saved {}/{} ({} keys)", target.client_id, target.screen_id, assignments.len())?;
    Ok(())
}

async fn nav(
    platform: &Platform,
    config: &EngineConfig,
    command: &NavCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        NavCommand::Show { target } => {
            let session = activate(platform, config, target).await?;
            let graph = session.graph().context("No active screen")?;
            write_edges(graph, out)
        },
        NavCommand::Set { target, element_id, target_screen_id } => {
            let mut session = activate(platform, config, target).await?;
            session.set_edge(element_id, target_screen_id.as_deref())?;
            if !session.save().await? {
                bail!("Saving navigation of {}/{} failed", target.client_id, target.screen_id);
            }
            match target_screen_id {
                Some(to) => writeln!(out, "{element_id} -> {to}")?,
                None => writeln!(out, "{element_id} removed")?,
            }
            Ok(())
        },
    }
}

fn write_edges(graph: &NavigationGraph, out: &mut impl Write) -> Result<()> {
    for edge in graph.edges() {
        let state = if edge.enabled { "" } else { " (disabled)" };
        writeln!(out, "{} -> {}{state}", edge.element_id, edge.target_screen_id)?;
    }
    Ok(())
}

async fn preview(
    platform: &Platform,
    config: &EngineConfig,
    target: &Target,
    out: &mut impl Write,
) -> Result<()> {
    let session = activate(platform, config, target).await?;
    write!(out, "{}", session.preview()?)?;
    Ok(())
}
