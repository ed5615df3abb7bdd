//! Permalink Command Line Interface
//!
//! Inspect a route file and resolve the permalinks of JSON-described objects.

mod object;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use permalink::{AttemptOutcome, PermalinkResolver};
use permalink_route_registry::{RouteTable, RoutesConfig, ROUTES_ENV_VAR};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "permalink")]
#[command(about = "Resolve canonical addresses from named route declarations", long_about = None)]
#[command(version)]
struct Cli {
    /// Route file (TOML); falls back to $PERMALINK_ROUTES
    #[arg(long, global = true, value_name = "PATH")]
    routes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared routes and their parameters
    Routes,
    /// Print the permalink of an object
    Resolve(ObjectArgs),
    /// Show how every candidate route fared for an object
    Explain(ObjectArgs),
}

#[derive(Args)]
struct ObjectArgs {
    /// JSON file describing the object: {"type": ..., "attributes": {...}}
    #[arg(long, value_name = "PATH")]
    object: PathBuf,

    /// Route name to use instead of <type>_permalink
    #[arg(long)]
    route: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let table = load_table(cli.routes)?;

    match cli.command {
        Commands::Routes => list_routes(&table),
        Commands::Resolve(args) => resolve(table, &args)?,
        Commands::Explain(args) => explain(table, &args)?,
    }

    Ok(())
}

fn load_table(routes: Option<PathBuf>) -> Result<RouteTable> {
    let path = routes.or_else(RoutesConfig::default_path).with_context(|| {
        format!("No route file given; pass --routes or set {ROUTES_ENV_VAR}")
    })?;
    debug!(path = %path.display(), "resolved route file");

    let config = RoutesConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load routes from {}", path.display()))?;
    let table = config
        .into_table()
        .with_context(|| format!("Invalid route declaration in {}", path.display()))?;

    info!(routes = table.len(), "route table ready");
    Ok(table)
}

fn list_routes(table: &RouteTable) {
    for name in table.route_names() {
        println!("{name}");
        for entry in table.entries(name.as_str()) {
            let pattern = entry.pattern();
            println!(
                "  {}{}  [{}]  ({})",
                entry.prefix(),
                pattern.template(),
                pattern.parameters().join(", "),
                pattern.source()
            );
        }
    }
}

fn resolve(table: RouteTable, args: &ObjectArgs) -> Result<()> {
    let record = object::load_record(&args.object)?;
    let resolver = PermalinkResolver::new(table);

    let address = resolver.resolve(&record, args.route.as_deref())?;
    println!("{address}");
    Ok(())
}

fn explain(table: RouteTable, args: &ObjectArgs) -> Result<()> {
    let record = object::load_record(&args.object)?;
    let resolver = PermalinkResolver::new(table);

    let explanation = resolver.explain(&record, args.route.as_deref())?;
    let selected = explanation.selected().map(|attempt| attempt.index);

    println!("route: {}", explanation.route);
    println!("object: {}", explanation.type_name);
    for attempt in &explanation.attempts {
        let marker = if Some(attempt.index) == selected { "*" } else { " " };
        let status = match &attempt.outcome {
            AttemptOutcome::Generated(address) => format!("ok       {address}"),
            AttemptOutcome::MissingAttribute(err) => format!("skipped  {err}"),
            AttemptOutcome::GenerationFailed(err) => format!("rejected {err}"),
        };
        println!(
            "{marker} #{} [{}] {status}",
            attempt.index,
            attempt.parameters.join(", ")
        );
    }

    let address = explanation.into_result()?;
    println!("permalink: {address}");
    Ok(())
}
