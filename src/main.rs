//! autoroute command line.
//!
//! ```text
//! autoroute routes [--json]   print the route table
//! autoroute check             report handlers, routes and skipped modules
//! autoroute watch             print the table again whenever the package changes
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use autoroute::config::watcher::RouteWatcher;
use autoroute::lifecycle::{build_routes, load_startup_config};
use autoroute::lifecycle::signals::shutdown_signal;
use autoroute::observability::init_logging;
use autoroute::routing::{Generation, LiveRoutes, RouteTable};

#[derive(Parser)]
#[command(name = "autoroute")]
#[command(about = "Generate URL routes from a tree of handler modules", long_about = None)]
struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Package directory, overriding the configuration.
    #[arg(short, long, global = true)]
    package: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table
    Routes {
        /// Print JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },
    /// Report handlers, routes and modules that failed to load
    Check,
    /// Regenerate and print the table whenever the package changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_startup_config(cli.config.as_deref())?;
    if let Some(path) = cli.package {
        config.package.path = path;
        config.package.name = None;
    }

    init_logging(&config.observability.log_level);
    tracing::debug!(package = %config.package.path.display(), "Configuration loaded");

    match cli.command {
        Commands::Routes { json } => {
            let generation = build_routes(&config)?;
            print_table(&generation.table, json)?;
        }
        Commands::Check => {
            let generation = build_routes(&config)?;
            return Ok(report(&generation));
        }
        Commands::Watch => {
            let generation = build_routes(&config)?;
            let live = LiveRoutes::new(generation.table);
            print_table(&live.snapshot(), false)?;

            let (watcher, mut updates) = RouteWatcher::new(config);
            let _watcher = watcher.run()?;

            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);
            loop {
                tokio::select! {
                    Some(generation) = updates.recv() => {
                        let epoch = live.replace(generation.table);
                        tracing::info!(
                            epoch,
                            routes = live.snapshot().len(),
                            "Route table replaced"
                        );
                        print_table(&live.snapshot(), false)?;
                    }
                    _ = &mut shutdown => break,
                }
            }
            tracing::info!("Watch stopped");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_table(table: &RouteTable, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else {
        print!("{}", table);
    }
    Ok(())
}

fn report(generation: &Generation) -> ExitCode {
    println!("handlers: {}", generation.handlers.len());
    for handler in &generation.handlers {
        let routes = generation.table.patterns_for(&handler.qualified_name()).len();
        println!("  {} ({} routes)", handler.qualified_name(), routes);
    }
    println!("routes: {}", generation.table.len());

    if generation.skipped.is_empty() {
        return ExitCode::SUCCESS;
    }
    eprintln!("skipped modules: {}", generation.skipped.len());
    for (module, error) in &generation.skipped {
        eprintln!("  {}: {}", module, error);
    }
    ExitCode::FAILURE
}
