use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use recents_history::{Catalog, Product};
use std::path::PathBuf;

mod launch;
mod list;
mod process;

#[derive(Parser)]
#[command(name = "recents")]
#[command(about = "Recently opened IDE projects for the launcher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Product catalog file
    #[arg(long, global = true, default_value = "products.json")]
    catalog: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent projects for a product, ranked against the query
    Ls {
        /// Product keyword from the catalog
        keyword: String,

        /// The query typed into the launcher
        query: String,
    },

    /// Remove a project from a product's history
    Rm {
        /// Product keyword from the catalog
        keyword: String,

        /// History path of the project to remove
        path: String,
    },

    /// Activate a product and launch it with optional arguments
    Open {
        /// Product keyword from the catalog
        keyword: String,

        /// Arguments passed through to the product
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let catalog = Catalog::load(&cli.catalog)?;
    match cli.command {
        Commands::Ls { keyword, query } => run_ls(catalog.get(&keyword)?, &query),
        Commands::Rm { keyword, path } => run_rm(catalog.get(&keyword)?, &path),
        Commands::Open { keyword, args } => {
            launch::activate_and_open(catalog.get(&keyword)?, &args)
        }
    }
}

/// The launcher must always receive a valid document from `ls`: recoverable
/// history failures degrade to a placeholder item. Parse errors do not;
/// corrupted history is surfaced, not papered over.
fn run_ls(product: &Product, query: &str) -> Result<()> {
    let output = match recents_history::recent_projects(product) {
        Ok(records) => {
            let running = process::is_running(&product.keyword);
            list::build(product, records, query, running)
        }
        Err(err) if err.is_recoverable() => {
            warn!("{err}");
            list::placeholder(product, &err)
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", output.to_json()?);
    Ok(())
}

fn run_rm(product: &Product, path: &str) -> Result<()> {
    if process::is_running(&product.keyword) {
        anyhow::bail!(
            "{} is running; quit it before removing recent projects",
            product.name()
        );
    }

    let file = recents_history::recent_projects_file(product)?;
    if recents_history::remove_entry(&file, path)? {
        info!("removed '{path}' from the {} history", product.name());
        println!("Removed {path}");
    } else {
        println!("{path} is not in the {} recent projects list", product.name());
    }
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    }
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
