//! `scylla-gen`: TypeScript models from a live ScyllaDB schema.
//!
//! Reads `system_schema.columns` for a keyspace and writes one
//! cassandra-driver mapper model per table.

mod commands;
mod config;
mod format;
mod highlight;
mod sink;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing::debug;

use commands::Catalog;
use config::{ConnectionArgs, FileConfig, Settings};
use sink::{ConsoleSink, FileSink, OverwritePolicy, TerminalConfirm};

/// Generate typed cassandra-driver models from a ScyllaDB keyspace.
#[derive(Parser, Debug)]
#[command(name = "scylla-gen", version, about = "TypeScript models from ScyllaDB schemas")]
struct Cli {
    /// Config file (default: ./scylla-gen.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read catalog rows from a JSON fixture instead of a cluster.
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    connection: ConnectionFlags,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ConnectionFlags {
    /// Keyspace to read.
    #[arg(short, long, global = true, env = "DB_DEFAULT_KEYSPACE")]
    keyspace: Option<String>,

    /// Comma separated contact points.
    #[arg(long, global = true, env = "DB_CONTACT_POINTS", value_delimiter = ',')]
    contact_points: Vec<String>,

    #[arg(long, global = true, env = "DB_PORT")]
    port: Option<u16>,

    /// Preferred data center.
    #[arg(long, global = true, env = "DB_LOCAL_DATA_CENTER")]
    local_data_center: Option<String>,

    #[arg(long, global = true, env = "DB_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "DB_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl From<ConnectionFlags> for ConnectionArgs {
    fn from(flags: ConnectionFlags) -> Self {
        ConnectionArgs {
            keyspace: flags.keyspace,
            contact_points: flags.contact_points,
            port: flags.port,
            local_data_center: flags.local_data_center,
            username: flags.username,
            password: flags.password,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one model per table (all tables when none are named).
    Generate {
        tables: Vec<String>,

        /// Print models instead of writing them.
        #[arg(long)]
        print: bool,

        /// Replace existing files without asking.
        #[arg(short = 'y', long)]
        overwrite: bool,

        /// Run the formatter over the written files.
        #[arg(long)]
        format: bool,

        /// Models directory (default: src/models).
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Print CREATE TABLE statements.
    Inspect { tables: Vec<String> },

    /// Write db-client.ts and clustering-order.ts into the models directory.
    Init {
        #[arg(short = 'y', long)]
        overwrite: bool,

        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(dispatch(cli))
}

fn file_sink(dir: PathBuf, overwrite: bool) -> FileSink {
    let policy = if overwrite {
        OverwritePolicy::Always
    } else {
        OverwritePolicy::Ask
    };
    FileSink::new(dir, policy, Box::new(TerminalConfirm))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let file = FileConfig::discover(cli.config.as_deref())?;
    let highlight = std::io::stdout().is_terminal();

    match cli.command {
        Commands::Generate {
            tables,
            print,
            overwrite,
            format,
            out_dir,
        } => {
            let settings = Settings::resolve(cli.connection.into(), file, out_dir)?;
            debug!(keyspace = %settings.keyspace, out_dir = %settings.out_dir.display(), "resolved settings");
            let catalog = Catalog::open(&settings, cli.fixture.as_deref()).await?;

            let report = if print {
                let mut sink = ConsoleSink::new(std::io::stdout().lock(), highlight);
                commands::generate::generate(&catalog, &settings.keyspace, &tables, &mut sink)
                    .await?
            } else {
                let mut sink = file_sink(settings.out_dir.clone(), overwrite);
                commands::generate::generate(&catalog, &settings.keyspace, &tables, &mut sink)
                    .await?
            };
            let formatter = format.then_some(settings.formatter.as_str());
            let report = commands::generate::finish(report, formatter)?;

            if print {
                debug!(printed = report.printed, "printed models");
            } else {
                eprintln!(
                    "{} {} written, {} skipped",
                    "done:".green().bold(),
                    report.written.len(),
                    report.skipped.len()
                );
            }
        }

        Commands::Inspect { tables } => {
            let settings = Settings::resolve(cli.connection.into(), file, None)?;
            let catalog = Catalog::open(&settings, cli.fixture.as_deref()).await?;
            let mut sink = ConsoleSink::new(std::io::stdout().lock(), highlight);
            commands::inspect::inspect(&catalog, &settings.keyspace, &tables, &mut sink).await?;
        }

        Commands::Init { overwrite, out_dir } => {
            let dir = out_dir
                .or(file.out_dir)
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUT_DIR));
            let mut sink = file_sink(dir, overwrite);
            commands::init::init(&mut sink)?;
        }
    }

    Ok(())
}
