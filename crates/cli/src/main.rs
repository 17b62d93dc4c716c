mod commands;

use clap::{Parser, Subcommand};
use roster_orm::logging::init_logging;
use roster_orm::{ProjectionConfig, RecordKind};

use commands::ProjectionArgs;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Project person records by level or attribute paths")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one record
    Show {
        /// Record kind: person, address, contact, role or permission
        kind: RecordKind,

        /// Record id
        id: i64,

        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// List every record of a kind
    List {
        /// Record kind: person, address, contact, role or permission
        kind: RecordKind,

        #[command(flatten)]
        projection: ProjectionArgs,

        /// Flat person listing with relation counts
        #[arg(long)]
        summary: bool,
    },

    /// Print the fetch plan for a request without fetching
    Plan {
        /// Root record kind
        kind: RecordKind,

        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// Print the relationship schema
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ProjectionConfig::from_env()?;
    init_logging(&config.logging_config()).map_err(|e| anyhow::anyhow!(e))?;
    tracing::debug!("Running in {} environment", config.environment);

    match cli.command {
        Commands::Show { kind, id, projection } => {
            commands::show::show(kind, id, &projection, &config).await?;
        }
        Commands::List { kind, projection, summary } => {
            commands::show::list(kind, &projection, summary, &config).await?;
        }
        Commands::Plan { kind, projection } => {
            commands::plan::plan(kind, &projection, &config)?;
        }
        Commands::Schema => {
            commands::schema::schema()?;
        }
    }

    Ok(())
}
