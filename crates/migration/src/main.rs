use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

#[derive(Debug, Parser)]
#[command(name = "fintrack-migrate", version, about = "Manage the fintrack database schema")]
struct Cli {
    /// Connection string of the database to migrate.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./fintrack.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Apply every pending migration.
    Up,
    /// Roll back the most recent migrations.
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Roll back everything, then apply again.
    Refresh,
    /// Drop all tables, then apply every migration.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

async fn apply(db: &DatabaseConnection, command: Command) -> Result<(), DbErr> {
    match command {
        Command::Up => Migrator::up(db, None).await,
        Command::Down { steps } => Migrator::down(db, Some(steps)).await,
        Command::Refresh => Migrator::refresh(db).await,
        Command::Fresh => Migrator::fresh(db).await,
        Command::Status => Migrator::status(db).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Up);

    let db = Database::connect(&cli.database_url).await?;
    apply(&db, command).await?;

    Ok(())
}
