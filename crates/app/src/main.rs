use chrono_tz::Tz;
use engine::NewUser;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fintrack={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let timezone: Tz = server
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone {}: {err}", server.timezone))?;

    let db = parse_database(&server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    if server.demo_user {
        let demo = engine
            .ensure_user(NewUser {
                email: "demo@findash.com".to_string(),
                password: "password".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                currency: None,
            })
            .await?;
        tracing::info!("demo account {} ready", demo.email);
    }

    let listener = tokio::net::TcpListener::bind((server.bind.as_str(), server.port)).await?;
    server::run_with_listener(engine, timezone, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
