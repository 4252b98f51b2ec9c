use clap::Parser;
use migration::{migrate, MigrationCommand};
use sea_orm::Database;

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Escalation league database migration tool")]
struct Args {
    /// Migration command to run: up, down, fresh, reset, refresh, status
    command: String,

    /// Database URL; falls back to the DATABASE_URL environment variable
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.as_str() {
        "up" => MigrationCommand::Up,
        "down" => MigrationCommand::Down,
        "fresh" => MigrationCommand::Fresh,
        "reset" => MigrationCommand::Reset,
        "refresh" => MigrationCommand::Refresh,
        "status" => MigrationCommand::Status,
        other => {
            eprintln!("❌ Unknown command '{other}'. Expected one of: up, down, fresh, reset, refresh, status");
            std::process::exit(2);
        }
    };

    let url = match args.url.or_else(|| std::env::var("DATABASE_URL").ok()) {
        Some(url) => url,
        None => {
            eprintln!("❌ No database URL. Pass --url or set DATABASE_URL");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, command).await {
        eprintln!("❌ Migration failed: {e}");
        std::process::exit(1);
    }
}
