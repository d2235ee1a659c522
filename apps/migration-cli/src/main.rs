use clap::{Parser, ValueEnum};
use migration::{ConnectOptions, Database, MigrationCommand};

#[derive(Clone, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Courtroom database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database URL override; falls back to DATABASE_URL
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

    let url = match args.url.or_else(|| std::env::var("DATABASE_URL").ok()) {
        Some(url) => url,
        None => {
            eprintln!("❌ DATABASE_URL must be set (or pass --url)");
            std::process::exit(1);
        }
    };

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);

    let db = match Database::connect(opts).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, args.command.into()).await {
        eprintln!("❌ Migration failed: {e}");
        std::process::exit(1);
    }
}
