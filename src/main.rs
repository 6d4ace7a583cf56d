use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use black_croz::api::{self, ServerConfig};
use black_croz::db::Database;

#[derive(Parser)]
#[command(name = "black-croz")]
#[command(about = "Black Croz storefront: content API and static site")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server options when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Seed empty collections with demo content and exit
    Seed {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[derive(Args, Clone)]
struct DatabaseArgs {
    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, env = "BLACK_CROZ_DATABASE")]
    database: Option<PathBuf>,
}

impl DatabaseArgs {
    fn open(&self) -> anyhow::Result<Database> {
        let db = match &self.database {
            Some(path) => Database::open(path.clone())
                .with_context(|| format!("Failed to open database at {}", path.display()))?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

#[derive(Args, Clone)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "BLACK_CROZ_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port for HTTP
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Directory with the built front end
    #[arg(long, env = "BLACK_CROZ_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// Skip seeding empty collections on startup
    #[arg(long)]
    no_seed: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "black_croz=debug,black_croz_core=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let db = args.database.open()?;

    if !args.no_seed {
        // Seeding problems are logged; the API still serves whatever is stored
        if let Err(e) = db.seed_if_empty() {
            tracing::error!("Seeding error: {:#}", e);
        }
    }

    if !args.public_dir.is_dir() {
        tracing::warn!(
            "Public directory {} not found, static pages will 404",
            args.public_dir.display()
        );
    }

    let config = ServerConfig::from_env().with_public_dir(&args.public_dir);
    let app = api::create_router(db, &config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Black Croz server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await?,
        Some(Commands::Seed { database }) => {
            let db = database.open()?;
            let report = db.seed_if_empty()?;
            if report.is_empty() {
                println!("Collections already populated, nothing to seed");
            } else {
                println!(
                    "Seeded {} collection items and {} lookbook images",
                    report.collection_items, report.lookbook_images
                );
            }
        }
        // Default: start server
        None => serve(cli.serve).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_command_takes_server_options() {
        let cli = Cli::try_parse_from(["black-croz", "--port", "8080", "--no-seed", "--host", "127.0.0.1"])
            .expect("Failed to parse");

        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, 8080);
        assert!(cli.serve.no_seed);
        assert_eq!(cli.serve.host, "127.0.0.1");
    }

    #[test]
    fn bare_command_rejects_a_bad_port() {
        assert!(Cli::try_parse_from(["black-croz", "--port", "abc"]).is_err());
        assert!(Cli::try_parse_from(["black-croz", "serve", "--port", "abc"]).is_err());
    }

    #[test]
    fn server_options_conflict_with_subcommands() {
        assert!(Cli::try_parse_from(["black-croz", "--port", "8080", "seed"]).is_err());
    }

    #[test]
    fn serve_subcommand_parses_its_own_options() {
        let cli = Cli::try_parse_from(["black-croz", "serve", "--port", "9000"]).expect("Failed to parse");

        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.port, 9000),
            _ => panic!("expected serve subcommand"),
        }
    }

    #[test]
    fn server_options_read_the_environment() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("host").as_deref(), Some("BLACK_CROZ_HOST"));
        assert_eq!(env_of("port").as_deref(), Some("PORT"));
        assert_eq!(env_of("public_dir").as_deref(), Some("BLACK_CROZ_PUBLIC_DIR"));
        assert_eq!(env_of("database").as_deref(), Some("BLACK_CROZ_DATABASE"));
    }

    #[test]
    fn binds_all_interfaces_by_default() {
        let host = Cli::command()
            .get_arguments()
            .find(|arg| arg.get_id() == "host")
            .and_then(|arg| arg.get_default_values().first().cloned())
            .map(|value| value.to_string_lossy().into_owned());

        assert_eq!(host.as_deref(), Some("0.0.0.0"));
    }
}
