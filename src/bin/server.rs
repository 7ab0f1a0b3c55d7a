use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use custview::server::{DatabaseConfig, ServerConfig, run_server};

#[derive(Parser, Debug)]
#[command(version, about = "Serve the customers table over http")]
struct Args {
    #[arg(long, env = "CUSTVIEW_LISTEN", default_value = "0.0.0.0:3001")]
    listen: SocketAddr,

    #[arg(long, env = "CUSTVIEW_DB_HOST", default_value = "localhost")]
    db_host: String,

    #[arg(long, env = "CUSTVIEW_DB_PORT", default_value_t = 5432)]
    db_port: u16,

    #[arg(long, env = "CUSTVIEW_DB_USER", default_value = "postgres")]
    db_user: String,

    #[arg(long, env = "CUSTVIEW_DB_PASSWORD", hide_env_values = true)]
    db_password: Option<String>,

    #[arg(long, env = "CUSTVIEW_DB_NAME", default_value = "newdb")]
    db_name: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            listen: args.listen,
            database: DatabaseConfig {
                host: args.db_host,
                port: args.db_port,
                user: args.db_user,
                password: args.db_password,
                name: args.db_name,
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run_server(args.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
