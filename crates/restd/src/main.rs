use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use restd::server::{self, Gateway};

#[derive(Parser, Debug)]
#[command(name = "restd", version, about = "REST gateway for the confd configuration daemon")]
struct Args {
    /// Where the server is started, <interface:port>.
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Location prefix of the API.
    #[arg(long, default_value = "/api")]
    api_prefix: String,

    /// URL of the confd daemon the gateway talks to.
    #[arg(long, default_value = confd::ANONYMOUS_LOCAL_URL)]
    confd_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("Starting restd...");

    let gateway = Gateway::new(args.confd_url, args.api_prefix);
    if let Err(err) = server::serve(gateway, args.listen).await {
        tracing::error!("can't start server: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
