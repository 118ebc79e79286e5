//! `jsonapi-bootstrap`: brings up an account on a running anytype-heart server
//! and prints the JSON API bearer key.

use std::io::{self, Write};

use clap::Parser;
use eyre::WrapErr;
use jsonapi_bootstrap_core::{ensure_spaces, logger, rpc::GrpcClient, Bootstrapper};
use tracing::info;

mod args;
mod duration;
mod report;

use args::Cli;
use report::StdoutReporter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level)?;

    let grpc_addr = cli.grpc.clone();
    let (config, readiness) = cli.into_configs();
    config.validate()?;

    let client = GrpcClient::connect(&grpc_addr, config.timeout).await?;
    info!(addr = %grpc_addr, "connected to gRPC");

    let mut bootstrapper =
        Bootstrapper::new(client, config)?.with_reporter(StdoutReporter::new(io::stdout()));
    let credentials = bootstrapper
        .run()
        .await
        .wrap_err("failed to bootstrap account")?;

    let mut stdout = io::stdout();
    report::write_ready(&mut stdout, &credentials, &readiness.json_api_addr)?;
    stdout.flush()?;

    let poller = readiness.poller();
    let (outcome, credentials) = ensure_spaces(&mut bootstrapper, &poller, credentials)
        .await
        .wrap_err("failed to restart account")?;
    report::write_readiness(&mut stdout, &outcome, &credentials, readiness.wait)?;
    stdout.flush()?;

    Ok(())
}
