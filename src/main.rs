use clap::Parser;

use deepgate::config::{Cli, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    deepgate::proxy::init_tracing();

    let cli = Cli::parse();
    let bind = cli.bind.clone();
    deepgate::proxy::server::run(&bind, GatewayConfig::from(cli)).await
}
