use anyhow::Context;
use streamcheck_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("reading configuration from environment")?;
    engine_logging::initialize(&config.log);
    streamcheck_server::serve(config).await
}
