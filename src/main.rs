use bucketlist::config::Config;
use bucketlist::engine::Engine;
use bucketlist::error::Error;
use bucketlist::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "starting");

    let engine = Engine::from_config(&config)?;

    serve(engine, config.listen_addr).await
}
