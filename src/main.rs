use guest_stay_lambda_rust::config::Config;
use guest_stay_lambda_rust::handler::handler;
use lambda_runtime::{service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    let config = Config::from_env()?;
    let config = &config;

    lambda_runtime::run(service_fn(move |event| async move { handler(event, config).await })).await
}
