use movieload::{config::Config, loader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieload=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        csv = %config.csv_path.display(),
        database_url = %config.database_url,
        "loading movies"
    );

    loader::run_with(&config).await?;

    Ok(())
}
