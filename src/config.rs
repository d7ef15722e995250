use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_CSV_PATH: &str = "movie_dataset.csv";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 500;

#[derive(Clone, Debug)]
pub struct Config {
    pub csv_path: PathBuf,
    pub database_url: String,
    pub insert_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            insert_batch_size: DEFAULT_INSERT_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let csv_path = std::env::var("MOVIES_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV_PATH));

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let insert_batch_size: usize = match std::env::var("INSERT_BATCH_SIZE") {
            Ok(raw) => raw.parse().context("INSERT_BATCH_SIZE")?,
            Err(_) => DEFAULT_INSERT_BATCH_SIZE,
        };

        Ok(Self { csv_path, database_url, insert_batch_size: insert_batch_size.max(1) })
    }
}
