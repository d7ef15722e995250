use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    db,
    error::LoadResult,
    source::SourceTable,
    store::MovieStore,
    verify::verify,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Data rows in the source file.
    pub source_rows: usize,
    /// Rows removed for having a missing cell.
    pub dropped_rows: usize,
    pub inserted_rows: u64,
}

/// Loads `csv_path` into the `movies` table at `database_url` and verifies
/// the result.
pub async fn run(csv_path: impl AsRef<Path>, database_url: &str) -> LoadResult<LoadReport> {
    let config = Config {
        csv_path: csv_path.as_ref().to_path_buf(),
        database_url: database_url.to_string(),
        ..Config::default()
    };
    run_with(&config).await
}

pub async fn run_with(config: &Config) -> LoadResult<LoadReport> {
    let mut table = SourceTable::from_path(&config.csv_path)?;
    let source_rows = table.len();
    debug!(columns = table.headers().len(), rows = source_rows, "read source table");
    if table.is_empty() {
        warn!(csv = %config.csv_path.display(), "source has no data rows");
    }

    let dropped_rows = table.drop_incomplete();
    debug!(source_rows = source_rows, dropped_rows = dropped_rows, "dropped incomplete rows");

    let movies = table.project()?;
    drop(table);

    let db = db::connect_and_create_schema(&config.database_url).await?;
    let store = MovieStore::new(db, config.insert_batch_size);

    let outcome: LoadResult<u64> = async {
        let inserted_rows = store.insert_all(&movies).await?;
        verify(&store, &movies).await?;
        Ok(inserted_rows)
    }
    .await;

    let closed = store.close().await;
    let inserted_rows = outcome?;
    closed?;

    info!(
        source_rows = source_rows,
        dropped_rows = dropped_rows,
        inserted_rows = inserted_rows,
        "movies loaded"
    );

    Ok(LoadReport { source_rows, dropped_rows, inserted_rows })
}
