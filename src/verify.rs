use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    error::{LoadResult, VerificationError},
    models::Movie,
    store::MovieStore,
};

/// Re-reads the table after commit and checks it holds exactly `movies`:
/// same row count, same primary key set.
pub async fn verify(store: &MovieStore, movies: &[Movie]) -> LoadResult<()> {
    let expected = movies.len() as u64;
    let actual = store.count().await?;
    if actual != expected {
        return Err(VerificationError::RowCount { expected, actual }.into());
    }

    let persisted: BTreeSet<i64> = store.ids().await?.into_iter().collect();
    let source: BTreeSet<i64> = movies.iter().map(|m| m.id).collect();
    check_id_sets(&source, &persisted)?;

    debug!(rows = actual, "verification passed");
    Ok(())
}

fn check_id_sets(
    source: &BTreeSet<i64>,
    persisted: &BTreeSet<i64>,
) -> Result<(), VerificationError> {
    if source == persisted {
        return Ok(());
    }
    Err(VerificationError::IdSet {
        missing: source.difference(persisted).copied().collect(),
        unexpected: persisted.difference(source).copied().collect(),
    })
}
