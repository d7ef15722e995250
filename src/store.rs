use sea_orm::{
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::LoadResult,
    models::{MOVIE_COLUMNS, Movie},
};

/// SQLite's default `SQLITE_MAX_VARIABLE_NUMBER`.
const SQLITE_MAX_VARIABLES: usize = 32_766;

/// Largest batch whose `INSERT` stays within the bind-parameter limit.
pub const MAX_BATCH_SIZE: usize = SQLITE_MAX_VARIABLES / MOVIE_COLUMNS.len();

pub struct MovieStore {
    db: DatabaseConnection,
    batch_size: usize,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection, batch_size: usize) -> Self {
        Self { db, batch_size: batch_size.clamp(1, MAX_BATCH_SIZE) }
    }

    #[cfg(test)]
    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Inserts every movie inside a single transaction. Nothing is committed
    /// unless all batches succeed.
    pub async fn insert_all(&self, movies: &[Movie]) -> LoadResult<u64> {
        let txn = self.db.begin().await?;

        let mut inserted = 0;
        for batch in movies.chunks(self.batch_size) {
            let models = batch.iter().cloned().map(Movie::into_active_model);
            inserted += movie::Entity::insert_many(models).exec_without_returning(&txn).await?;
            debug!(inserted = inserted, total = movies.len(), "inserted batch");
        }

        txn.commit().await?;

        Ok(inserted)
    }

    pub async fn count(&self) -> LoadResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    /// Persisted primary keys, ascending.
    pub async fn ids(&self) -> LoadResult<Vec<i64>> {
        let ids = movie::Entity::find()
            .select_only()
            .column(movie::Column::Id)
            .order_by_asc(movie::Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        Ok(ids)
    }

    pub async fn close(self) -> LoadResult<()> {
        self.db.close().await?;
        Ok(())
    }
}
