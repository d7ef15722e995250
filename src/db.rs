use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, Statement};
use tracing::debug;

use crate::{entities::movie, error::LoadResult};

const SESSION_PRAGMAS: [&str; 2] = ["PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"];

/// Opens the database, creating the file if absent, and makes sure the
/// `movies` table exists. An existing table is left untouched.
pub async fn connect_and_create_schema(database_url: &str) -> LoadResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    let backend = db.get_database_backend();

    for pragma in SESSION_PRAGMAS {
        db.execute(Statement::from_string(backend, pragma.to_string())).await?;
    }

    let mut create = Schema::new(backend).create_table_from_entity(movie::Entity);
    create.if_not_exists();
    db.execute(backend.build(&create)).await?;
    debug!(database_url = %database_url, "schema ready");

    Ok(db)
}
