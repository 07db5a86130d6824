use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entities::prelude::*;

/// Open a connection pool. In-memory SQLite gets a single connection so
/// every pooled handle sees the same database.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);
    if url.contains(":memory:") {
        options.max_connections(1);
    }
    Database::connect(options).await
}

/// Create the tables if they do not exist yet.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(Users),
        schema.create_table_from_entity(Posts),
        schema.create_table_from_entity(Comments),
        schema.create_table_from_entity(Todos),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(backend.build(&*statement)).await?;
    }

    Ok(())
}
