// PostgreSQL document store
//
// Every collection lives in one `documents` table keyed by (collection, id),
// with the record body in a JSONB column. Equality filters use JSONB
// containment so they can hit the GIN index.

use anyhow::Context;
use qabas_core::document::Fields;
use qabas_core::{Direction, Document, Filter, Query, Result, StoreError, WriteBatch, WriteOp};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::new_document_id;

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.data.0)
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.into())
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }

    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Document::from))
    }

    pub async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT id, data FROM documents WHERE collection = ");
        qb.push_bind(collection.to_string());

        for filter in &query.filters {
            let mut probe = Fields::new();
            probe.insert(filter.field.clone(), filter.value.clone());
            qb.push(" AND data @> ");
            qb.push_bind(Json(Value::Object(probe)));
        }

        match &query.order_by {
            Some(order) => {
                qb.push(" AND data ? ");
                qb.push_bind(order.field.clone());
                qb.push(" ORDER BY data -> ");
                qb.push_bind(order.field.clone());
                qb.push(match order.direction {
                    Direction::Ascending => " ASC",
                    Direction::Descending => " DESC",
                });
                qb.push(", id ASC");
            }
            None => {
                qb.push(" ORDER BY id ASC");
            }
        }

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit as i64);
        }

        let rows = qb
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    pub async fn insert(&self, collection: &str, data: Fields) -> Result<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            RETURNING id, data
            "#,
        )
        .bind(collection)
        .bind(new_document_id())
        .bind(Json(data))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }

    pub async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            RETURNING id, data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(data))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }

    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET data = data || $3, updated_at = now()
            WHERE collection = $1 AND id = $2
            RETURNING id, data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(patch))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Document::from))
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomic in-place increment of an integer field
    pub async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<Option<i64>> {
        let value = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE documents
            SET data = jsonb_set(
                    data,
                    ARRAY[$3::text],
                    to_jsonb(COALESCE((data ->> $3::text)::bigint, 0) + $4)
                ),
                updated_at = now()
            WHERE collection = $1 AND id = $2
            RETURNING (data ->> $3::text)::bigint
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(value)
    }

    /// Apply a batch inside one transaction
    pub async fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        for op in batch.into_ops() {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    data,
                } => {
                    sqlx::query(
                        r#"
                        INSERT INTO documents (collection, id, data)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (collection, id)
                        DO UPDATE SET data = EXCLUDED.data, updated_at = now()
                        "#,
                    )
                    .bind(&collection)
                    .bind(&id)
                    .bind(Json(data))
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err)?;
                }
                WriteOp::Update {
                    collection,
                    id,
                    patch,
                } => {
                    let result = sqlx::query(
                        r#"
                        UPDATE documents
                        SET data = data || $3, updated_at = now()
                        WHERE collection = $1 AND id = $2
                        "#,
                    )
                    .bind(&collection)
                    .bind(&id)
                    .bind(Json(patch))
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err)?;

                    // Dropping the transaction rolls back earlier ops
                    if result.rows_affected() == 0 {
                        return Err(StoreError::not_found(&collection, &id));
                    }
                }
                WriteOp::Delete { collection, id } => {
                    sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
                        .bind(&collection)
                        .bind(&id)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                }
                WriteOp::Increment {
                    collection,
                    id,
                    field,
                    delta,
                } => {
                    let result = sqlx::query(
                        r#"
                        UPDATE documents
                        SET data = jsonb_set(
                                data,
                                ARRAY[$3::text],
                                to_jsonb(COALESCE((data ->> $3::text)::bigint, 0) + $4)
                            ),
                            updated_at = now()
                        WHERE collection = $1 AND id = $2
                        "#,
                    )
                    .bind(&collection)
                    .bind(&id)
                    .bind(&field)
                    .bind(delta)
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err)?;

                    if result.rows_affected() == 0 {
                        return Err(StoreError::not_found(&collection, &id));
                    }
                }
                WriteOp::UpdateWhere {
                    collection,
                    filters,
                    patch,
                } => {
                    sqlx::query(
                        r#"
                        UPDATE documents
                        SET data = data || $3, updated_at = now()
                        WHERE collection = $1 AND data @> $2
                        "#,
                    )
                    .bind(&collection)
                    .bind(Json(containment(&filters)))
                    .bind(Json(patch))
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err)?;
                }
                WriteOp::DeleteWhere {
                    collection,
                    filters,
                } => {
                    sqlx::query("DELETE FROM documents WHERE collection = $1 AND data @> $2")
                        .bind(&collection)
                        .bind(Json(containment(&filters)))
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                }
            }
        }

        tx.commit().await.map_err(db_err)?;
        Ok(())
    }
}

/// Equality filters as one JSONB containment object
fn containment(filters: &[Filter]) -> Fields {
    filters
        .iter()
        .map(|f| (f.field.clone(), f.value.clone()))
        .collect()
}
