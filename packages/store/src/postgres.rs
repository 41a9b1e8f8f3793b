//! # PostgreSQL backend
//!
//! Production store backed by sqlx. [`PgStore::connect`] opens a small pool
//! and bootstraps the schema with `CREATE TABLE IF NOT EXISTS`, so a fresh
//! database is usable without a separate migration step. The compound
//! `(owner_id, parent_id)` index backs the active-listing query.
//!
//! All queries are runtime-checked (`sqlx::query_as`); records map through
//! the `sqlx(rename)` attributes on the model structs.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::backend::{
    DocumentFilter, DocumentOrder, DocumentStore, SessionStore, StoreError, UserStore,
};
use crate::models::{Document, NewDocument, NewUser, User};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE TABLE IF NOT EXISTS documents (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT,
    owner_id UUID NOT NULL REFERENCES users(id),
    parent_id UUID,
    is_archived BOOLEAN NOT NULL DEFAULT FALSE,
    is_published BOOLEAN NOT NULL DEFAULT FALSE,
    icon TEXT,
    cover_image TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS documents_owner_parent_idx ON documents (owner_id, parent_id);
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
";

fn backend_err(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// sqlx-backed store. Clone-able; clones share the pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to `url` and create the tables if they don't exist.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(backend_err)?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool (tests, shared pools). Does not touch the schema.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(backend_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create(&self, doc: NewDocument) -> Result<Document, StoreError> {
        let record = doc.into_document(Uuid::new_v4(), Utc::now());
        sqlx::query(
            "INSERT INTO documents (id, title, content, owner_id, parent_id, is_archived, is_published, icon, cover_image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.content)
        .bind(record.owner)
        .bind(record.parent)
        .bind(record.archived)
        .bind(record.published)
        .bind(&record.icon)
        .bind(&record.cover_image)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        sqlx::query_as("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }

    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE documents SET title = $2, content = $3, parent_id = $4, is_archived = $5,
             is_published = $6, icon = $7, cover_image = $8, created_at = $9, updated_at = $10
             WHERE id = $1",
        )
        .bind(doc.id)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(doc.parent)
        .bind(doc.archived)
        .bind(doc.published)
        .bind(&doc.icon)
        .bind(&doc.cover_image)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>, StoreError> {
        let mut query = QueryBuilder::new("SELECT * FROM documents WHERE owner_id = ");
        query.push_bind(filter.owner);
        if let Some(archived) = filter.archived {
            query.push(" AND is_archived = ");
            query.push_bind(archived);
        }
        match filter.parent {
            Some(Some(parent)) => {
                query.push(" AND parent_id = ");
                query.push_bind(parent);
            }
            Some(None) => {
                query.push(" AND parent_id IS NULL");
            }
            None => {}
        }
        query.push(match filter.order {
            DocumentOrder::CreatedDesc => " ORDER BY created_at DESC",
            DocumentOrder::UpdatedDesc => " ORDER BY updated_at DESC",
        });
        query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(backend_err)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let record = user.into_user(Uuid::new_v4(), Utc::now());
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            _ => backend_err(e),
        })?;
        Ok(record)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn insert(&self, token: &str, user: Uuid) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(user)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(backend_err)?;
        Ok(())
    }

    async fn user_for_token(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)?;
        Ok(row.map(|(id,)| id))
    }

    async fn revoke(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(backend_err)?;
        Ok(result.rows_affected() > 0)
    }
}
