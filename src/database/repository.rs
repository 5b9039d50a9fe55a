use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Report, User};

/// Key-based storage for reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DatabaseError>;

    /// Insert or update by id; the stored owner is never changed by an update
    async fn save(&self, report: Report) -> Result<Report, DatabaseError>;

    async fn delete(&self, report: &Report) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Storage for user identity records
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn save(&self, user: User) -> Result<User, DatabaseError>;
}

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DatabaseError> {
        let report = sqlx::query_as::<_, Report>(
            "SELECT id, title, description, owner_id FROM reports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(report)
    }

    async fn save(&self, report: Report) -> Result<Report, DatabaseError> {
        let query = r#"
            INSERT INTO reports (id, title, description, owner_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title,
                description = EXCLUDED.description
            RETURNING id, title, description, owner_id
        "#;

        let saved = sqlx::query_as::<_, Report>(query)
            .bind(report.id)
            .bind(&report.title)
            .bind(&report.description)
            .bind(report.owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn delete(&self, report: &Report) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(report.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!("Delete of report {} affected no rows", report.id);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, display_name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, display_name, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, DatabaseError> {
        let query = r#"
            INSERT INTO users (id, username, password_hash, display_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET password_hash = EXCLUDED.password_hash,
                display_name = EXCLUDED.display_name
            RETURNING id, username, password_hash, display_name, created_at
        "#;

        sqlx::query_as::<_, User>(query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.display_name)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DatabaseError::Conflict(format!("username '{}' already exists", user.username))
                }
                other => DatabaseError::Sqlx(other),
            })
    }
}
