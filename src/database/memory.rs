use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Report, User};
use crate::database::repository::{ReportRepository, UserRepository};

/// Process-local report storage, used by tests and `--memory` mode
#[derive(Default)]
pub struct MemoryReportRepository {
    reports: RwLock<HashMap<Uuid, Report>>,
}

impl MemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportRepository for MemoryReportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DatabaseError> {
        Ok(self.reports.read().await.get(&id).cloned())
    }

    async fn save(&self, report: Report) -> Result<Report, DatabaseError> {
        let mut reports = self.reports.write().await;
        let saved = match reports.get(&report.id) {
            // Same rule as the SQL upsert: an update never moves ownership
            Some(existing) => Report {
                owner_id: existing.owner_id,
                ..report
            },
            None => report,
        };
        reports.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, report: &Report) -> Result<(), DatabaseError> {
        self.reports.write().await.remove(&report.id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn save(&self, user: User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(DatabaseError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
