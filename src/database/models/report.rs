use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted report. `id` and `owner_id` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
}

impl Report {
    /// Copy the caller-editable fields of a draft onto this report.
    ///
    /// Only title and description are taken; identity and ownership stay as stored.
    pub fn apply(&mut self, draft: &ReportDraft) {
        self.title = draft.title.clone().unwrap_or_default();
        self.description = draft.description.clone().unwrap_or_default();
    }
}

/// Caller-supplied candidate report.
///
/// Has no id or owner; such fields in a request body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ReportDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}
