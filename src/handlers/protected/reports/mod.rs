pub mod collection;
pub mod record;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::Report;

// Re-export handler functions for use in routing
pub use collection::post as reports_post;
pub use record::delete as report_delete;
pub use record::get as report_get;
pub use record::post as report_update;

/// Wire shape of a report; the owner never leaves the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            title: report.title,
            description: report.description,
        }
    }
}
