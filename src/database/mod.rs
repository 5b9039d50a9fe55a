pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryReportRepository, MemoryUserRepository};
pub use models::{Report, ReportDraft, User};
pub use repository::{PgReportRepository, PgUserRepository, ReportRepository, UserRepository};
