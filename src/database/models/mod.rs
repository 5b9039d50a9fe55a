pub mod report;
pub mod user;

pub use report::{Report, ReportDraft};
pub use user::User;
