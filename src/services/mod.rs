pub mod authorization;
pub mod error;
pub mod report_service;
pub mod user_service;
pub mod validation;

pub use authorization::AuthService;
pub use error::{ServiceError, ServiceResult};
pub use report_service::ReportService;
pub use user_service::{LoginRequest, LoginResponse, SignupRequest, UserService};
pub use validation::{DescriptionValidator, ReportValidator, ReportValidatorService, TitleValidator};
