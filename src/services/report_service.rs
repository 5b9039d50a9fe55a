use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::{Report, ReportDraft};
use crate::database::repository::ReportRepository;
use crate::services::authorization::AuthService;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::validation::ReportValidatorService;

/// Report CRUD with validation and ownership enforcement.
///
/// Every operation is a fixed pipeline; the first failing step aborts the
/// rest, so nothing is persisted unless all earlier checks passed. Write
/// paths validate before touching storage, and authorization always uses
/// the stored owner rather than anything supplied by the caller.
#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    validator: ReportValidatorService,
    auth: AuthService,
}

impl ReportService {
    pub fn new(repository: Arc<dyn ReportRepository>, validator: ReportValidatorService) -> Self {
        Self {
            repository,
            validator,
            auth: AuthService,
        }
    }

    pub fn repository(&self) -> &Arc<dyn ReportRepository> {
        &self.repository
    }

    pub async fn get_by_uuid(&self, principal: Option<&Principal>, id: Option<Uuid>) -> ServiceResult<Report> {
        debug!("Entering get_by_uuid with id: {:?}", id);
        let id = id.ok_or_else(|| {
            warn!("Report id is missing");
            ServiceError::InvalidArgument("Uuid must not be null!".to_string())
        })?;

        let report = self.find_existing(id).await?;
        self.authorize(principal, &report, "get")?;

        debug!("Exiting get_by_uuid with report: {}", report.id);
        Ok(report)
    }

    pub async fn create(&self, principal: Option<&Principal>, draft: ReportDraft) -> ServiceResult<Uuid> {
        debug!("Entering create with draft: {:?}", draft);
        self.validator.validate(&draft)?;

        let owner = self.auth.current_principal(principal).map_err(|_| {
            error!("Current user cannot be null");
            ServiceError::IllegalState("Current user cannot be null".to_string())
        })?;

        let mut report = Report {
            id: Uuid::new_v4(),
            title: String::new(),
            description: String::new(),
            owner_id: owner.id,
        };
        report.apply(&draft);

        let saved = self.repository.save(report).await?;
        debug!("Exiting create with id: {}", saved.id);
        Ok(saved.id)
    }

    pub async fn update(&self, principal: Option<&Principal>, id: Uuid, draft: ReportDraft) -> ServiceResult<Uuid> {
        debug!("Entering update with id: {} and draft: {:?}", id, draft);
        self.validator.validate(&draft)?;

        let mut report = self.find_existing(id).await?;
        self.authorize(principal, &report, "update")?;

        report.apply(&draft);

        let saved = self.repository.save(report).await?;
        debug!("Exiting update with id: {}", saved.id);
        Ok(saved.id)
    }

    pub async fn delete_by_uuid(&self, principal: Option<&Principal>, id: Uuid) -> ServiceResult<()> {
        debug!("Entering delete_by_uuid with id: {}", id);

        let report = self.find_existing(id).await?;
        self.authorize(principal, &report, "delete")?;

        self.repository.delete(&report).await?;
        debug!("Exiting delete_by_uuid for id: {}", id);
        Ok(())
    }

    async fn find_existing(&self, id: Uuid) -> ServiceResult<Report> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            info!("No report found with id: {}", id);
            ServiceError::NotFound(format!("No report found with uuid: {}", id))
        })
    }

    fn authorize(&self, principal: Option<&Principal>, report: &Report, action: &str) -> ServiceResult<()> {
        if self.auth.is_authorized(principal, report.owner_id) {
            return Ok(());
        }
        warn!(
            "Current user {:?} cannot {} report with id: {}",
            principal.map(|p| p.id),
            action,
            report.id
        );
        Err(ServiceError::Forbidden(format!(
            "Current user is not authorized to {} the report with uuid: {}",
            action, report.id
        )))
    }
}
