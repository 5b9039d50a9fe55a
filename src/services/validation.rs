use std::sync::Arc;

use crate::database::models::ReportDraft;
use crate::services::error::{ServiceError, ServiceResult};

/// A single rule over a candidate report. Returns the failure message, if any.
pub trait ReportValidator: Send + Sync {
    fn validate(&self, draft: &ReportDraft) -> Option<String>;
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub struct TitleValidator;

impl ReportValidator for TitleValidator {
    fn validate(&self, draft: &ReportDraft) -> Option<String> {
        is_blank(draft.title.as_deref()).then(|| "Title cannot be empty!".to_string())
    }
}

pub struct DescriptionValidator;

impl ReportValidator for DescriptionValidator {
    fn validate(&self, draft: &ReportDraft) -> Option<String> {
        is_blank(draft.description.as_deref()).then(|| "Description can not be empty!".to_string())
    }
}

/// Runs every registered rule and reports all failures at once.
///
/// Rules run in registration order, which is also the order of the messages
/// in [`ServiceError::ValidationFailed`]. No rule is skipped after a failure.
#[derive(Clone)]
pub struct ReportValidatorService {
    validators: Vec<Arc<dyn ReportValidator>>,
}

impl Default for ReportValidatorService {
    fn default() -> Self {
        Self::with_validators(vec![Arc::new(TitleValidator), Arc::new(DescriptionValidator)])
    }
}

impl ReportValidatorService {
    pub fn with_validators(validators: Vec<Arc<dyn ReportValidator>>) -> Self {
        Self { validators }
    }

    pub fn register(mut self, validator: impl ReportValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn validate(&self, draft: &ReportDraft) -> ServiceResult<()> {
        tracing::debug!("Validating report draft: {:?}", draft);

        let errors: Vec<String> = self
            .validators
            .iter()
            .filter_map(|v| v.validate(draft))
            .collect();

        if !errors.is_empty() {
            tracing::info!("Validation failed for report with errors: {:?}", errors);
            return Err(ServiceError::ValidationFailed { errors });
        }

        tracing::debug!("Validation successful for report draft");
        Ok(())
    }
}
