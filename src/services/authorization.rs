use uuid::Uuid;

use crate::auth::Principal;
use crate::services::error::{ServiceError, ServiceResult};

/// Ownership checks against an explicitly supplied principal
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthService;

impl AuthService {
    /// True iff a principal is present and owns the resource. Absence is a deny.
    pub fn is_authorized(&self, principal: Option<&Principal>, owner_id: Uuid) -> bool {
        principal.is_some_and(|p| p.id == owner_id)
    }

    pub fn current_principal<'a>(&self, principal: Option<&'a Principal>) -> ServiceResult<&'a Principal> {
        principal.ok_or(ServiceError::AuthenticationRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: Uuid) -> Principal {
        Principal {
            id,
            username: "user".into(),
            display_name: "User".into(),
        }
    }

    #[test]
    fn owner_is_authorized() {
        let id = Uuid::new_v4();
        assert!(AuthService.is_authorized(Some(&principal(id)), id));
    }

    #[test]
    fn other_user_is_denied() {
        assert!(!AuthService.is_authorized(Some(&principal(Uuid::new_v4())), Uuid::new_v4()));
    }

    #[test]
    fn missing_principal_is_denied_not_an_error() {
        assert!(!AuthService.is_authorized(None, Uuid::new_v4()));
    }

    #[test]
    fn current_principal_requires_presence() {
        let p = principal(Uuid::new_v4());
        assert_eq!(AuthService.current_principal(Some(&p)).unwrap(), &p);
        assert!(matches!(
            AuthService.current_principal(None),
            Err(ServiceError::AuthenticationRequired)
        ));
    }
}
