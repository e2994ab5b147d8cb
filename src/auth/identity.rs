use crate::auth::repo::User;
use crate::error::AppError;

/// The resolved caller of a request. `Known` always carries the user row as
/// loaded from the store for this request, so `is_admin` reflects the flag at
/// resolution time; it is never cached across requests, which means admin
/// revocation takes effect on the very next request.
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Known(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::Known(user) => Some(user),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Known(user) if user.is_admin)
    }

    /// The single enforcement point for privileged operations.
    pub fn require_admin(&self) -> Result<&User, AppError> {
        match self {
            Identity::Known(user) if user.is_admin => Ok(user),
            _ => Err(AppError::Forbidden),
        }
    }
}
