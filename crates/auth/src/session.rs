use crate::credentials::{AdminCredentials, AuthError};
use crate::{Permission, Role};

/// Login state of whoever is making a request.
///
/// Anonymous visitors can look; only an admin session can change stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    roles: Vec<Role>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            roles: vec![Role::VIEWER],
        }
    }

    pub fn admin() -> Self {
        Self {
            roles: vec![Role::ADMIN],
        }
    }

    /// Exchange a password for an admin session.
    pub fn login(credentials: &AdminCredentials, password: &str) -> Result<Self, AuthError> {
        if credentials.verify(password) {
            tracing::info!("admin login succeeded");
            Ok(Self::admin())
        } else {
            tracing::warn!("admin login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn logout(self) -> Self {
        Self::anonymous()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::ADMIN)
    }

    /// Permissions granted by all of the session's roles.
    pub fn permissions(&self) -> Vec<Permission> {
        self.roles.iter().flat_map(Role::permissions).collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}
