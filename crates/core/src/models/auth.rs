use serde::{Deserialize, Serialize};

pub const SUPER_ADMIN: &str = "Super Admin";
pub const SCHOOL_ADMIN: &str = "School Admin";
pub const ACADEMIC_OFFICER: &str = "Academic Officer";

/// Roles allowed to manage subjects and timetables.
pub const ACADEMIC_ROLES: &[&str] = &[SUPER_ADMIN, SCHOOL_ADMIN, ACADEMIC_OFFICER];

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

/// The caller a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        allowed
            .iter()
            .any(|role| self.roles.iter().any(|held| held == role))
    }
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            roles: claims.roles,
        }
    }
}
