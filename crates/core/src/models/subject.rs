use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Issues, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub department: Option<String>,
}

impl Validate for CreateSubjectRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Issues::new();
        issues.not_blank("name", &self.name).not_blank("code", &self.code);
        issues.finish()
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub department: Option<String>,
}

impl Validate for UpdateSubjectRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Issues::new();
        if let Some(name) = &self.name {
            issues.not_blank("name", name);
        }
        if let Some(code) = &self.code {
            issues.not_blank("code", code);
        }
        issues.finish()
    }
}

/// Column values for inserting or overwriting a subject row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
    pub department: Option<String>,
}

impl From<CreateSubjectRequest> for NewSubject {
    fn from(request: CreateSubjectRequest) -> Self {
        Self {
            name: request.name,
            code: request.code,
            department: request.department,
        }
    }
}

impl NewSubject {
    /// `subject` with the fields present in `changes` applied.
    pub fn merged(subject: &Subject, changes: UpdateSubjectRequest) -> Self {
        Self {
            name: changes.name.unwrap_or_else(|| subject.name.clone()),
            code: changes.code.unwrap_or_else(|| subject.code.clone()),
            department: changes.department.or_else(|| subject.department.clone()),
        }
    }
}
