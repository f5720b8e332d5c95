//! Classes, staff and rooms a timetable slot can refer to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Issues, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: i64,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub level: Option<String>,
}

impl Validate for CreateClassRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Issues::new();
        issues.not_blank("name", &self.name);
        issues.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    pub full_name: String,
}

impl Validate for CreateStaffRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Issues::new();
        issues.not_blank("fullName", &self.full_name);
        issues.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
}

impl Validate for CreateRoomRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Issues::new();
        issues.not_blank("name", &self.name);
        issues.finish()
    }
}
