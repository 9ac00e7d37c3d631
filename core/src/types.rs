//! Domain DTOs for the spy cat API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two.

use serde::{Deserialize, Serialize};

/// A single spy cat as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpyCat {
    pub id: u32,
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

/// Request payload for creating a new spy cat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateSpyCat {
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

/// Request payload for updating an existing spy cat. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateSpyCat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl UpdateSpyCat {
    pub fn salary(salary: f64) -> Self {
        Self {
            salary: Some(salary),
        }
    }
}
