use crate::model::UserId;
use serde::{Deserialize, Serialize};

/// The signed-in identity as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: Option<String>,
}

/// A row of the `users` table. `is_admin` gates the admin screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

/// Payload for inserting a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub full_name: Option<String>,
    pub is_admin: bool,
}

/// A row of the `onboarding` table, keyed by the user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Onboarding {
    pub id: UserId,
    pub completed: bool,
    pub user_type: String,
    pub student_name: Option<String>,
}

impl Onboarding {
    /// The record written when a student finishes the name form.
    pub fn completed_student(id: UserId) -> Self {
        Self {
            id,
            completed: true,
            user_type: "student".to_string(),
            student_name: None,
        }
    }
}
