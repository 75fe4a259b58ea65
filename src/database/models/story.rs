use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationGate};

/// Narrative impact report published by an NGO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ImpactStory {
    pub id: Uuid,
    pub ngo_user_id: Uuid,
    pub title: String,
    pub story: String,
    pub beneficiaries: i32,
    pub meals_provided: i32,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStoryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub story: String,
    pub beneficiaries: Option<i32>,
    pub meals_provided: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub photo: Option<String>,
}

impl Validate for CreateStoryRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("title", Some(self.title.as_str())).required().max_len(255);
        gate.text("story", Some(self.story.as_str())).required();
        gate.integer("beneficiaries", self.beneficiaries.map(i64::from)).at_least(0);
        gate.integer("meals_provided", self.meals_provided.map(i64::from)).at_least(0);
        gate.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_must_not_be_negative() {
        let request = CreateStoryRequest {
            title: "Winter drive".into(),
            story: "We fed the whole block".into(),
            meals_provided: Some(-3),
            ..Default::default()
        };
        assert_eq!(request.validate(), vec!["meals_provided must be at least 0"]);
    }

    #[test]
    fn title_is_bounded() {
        let request = CreateStoryRequest {
            title: "x".repeat(256),
            story: "text".into(),
            ..Default::default()
        };
        assert_eq!(request.validate(), vec!["title must be at most 255 characters"]);
    }
}
