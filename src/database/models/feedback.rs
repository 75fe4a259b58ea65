use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationGate};

pub const FEEDBACK_STATUS_PENDING: &str = "pending";

/// Recipient feedback on a delivered donation, as recorded by the NGO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub ngo_user_id: Uuid,
    pub recipient_name: String,
    pub partner_name: String,
    pub delivery_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    pub comment: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrective_action: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub partner_name: String,
    pub delivery_date: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: String,
    pub tags: Option<Vec<String>>,
    pub photo: Option<String>,
}

impl Validate for CreateFeedbackRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("recipient_name", Some(self.recipient_name.as_str())).required().max_len(255);
        gate.text("partner_name", Some(self.partner_name.as_str())).required().max_len(255);
        gate.require("delivery_date", self.delivery_date.is_some());
        gate.integer("rating", self.rating.map(i64::from)).at_least(1).at_most(5);
        gate.text("comment", Some(self.comment.as_str())).required();
        gate.finish()
    }
}
