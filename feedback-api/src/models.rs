use crate::schema::FeedbackType;
use serde::{Deserialize, Serialize};

pub const SUBMITTED_MESSAGE: &str = "Feedback submitted successfully";

#[derive(Debug, Deserialize)]
pub struct FetchFeedbackQuery {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStatusResponse {
    pub record_id: String,
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
