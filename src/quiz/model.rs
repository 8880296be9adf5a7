use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use super::category::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub weighted_points: f64,
    pub advice: String,
}

impl QuizItem {
    pub fn new(
        id: &str,
        category: Category,
        title: &str,
        description: &str,
        weighted_points: f64,
        advice: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            title: title.to_string(),
            description: description.to_string(),
            weighted_points,
            advice: advice.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    #[validate(length(min = 1, message = "itemId must not be empty"))]
    pub item_id: String,
    pub deployed: bool,
}

impl QuizResponse {
    pub fn new(item_id: impl Into<String>, deployed: bool) -> Self {
        Self {
            item_id: item_id.into(),
            deployed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub total_possible: f64,
    pub percentage: u32,
    pub is_underperforming: bool,
    pub summary: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub total_score: f64,
    pub total_possible: f64,
    pub overall_percentage: u32,
    pub category_scores: Vec<CategoryScore>,
    pub overall_feedback: String,
    pub recommendations: Vec<String>,
}

/// A scored submission as retained by an assessment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAssessment {
    pub id: Uuid,
    pub responses: Vec<QuizResponse>,
    pub result: QuizResult,
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_wire_names() {
        let response: QuizResponse =
            serde_json::from_str(r#"{"itemId":"cca1","deployed":true}"#).unwrap();
        assert_eq!(response, QuizResponse::new("cca1", true));
        assert!(response.validate().is_ok());
    }

    #[test]
    fn empty_item_id_fails_validation() {
        let response = QuizResponse::new("", false);
        let errors = response.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("item_id"));
    }

    #[test]
    fn item_serializes_weighted_points_in_camel_case() {
        let item = QuizItem::new(
            "x1",
            Category::AttractiveRewards,
            "Title",
            "Description",
            3.2,
            "Advice",
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["weightedPoints"], 3.2);
        assert_eq!(value["category"], "Attractive Rewards");
    }
}
