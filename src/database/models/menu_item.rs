use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::attributes::{AttributeCodec, Attributes};
use crate::database::repository::RepositoryError;
use crate::validation::{Validate, ValidationGate};

pub const WASTE_SCORES: &[&str] = &["low", "medium", "high"];

/// Key under which the ingredient list is wrapped in its attribute blob
pub const INGREDIENTS_KEY: &str = "ingredients";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub ingredients: Vec<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_waste_score: Option<String>,
    pub price: f64,
    pub margin: f64,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Ingredient list in its persisted blob shape
    pub fn ingredient_blob(&self) -> Attributes {
        Attributes::wrap_list(INGREDIENTS_KEY, &self.ingredients)
    }
}

#[derive(Debug, FromRow)]
pub struct MenuItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub ingredients: Option<Vec<u8>>,
    pub predicted_waste_score: Option<String>,
    pub price: f64,
    pub margin: f64,
    pub suggestions: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItemRow {
    pub fn into_entity(self, codec: &AttributeCodec) -> Result<MenuItem, RepositoryError> {
        let ingredients = codec
            .decode("ingredients", self.ingredients.as_deref())?
            .unwrap_list(INGREDIENTS_KEY);

        Ok(MenuItem {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            category: self.category,
            ingredients,
            predicted_waste_score: self.predicted_waste_score,
            price: self.price,
            margin: self.margin,
            suggestions: self.suggestions.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMenuItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub ingredients: Option<Vec<Attributes>>,
    pub predicted_waste_score: Option<String>,
    pub price: Option<f64>,
    pub margin: Option<f64>,
    pub suggestions: Option<Vec<String>>,
}

impl Validate for CreateMenuItemRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("name", Some(self.name.as_str())).required().max_len(255);
        gate.text("category", Some(self.category.as_str())).required().max_len(100);
        gate.require("ingredients", self.ingredients.is_some());
        gate.text("predicted_waste_score", self.predicted_waste_score.as_deref())
            .optional()
            .one_of(WASTE_SCORES);
        gate.number("price", self.price).required().greater_than(0.0);
        gate.number("margin", self.margin).required();
        gate.finish()
    }
}

/// Partial update: absent fields leave the stored value untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub ingredients: Option<Vec<Attributes>>,
    pub predicted_waste_score: Option<String>,
    pub price: Option<f64>,
    pub margin: Option<f64>,
    pub suggestions: Option<Vec<String>>,
}

impl Validate for UpdateMenuItemRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("name", self.name.as_deref()).min_len(1).max_len(255);
        gate.text("category", self.category.as_deref()).min_len(1).max_len(100);
        gate.text("predicted_waste_score", self.predicted_waste_score.as_deref())
            .optional()
            .one_of(WASTE_SCORES);
        gate.number("price", self.price).greater_than(0.0);
        gate.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_core_fields() {
        assert_eq!(
            CreateMenuItemRequest::default().validate(),
            vec![
                "name is required",
                "category is required",
                "ingredients is required",
                "price is required",
                "margin is required",
            ]
        );
    }

    #[test]
    fn zero_margin_is_accepted() {
        let request: CreateMenuItemRequest = serde_json::from_value(json!({
            "name": "Lentil soup",
            "category": "Soups",
            "ingredients": [],
            "price": 6.5,
            "margin": 0
        }))
        .unwrap();
        assert!(request.validate().is_empty());
    }

    #[test]
    fn waste_score_must_be_known() {
        let request = UpdateMenuItemRequest {
            predicted_waste_score: Some("extreme".into()),
            ..Default::default()
        };
        assert_eq!(
            request.validate(),
            vec!["predicted_waste_score must be one of: low, medium, high"]
        );
    }

    #[test]
    fn update_rejects_blank_name_and_free_price() {
        let request = UpdateMenuItemRequest {
            name: Some(String::new()),
            price: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            request.validate(),
            vec!["name must not be empty", "price must be greater than 0"]
        );
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdateMenuItemRequest::default().validate().is_empty());
    }

    #[test]
    fn ingredients_survive_the_blob_round_trip() {
        let codec = AttributeCodec::default();
        let mut flour = Attributes::new();
        flour.insert("name", "flour");
        flour.insert("grams", 200);
        let item = MenuItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Bread".into(),
            category: "Bakery".into(),
            ingredients: vec![flour.clone()],
            predicted_waste_score: None,
            price: 3.0,
            margin: 1.0,
            suggestions: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let row = MenuItemRow {
            id: item.id,
            user_id: item.user_id,
            name: item.name.clone(),
            category: item.category.clone(),
            ingredients: codec.encode(Some(&item.ingredient_blob())),
            predicted_waste_score: None,
            price: item.price,
            margin: item.margin,
            suggestions: None,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        assert_eq!(row.into_entity(&codec).unwrap().ingredients, vec![flour]);
    }
}
