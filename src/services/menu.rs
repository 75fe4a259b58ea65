use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::merge::{replace, replace_or_clear, MergeInto};
use super::ownership::Owned;
use super::resource::{Entity, Mutable, ResourceService};
use crate::database::models::{CreateMenuItemRequest, MenuItem, UpdateMenuItemRequest};

pub type MenuService = ResourceService<MenuItem>;

impl Owned for MenuItem {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Entity for MenuItem {
    const KIND: &'static str = "Menu item";
    type Draft = CreateMenuItemRequest;

    fn from_draft(id: Uuid, owner_id: Uuid, now: DateTime<Utc>, draft: CreateMenuItemRequest) -> Self {
        Self {
            id,
            user_id: owner_id,
            name: draft.name,
            category: draft.category,
            ingredients: draft.ingredients.unwrap_or_default(),
            predicted_waste_score: draft.predicted_waste_score.filter(|s| !s.is_empty()),
            price: draft.price.unwrap_or_default(),
            margin: draft.margin.unwrap_or_default(),
            suggestions: draft.suggestions.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Mutable for MenuItem {
    type Patch = UpdateMenuItemRequest;

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl MergeInto<MenuItem> for UpdateMenuItemRequest {
    fn merge_into(self, item: &mut MenuItem) {
        replace(&mut item.name, self.name);
        replace(&mut item.category, self.category);
        replace(&mut item.ingredients, self.ingredients);
        replace_or_clear(&mut item.predicted_waste_score, self.predicted_waste_score);
        replace(&mut item.price, self.price);
        replace(&mut item.margin, self.margin);
        replace(&mut item.suggestions, self.suggestions);
    }
}
