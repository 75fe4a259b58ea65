use async_trait::async_trait;
use uuid::Uuid;

use crate::database::attributes::AttributeCodec;
use crate::database::manager::Store;
use crate::database::models::{MenuItem, MenuItemRow};
use crate::database::repository::{expect_affected, OwnedCollection, RepositoryError, ResourceRepository};

const COLUMNS: &str = "id, user_id, name, category, ingredients, predicted_waste_score, price, \
    margin, suggestions, created_at, updated_at";

#[derive(Clone)]
pub struct PgMenuRepository {
    store: Store,
    codec: AttributeCodec,
}

impl PgMenuRepository {
    pub fn new(store: Store, codec: AttributeCodec) -> Self {
        Self { store, codec }
    }

    fn decode_all(&self, rows: Vec<MenuItemRow>) -> Result<Vec<MenuItem>, RepositoryError> {
        rows.into_iter().map(|row| row.into_entity(&self.codec)).collect()
    }
}

#[async_trait]
impl OwnedCollection<MenuItem> for PgMenuRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<MenuItem>, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "SELECT {} FROM restaurant_menu_items WHERE user_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );

        let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        self.decode_all(rows)
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "INSERT INTO restaurant_menu_items ({columns}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {columns}",
            columns = COLUMNS
        );

        let row = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(item.id)
            .bind(item.user_id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(self.codec.encode(Some(&item.ingredient_blob())))
            .bind(&item.predicted_waste_score)
            .bind(item.price)
            .bind(item.margin)
            .bind(&item.suggestions)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(pool)
            .await?;
        row.into_entity(&self.codec)
    }
}

#[async_trait]
impl ResourceRepository<MenuItem> for PgMenuRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<MenuItem, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!("SELECT {} FROM restaurant_menu_items WHERE id = $1", COLUMNS);

        sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_entity(&self.codec)
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "UPDATE restaurant_menu_items SET name = $1, category = $2, ingredients = $3, \
             predicted_waste_score = $4, price = $5, margin = $6, suggestions = $7, updated_at = $8 \
             WHERE id = $9 RETURNING {}",
            COLUMNS
        );

        sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(&item.name)
            .bind(&item.category)
            .bind(self.codec.encode(Some(&item.ingredient_blob())))
            .bind(&item.predicted_waste_score)
            .bind(item.price)
            .bind(item.margin)
            .bind(&item.suggestions)
            .bind(item.updated_at)
            .bind(item.id)
            .fetch_optional(pool)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_entity(&self.codec)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let pool = self.store.pool()?;
        let result = sqlx::query("DELETE FROM restaurant_menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        expect_affected(result.rows_affected())
    }
}
