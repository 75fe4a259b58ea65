use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::Store;
use crate::database::models::{FeedbackEntry, ImpactStory};
use crate::database::repository::{OwnedCollection, RepositoryError};

const FEEDBACK_COLUMNS: &str = "id, ngo_user_id, recipient_name, partner_name, delivery_date, \
    rating, comment, tags, photo, status, corrective_action, created_at, updated_at";

const STORY_COLUMNS: &str =
    "id, ngo_user_id, title, story, beneficiaries, meals_provided, tags, photo, created_at, updated_at";

#[derive(Clone)]
pub struct PgFeedbackRepository {
    store: Store,
}

impl PgFeedbackRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnedCollection<FeedbackEntry> for PgFeedbackRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<FeedbackEntry>, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "SELECT {} FROM ngo_feedback_entries WHERE ngo_user_id = $1 ORDER BY created_at DESC",
            FEEDBACK_COLUMNS
        );

        Ok(sqlx::query_as::<_, FeedbackEntry>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await?)
    }

    async fn create(&self, entry: &FeedbackEntry) -> Result<FeedbackEntry, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "INSERT INTO ngo_feedback_entries ({columns}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {columns}",
            columns = FEEDBACK_COLUMNS
        );

        Ok(sqlx::query_as::<_, FeedbackEntry>(&sql)
            .bind(entry.id)
            .bind(entry.ngo_user_id)
            .bind(&entry.recipient_name)
            .bind(&entry.partner_name)
            .bind(entry.delivery_date)
            .bind(entry.rating)
            .bind(&entry.comment)
            .bind(&entry.tags)
            .bind(&entry.photo)
            .bind(&entry.status)
            .bind(&entry.corrective_action)
            .bind(entry.created_at)
            .bind(entry.updated_at)
            .fetch_one(pool)
            .await?)
    }
}

#[derive(Clone)]
pub struct PgStoryRepository {
    store: Store,
}

impl PgStoryRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnedCollection<ImpactStory> for PgStoryRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ImpactStory>, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "SELECT {} FROM ngo_impact_stories WHERE ngo_user_id = $1 ORDER BY created_at DESC",
            STORY_COLUMNS
        );

        Ok(sqlx::query_as::<_, ImpactStory>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await?)
    }

    async fn create(&self, story: &ImpactStory) -> Result<ImpactStory, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "INSERT INTO ngo_impact_stories ({columns}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {columns}",
            columns = STORY_COLUMNS
        );

        Ok(sqlx::query_as::<_, ImpactStory>(&sql)
            .bind(story.id)
            .bind(story.ngo_user_id)
            .bind(&story.title)
            .bind(&story.story)
            .bind(story.beneficiaries)
            .bind(story.meals_provided)
            .bind(&story.tags)
            .bind(&story.photo)
            .bind(story.created_at)
            .bind(story.updated_at)
            .fetch_one(pool)
            .await?)
    }
}
