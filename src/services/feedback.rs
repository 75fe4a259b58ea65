use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::error::ServiceResult;
use super::ownership::Owned;
use super::resource::{AppendOnlyService, Entity};
use crate::database::models::{
    CreateFeedbackRequest, CreateStoryRequest, FeedbackEntry, ImpactStory, FEEDBACK_STATUS_PENDING,
};
use crate::database::OwnedCollection;

impl Owned for FeedbackEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.ngo_user_id
    }
}

impl Entity for FeedbackEntry {
    const KIND: &'static str = "Feedback entry";
    type Draft = CreateFeedbackRequest;

    fn from_draft(id: Uuid, owner_id: Uuid, now: DateTime<Utc>, draft: CreateFeedbackRequest) -> Self {
        Self {
            id,
            ngo_user_id: owner_id,
            recipient_name: draft.recipient_name,
            partner_name: draft.partner_name,
            // Presence is enforced by the gate before construction
            delivery_date: draft.delivery_date.unwrap_or(now),
            rating: draft.rating,
            comment: draft.comment,
            tags: draft.tags.unwrap_or_default(),
            photo: draft.photo.filter(|p| !p.is_empty()),
            status: FEEDBACK_STATUS_PENDING.to_string(),
            corrective_action: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for ImpactStory {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.ngo_user_id
    }
}

impl Entity for ImpactStory {
    const KIND: &'static str = "Impact story";
    type Draft = CreateStoryRequest;

    fn from_draft(id: Uuid, owner_id: Uuid, now: DateTime<Utc>, draft: CreateStoryRequest) -> Self {
        Self {
            id,
            ngo_user_id: owner_id,
            title: draft.title,
            story: draft.story,
            beneficiaries: draft.beneficiaries.unwrap_or(0),
            meals_provided: draft.meals_provided.unwrap_or(0),
            tags: draft.tags.unwrap_or_default(),
            photo: draft.photo.filter(|p| !p.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Recipient feedback and impact stories for NGOs; both append-only
pub struct FeedbackService {
    feedback: AppendOnlyService<FeedbackEntry>,
    stories: AppendOnlyService<ImpactStory>,
}

impl FeedbackService {
    pub fn new(
        feedback: Arc<dyn OwnedCollection<FeedbackEntry>>,
        stories: Arc<dyn OwnedCollection<ImpactStory>>,
    ) -> Self {
        Self {
            feedback: AppendOnlyService::new(feedback),
            stories: AppendOnlyService::new(stories),
        }
    }

    pub async fn create_feedback(&self, principal: Uuid, request: CreateFeedbackRequest) -> ServiceResult<FeedbackEntry> {
        self.feedback.create(principal, request).await
    }

    pub async fn list_feedback(&self, principal: Uuid) -> ServiceResult<Vec<FeedbackEntry>> {
        self.feedback.list(principal).await
    }

    pub async fn create_story(&self, principal: Uuid, request: CreateStoryRequest) -> ServiceResult<ImpactStory> {
        self.stories.create(principal, request).await
    }

    pub async fn list_stories(&self, principal: Uuid) -> ServiceResult<Vec<ImpactStory>> {
        self.stories.list(principal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::testing::MemoryRepository;
    use serde_json::json;

    fn feedback_request(rating: serde_json::Value) -> CreateFeedbackRequest {
        serde_json::from_value(json!({
            "recipient_name": "Shelter 12",
            "partner_name": "Corner Bistro",
            "delivery_date": "2026-03-01T10:00:00Z",
            "rating": rating,
            "comment": "Fresh and on time",
            "tags": ["fresh", "on-time"]
        }))
        .unwrap()
    }

    fn service() -> (FeedbackService, Arc<MemoryRepository<FeedbackEntry>>, Arc<MemoryRepository<ImpactStory>>) {
        let feedback: Arc<MemoryRepository<FeedbackEntry>> = Arc::new(MemoryRepository::newest_first());
        let stories: Arc<MemoryRepository<ImpactStory>> = Arc::new(MemoryRepository::newest_first());
        (FeedbackService::new(feedback.clone(), stories.clone()), feedback, stories)
    }

    #[tokio::test]
    async fn new_feedback_is_pending_and_owned_by_caller() {
        let (service, _, _) = service();
        let owner = Uuid::new_v4();

        let entry = service.create_feedback(owner, feedback_request(json!(4))).await.unwrap();
        assert_eq!(entry.ngo_user_id, owner);
        assert_eq!(entry.status, "pending");
        assert_eq!(entry.rating, Some(4));
        assert_eq!(entry.tags, vec!["fresh", "on-time"]);
        assert!(entry.corrective_action.is_none());
    }

    #[tokio::test]
    async fn rating_above_five_is_rejected_without_persisting() {
        let (service, repo, _) = service();

        let err = service
            .create_feedback(Uuid::new_v4(), feedback_request(json!(6)))
            .await
            .unwrap_err();

        match err {
            ServiceError::ValidationFailed(message) => assert_eq!(message, "rating must be at most 5"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn identities_are_fresh() {
        let (service, _, _) = service();
        let owner = Uuid::new_v4();
        let a = service.create_feedback(owner, feedback_request(json!(null))).await.unwrap();
        let b = service.create_feedback(owner, feedback_request(json!(null))).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn lists_are_owner_scoped_newest_first() {
        let (service, _, _) = service();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let first = service
            .create_story(owner, CreateStoryRequest { title: "First".into(), story: "a".into(), ..Default::default() })
            .await
            .unwrap();
        let second = service
            .create_story(owner, CreateStoryRequest { title: "Second".into(), story: "b".into(), ..Default::default() })
            .await
            .unwrap();
        service
            .create_story(other, CreateStoryRequest { title: "Elsewhere".into(), story: "c".into(), ..Default::default() })
            .await
            .unwrap();

        let ids: Vec<Uuid> = service.list_stories(owner).await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn story_counts_default_to_zero() {
        let (service, _, _) = service();
        let story = service
            .create_story(
                Uuid::new_v4(),
                CreateStoryRequest { title: "Soup week".into(), story: "We cooked".into(), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!((story.beneficiaries, story.meals_provided), (0, 0));
        assert!(story.tags.is_empty());
    }

    #[tokio::test]
    async fn store_fault_surfaces_as_database_error() {
        let (service, repo, _) = service();
        repo.fail_next();
        let err = service.list_feedback(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), "DATABASE_ERROR");
    }
}
