//! Review response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::reviews::models::Review;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub user_name: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub images: Vec<String>,
    pub admin_reply: Option<String>,
    pub replied_at: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            uuid: review.uuid.into_uuid(),
            user_name: review.user_name,
            rating: review.rating,
            comment: review.comment,
            images: review.images,
            admin_reply: review.admin_reply,
            replied_at: review.replied_at.map(|at| at.to_string()),
            created_at: review.created_at.to_string(),
        }
    }
}
