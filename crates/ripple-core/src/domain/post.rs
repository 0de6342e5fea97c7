use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a feed entry authored by a user.
///
/// `creator_id` is set once at creation and is the authoritative ownership
/// link; only the creator may update or delete the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `creator_id`.
    pub fn new(creator_id: Uuid, title: String, content: String, image_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            image_url,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit. A `None` image keeps the current one.
    pub fn apply_edit(&mut self, title: String, content: String, image_url: Option<String>) {
        self.title = title;
        self.content = content;
        if let Some(image_url) = image_url {
            self.image_url = image_url;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_without_image_keeps_existing_one() {
        let creator = Uuid::new_v4();
        let mut post = Post::new(
            creator,
            "First post".to_string(),
            "Hello world".to_string(),
            "images/one.png".to_string(),
        );

        post.apply_edit("Edited".to_string(), "Changed".to_string(), None);

        assert_eq!(post.title, "Edited");
        assert_eq!(post.image_url, "images/one.png");
        assert_eq!(post.creator_id, creator);
        assert!(post.updated_at >= post.created_at);
    }

    #[test]
    fn edit_with_image_replaces_it() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "First post".to_string(),
            "Hello world".to_string(),
            "images/one.png".to_string(),
        );

        post.apply_edit(
            "Edited".to_string(),
            "Changed".to_string(),
            Some("images/two.png".to_string()),
        );

        assert_eq!(post.image_url, "images/two.png");
    }
}
