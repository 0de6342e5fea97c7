use serde::Serialize;
use uuid::Uuid;

use super::Post;

/// Change notification fanned out to every connected feed client after a
/// post mutation has been persisted.
///
/// Serializes to `{"action": "create"|"update"|"delete", "post": ...}` where
/// `post` is the full post for create/update and just the id for delete.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PostEvent {
    Create { post: Post },
    Update { post: Post },
    Delete { post: Uuid },
}

impl PostEvent {
    pub fn action(&self) -> &'static str {
        match self {
            PostEvent::Create { .. } => "create",
            PostEvent::Update { .. } => "update",
            PostEvent::Delete { .. } => "delete",
        }
    }
}
