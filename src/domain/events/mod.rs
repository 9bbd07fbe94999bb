use serde::Serialize;

/// Post lifecycle events emitted after a committed transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostEvent {
    PostDeleted {
        post_id: String,
        timestamp: String, // ISO 8601
    },
    PostRestored {
        post_id: String,
        timestamp: String, // ISO 8601
    },
}

impl PostEvent {
    pub fn post_id(&self) -> &str {
        match self {
            PostEvent::PostDeleted { post_id, .. } | PostEvent::PostRestored { post_id, .. } => {
                post_id
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PostEvent::PostDeleted { .. } => "post_deleted",
            PostEvent::PostRestored { .. } => "post_restored",
        }
    }
}
