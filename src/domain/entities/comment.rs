use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    Comment,
    Question,
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentType::Comment => write!(f, "comment"),
            CommentType::Question => write!(f, "question"),
        }
    }
}

impl From<String> for CommentType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "question" => CommentType::Question,
            _ => CommentType::Comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub commentator_id: String,
    pub comment_type: CommentType,
    pub body: String,
    pub answered: bool,
    pub reminder_sent_at: Option<String>,
    pub created_at: String,
}

impl Comment {
    pub fn new(
        post_id: String,
        commentator_id: String,
        comment_type: CommentType,
        body: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            post_id,
            commentator_id,
            comment_type,
            body,
            answered: false,
            reminder_sent_at: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub commentator_id: String,
    #[serde(default = "default_comment_type")]
    pub comment_type: CommentType,
    pub body: String,
}

fn default_comment_type() -> CommentType {
    CommentType::Comment
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.commentator_id.trim().is_empty() {
            return Err("commentator_id is required".to_string());
        }
        if self.body.trim().is_empty() {
            return Err("Comment body cannot be empty".to_string());
        }
        Ok(())
    }
}
