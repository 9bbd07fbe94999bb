use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Published => write!(f, "published"),
            PostStatus::Archived => write!(f, "archived"),
        }
    }
}

// Convert from string (for SQLx)
impl From<String> for PostStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "published" => PostStatus::Published,
            "archived" => PostStatus::Archived,
            _ => PostStatus::Draft,
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(format!("Unknown post status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    /// Only ever written by the deleter and restorer services.
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Post {
    pub fn new(author_id: String, title: String, body: String, status: PostStatus) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author_id,
            title,
            body,
            status,
            is_deleted: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub status: Option<PostStatus>,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.author_id.trim().is_empty() {
            return Err("author_id is required".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}
