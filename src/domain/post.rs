//! Feed posts, their like state and their editable fields.

use crate::domain::error::{MailfeedError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Backend identifier of a post.
pub type PostId = u64;

/// A post as it appears on a server-rendered feed or profile page.
///
/// The backend renders posts into the page itself; the client only enhances
/// them with like, edit and follow controls. A page seed is therefore handed to
/// the client rather than fetched through a JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCard {
    pub id: PostId,
    pub author: String,
    pub title: String,
    pub contents: String,
    #[serde(default)]
    pub modified: String,
    /// Whether the viewer authored the post and gets an edit control.
    #[serde(default)]
    pub editable: bool,
}

/// The posts (and optional profile owner) of one server-rendered page.
///
/// Seeds the feed the way the server-rendered markup seeds the browser client:
/// `{"profile": "alice", "posts": [...]}`, with `profile` only present on a
/// profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub posts: Vec<PostCard>,
}

impl FeedPage {
    /// Reads a page seed from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MailfeedError::Io`] if the file cannot be read and
    /// [`MailfeedError::Decode`] if it is not a page seed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| MailfeedError::Decode {
            endpoint: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Title and contents, the only fields the inline editor changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub contents: String,
}

/// A post as serialized by `GET /posts/edit/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub user_id: Option<u64>,
    pub title: String,
    pub contents: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
}

impl PostRecord {
    /// The editable subset of the record.
    #[must_use]
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            contents: self.contents.clone(),
        }
    }
}

/// Reply of `POST /posts/edit/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditReceipt {
    #[serde(default)]
    pub success: bool,
    pub post: PostRecord,
}

/// Reply of `GET /posts/like/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSummary {
    #[serde(default)]
    pub is_liked: bool,
    pub like_count: u32,
    #[serde(default)]
    pub liked_by: Vec<String>,
}

/// Reply of `PUT /posts/like/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub post_liked: bool,
}
