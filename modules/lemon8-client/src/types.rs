use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wrapper for Lemon8 API responses (`{"data": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// A vendor id that arrives as either a JSON number or a string.
/// Serializes back in its original form so raw documents round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(i64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(n) => write!(f, "{n}"),
            Id::Str(s) => write!(f, "{s}"),
        }
    }
}

/// A user profile from the homepage endpoint. Only the unique name is
/// needed for link/path construction; everything else is carried verbatim
/// into the output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_unique_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The stream endpoint's payload (`data.items`).
#[derive(Debug, Clone, Deserialize)]
pub struct Stream {
    pub items: Vec<Post>,
}

/// A single post from the user's stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub item_id: Id,
    pub group_id: Id,
    pub media_id: Id,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The comment-list endpoint's payload (`data.data`).
#[derive(Debug, Clone, Deserialize)]
pub struct CommentPage {
    pub data: Vec<Comment>,
}

/// A comment as listed under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
