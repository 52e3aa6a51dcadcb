//! Post payload builder.

use super::types::PostData;

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_BODY: &str = "Default Body";
pub const DEFAULT_USER_ID: u64 = 1;

/// Fields to set on a post instead of the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOverrides {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user_id: Option<u64>,
}

impl PostOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Build a post, taking each field from `overrides` when set.
///
/// No validation is applied.
pub fn build_post_data(overrides: PostOverrides) -> PostData {
    PostData {
        id: overrides.id,
        title: overrides.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        body: overrides.body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
        user_id: overrides.user_id.unwrap_or(DEFAULT_USER_ID),
    }
}
