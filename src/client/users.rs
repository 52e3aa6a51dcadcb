//! Fixed-path client for the users resource.

use super::{normalize_base_url, ClientError, HttpContext, HttpResponse};
use crate::builders::UserData;

#[derive(Debug, Clone)]
pub struct UserApiClient<C> {
    context: C,
    base_url: String,
}

impl<C: HttpContext> UserApiClient<C> {
    pub fn new(context: C, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            context,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /users`
    pub async fn get_all_users(&self) -> Result<HttpResponse, ClientError> {
        let url = format!("{}/users", self.base_url);
        Ok(self.context.get(&url).await?)
    }

    /// `GET /users/{id}`, with `id` interpolated as-is.
    pub async fn get_user_by_id(&self, id: u64) -> Result<HttpResponse, ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        Ok(self.context.get(&url).await?)
    }

    /// `POST /users`
    pub async fn create_user(&self, user: &UserData) -> Result<HttpResponse, ClientError> {
        let url = format!("{}/users", self.base_url);
        let body = serde_json::to_value(user)?;
        Ok(self.context.post(&url, Some(&body)).await?)
    }
}
