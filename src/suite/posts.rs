//! Checks against the posts and comments endpoints.

use serde_json::json;

use super::CheckError;
use crate::assertions::{
    expect_all_to_have_property, expect_has_property, expect_matches_object,
    expect_non_empty_array, expect_ok, expect_property,
};
use crate::builders::{build_post_data, PostOverrides};
use crate::client::{ApiClient, HttpContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostCheck {
    ListPosts,
    GetPost,
    ListPostComments,
    QueryComments,
    CreatePost,
    ReplacePost,
    PatchPost,
    DeletePost,
}

impl PostCheck {
    pub const ALL: [PostCheck; 8] = [
        PostCheck::ListPosts,
        PostCheck::GetPost,
        PostCheck::ListPostComments,
        PostCheck::QueryComments,
        PostCheck::CreatePost,
        PostCheck::ReplacePost,
        PostCheck::PatchPost,
        PostCheck::DeletePost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PostCheck::ListPosts => "GET /posts",
            PostCheck::GetPost => "GET /posts/1",
            PostCheck::ListPostComments => "GET /posts/1/comments",
            PostCheck::QueryComments => "GET /comments?postId=1",
            PostCheck::CreatePost => "POST /posts",
            PostCheck::ReplacePost => "PUT /posts/1",
            PostCheck::PatchPost => "PATCH /posts/1",
            PostCheck::DeletePost => "DELETE /posts/1",
        }
    }

    pub async fn run<C: HttpContext>(&self, api: &ApiClient<C>) -> Result<(), CheckError> {
        match self {
            PostCheck::ListPosts => {
                let response = api.get("/posts").await?;
                expect_ok(&response)?;
                expect_non_empty_array(&response.json()?)?;
            }
            PostCheck::GetPost => {
                let response = api.get("/posts/1").await?;
                expect_ok(&response)?;
                expect_property(&response.json()?, "id", 1)?;
            }
            PostCheck::ListPostComments => comments_for_post_one(api, "/posts/1/comments").await?,
            PostCheck::QueryComments => comments_for_post_one(api, "/comments?postId=1").await?,
            PostCheck::CreatePost => {
                let new_post =
                    build_post_data(PostOverrides::new().with_title("foo").with_body("bar"));
                let response = api.post("/posts", &new_post).await?;
                expect_ok(&response)?;
                let body = response.json()?;
                expect_matches_object(&body, &new_post)?;
                expect_has_property(&body, "id")?;
            }
            PostCheck::ReplacePost => {
                let updated = build_post_data(
                    PostOverrides::new()
                        .with_id(1)
                        .with_title("updated")
                        .with_body("updated body"),
                );
                let response = api.put("/posts/1", &updated).await?;
                expect_ok(&response)?;
                expect_matches_object(&response.json()?, &updated)?;
            }
            PostCheck::PatchPost => {
                let response = api
                    .patch("/posts/1", &json!({ "title": "patched title" }))
                    .await?;
                expect_ok(&response)?;
                expect_property(&response.json()?, "title", "patched title")?;
            }
            PostCheck::DeletePost => {
                let response = api.delete("/posts/1").await?;
                expect_ok(&response)?;
            }
        }
        Ok(())
    }
}

async fn comments_for_post_one<C: HttpContext>(
    api: &ApiClient<C>,
    endpoint: &str,
) -> Result<(), CheckError> {
    let response = api.get(endpoint).await?;
    expect_ok(&response)?;
    let body = response.json()?;
    let comments = expect_non_empty_array(&body)?;
    expect_all_to_have_property(comments, "postId", 1)?;
    Ok(())
}
