//! Integration tests for the suite runner.
//!
//! A wiremock server stands in for JSONPlaceholder: it serves canned
//! posts, comments, and users and echoes created records back with an id,
//! the way the real service does.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use common::RecordingContext;
use restcheck::client::ReqwestContext;
use restcheck::suite::{SuiteKind, SuiteRunner};

fn post(id: u64) -> Value {
    json!({
        "userId": 1,
        "id": id,
        "title": format!("post {}", id),
        "body": "lorem ipsum"
    })
}

fn comment(id: u64, post_id: u64) -> Value {
    json!({
        "postId": post_id,
        "id": id,
        "name": "id labore ex et quam laborum",
        "email": "Eliseo@gardner.biz",
        "body": "laudantium enim quasi"
    })
}

fn user(id: u64) -> Value {
    json!({
        "id": id,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

/// Respond with the request body plus an `id`, minus any `drop` keys.
fn echo(
    status: u16,
    id: u64,
    drop: &'static [&'static str],
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync {
    move |request: &Request| {
        let mut body: Value = serde_json::from_slice(&request.body).unwrap_or_else(|_| json!({}));
        if let Some(object) = body.as_object_mut() {
            for key in drop {
                object.remove(*key);
            }
            object.insert("id".to_string(), json!(id));
        }
        ResponseTemplate::new(status).set_body_json(body)
    }
}

async fn mount_posts(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post(1), post(2)])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post(1)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/1/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([comment(1, 1), comment(2, 1)])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([comment(1, 1), comment(2, 1)])),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(echo(201, 101, &[]))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/posts/1"))
        .respond_with(echo(200, 1, &[]))
        .mount(server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/posts/1"))
        .respond_with(|request: &Request| {
            let patch: Value = serde_json::from_slice(&request.body).unwrap_or_else(|_| json!({}));
            let mut merged = post(1);
            if let (Some(target), Some(changes)) = (merged.as_object_mut(), patch.as_object()) {
                for (key, value) in changes {
                    target.insert(key.clone(), value.clone());
                }
            }
            ResponseTemplate::new(200).set_body_json(merged)
        })
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

async fn mount_users(server: &MockServer, drop_on_create: &'static [&'static str]) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user(1), user(2)])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user(1)))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(echo(201, 11, drop_on_create))
        .mount(server)
        .await;
}

fn context() -> ReqwestContext {
    ReqwestContext::new(Duration::from_secs(5), "restcheck-test").unwrap()
}

#[tokio::test]
async fn test_full_run_passes_against_faithful_server() {
    let server = MockServer::start().await;
    mount_posts(&server).await;
    mount_users(&server, &[]).await;

    let runner = SuiteRunner::new(server.uri());
    let report = runner.run(&SuiteKind::ALL, context()).await.unwrap();

    let failures: Vec<_> = report
        .failures()
        .map(|o| format!("{}: {:?}", o.name, o.message))
        .collect();
    assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
    assert_eq!(report.total(), 16);
    assert!(report.passed());
    assert_eq!(report.base_url, server.uri());
}

#[tokio::test]
async fn test_outcomes_follow_suite_order() {
    let server = MockServer::start().await;
    mount_posts(&server).await;
    mount_users(&server, &[]).await;

    let report = SuiteRunner::new(server.uri())
        .run(&[SuiteKind::Users, SuiteKind::Posts], context())
        .await
        .unwrap();

    let names: Vec<&str> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names[0], "GET /users");
    assert_eq!(names[2], "POST /users (admin user)");
    assert_eq!(names[8], "GET /posts");
    assert_eq!(names[15], "DELETE /posts/1");
}

#[tokio::test]
async fn test_dropped_fields_fail_only_affected_scenarios() {
    let server = MockServer::start().await;
    mount_users(&server, &["role"]).await;

    let outcomes = SuiteRunner::new(server.uri())
        .run_users(context())
        .await
        .unwrap();

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(
        failed,
        vec!["POST /users (admin user)", "POST /users (guest user)"]
    );

    let admin = outcomes
        .iter()
        .find(|o| o.name == "POST /users (admin user)")
        .unwrap();
    assert!(admin.message.as_deref().unwrap().contains("role"));
}

#[tokio::test]
async fn test_server_echoing_email_fails_missing_email_case() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(|request: &Request| {
            let mut body: Value = serde_json::from_slice(&request.body).unwrap();
            body["email"] = json!("filled-in@example.com");
            body["id"] = json!(11);
            ResponseTemplate::new(201).set_body_json(body)
        })
        .mount(&server)
        .await;

    let outcomes = SuiteRunner::new(server.uri())
        .with_filter(&["POST /users*".to_string()])
        .unwrap()
        .run_users(context())
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 6);
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(
        failed,
        vec![
            "POST /users (user with missing email)",
            "POST /users (user with invalid email)"
        ]
    );
}

#[tokio::test]
async fn test_every_check_runs_when_all_fail() {
    let context = Arc::new(RecordingContext::new(500, "{}"));
    let report = SuiteRunner::new("http://localhost:9")
        .run(&SuiteKind::ALL, context.clone())
        .await
        .unwrap();

    assert_eq!(report.total(), 16);
    assert_eq!(report.failed(), 16);
    assert_eq!(context.requests().len(), 16);
    assert!(report.outcomes[0]
        .message
        .as_deref()
        .unwrap()
        .contains("HTTP 500"));
}

#[tokio::test]
async fn test_runner_borrows_the_callers_context() {
    let context = RecordingContext::new(200, "{}");
    let report = SuiteRunner::new("http://localhost:9")
        .run(&[SuiteKind::Posts], &context)
        .await
        .unwrap();

    assert_eq!(report.total(), 8);
    assert_eq!(context.requests().len(), 8);
}

#[tokio::test]
async fn test_filter_limits_requests() {
    let context = Arc::new(RecordingContext::new(200, "[]"));
    let outcomes = SuiteRunner::new("http://localhost:9")
        .with_filter(&["DELETE *".to_string(), "PATCH *".to_string()])
        .unwrap()
        .run_posts(context.clone())
        .await
        .unwrap();

    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["PATCH /posts/1", "DELETE /posts/1"]);
    assert_eq!(context.requests().len(), 2);
}

#[tokio::test]
async fn test_invalid_base_url_is_setup_error() {
    let context = RecordingContext::new(200, "{}");
    let result = SuiteRunner::new("localhost").run_posts(context).await;
    assert!(result.is_err());
}
