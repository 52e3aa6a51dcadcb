//! restcheck - end-to-end checks for the JSONPlaceholder REST API.
//!
//! Exercises CRUD behavior on the posts and users resources through thin
//! API clients, using builder-generated payloads and named user scenarios.
//!
//! # Architecture
//!
//! - `fake`: faker-style random values for payload fields
//! - `builders`: post/user payload builders and the scenario template table
//! - `assertions`: response and body checks
//! - `client`: the `HttpContext` capability and the API clients over it
//! - `suite`: the posts and users check suites and their runner
//! - `config`: YAML run configuration
//! - `report`: output formatting (pretty, JSON)
//!
//! # Example
//!
//! ```no_run
//! use restcheck::builders::{build_post_data, PostOverrides};
//! use restcheck::client::{ApiClient, ReqwestContext};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = ReqwestContext::new(Duration::from_secs(10), "restcheck")?;
//! let api = ApiClient::new(context, "https://jsonplaceholder.typicode.com")?;
//!
//! let post = build_post_data(PostOverrides::new().with_title("foo").with_body("bar"));
//! let response = api.post("/posts", &post).await?;
//! assert!(response.ok());
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod cli;
pub mod client;
pub mod config;
pub mod fake;
pub mod report;
pub mod suite;

pub use assertions::{expect_all_to_have_property, AssertionError};
pub use builders::{
    build_post_data, build_user_data, build_user_for_scenario, get_user_template, Fill, PostData,
    Scenario, Template, UserData,
};
pub use client::{ApiClient, HttpContext, HttpResponse, ReqwestContext, UserApiClient};
pub use config::Config;
pub use suite::{SuiteKind, SuiteReport, SuiteRunner};
