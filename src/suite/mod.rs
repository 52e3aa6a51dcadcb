//! Check suites and the runner that executes them.
//!
//! A suite is an ordered list of named checks sharing one client. Checks are
//! independent: a failure is recorded and the next check still runs.

mod posts;
mod users;

pub use posts::PostCheck;
pub use users::{user_scenario_cases, EmailExpectation, Expectation, UserCheck, UserScenarioCase};

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Instant;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assertions::AssertionError;
use crate::builders::BuilderError;
use crate::client::{ApiClient, ClientError, HttpContext, HttpError, UserApiClient};

/// Why a single check failed.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    #[error(transparent)]
    Builder(#[from] BuilderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteKind {
    Posts,
    Users,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 2] = [SuiteKind::Posts, SuiteKind::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteKind::Posts => "posts",
            SuiteKind::Users => "users",
        }
    }

    /// Names of the checks in this suite, in run order.
    pub fn check_names(&self) -> Vec<String> {
        match self {
            SuiteKind::Posts => PostCheck::ALL.iter().map(|c| c.name().to_string()).collect(),
            SuiteKind::Users => UserCheck::all().iter().map(|c| c.name()).collect(),
        }
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuiteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posts" => Ok(SuiteKind::Posts),
            "users" => Ok(SuiteKind::Users),
            other => Err(format!(
                "unknown suite {:?}, must be 'posts' or 'users'",
                other
            )),
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub suite: SuiteKind,
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub duration_ms: u64,
}

/// All outcomes of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// True when every check passed.
    pub fn passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

async fn timed<F>(suite: SuiteKind, name: String, check: F) -> CheckOutcome
where
    F: Future<Output = Result<(), CheckError>>,
{
    let start = Instant::now();
    let result = check.await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => {
            tracing::debug!(%suite, check = %name, duration_ms, "check passed");
            CheckOutcome {
                suite,
                name,
                passed: true,
                message: None,
                duration_ms,
            }
        }
        Err(e) => {
            tracing::warn!(%suite, check = %name, error = %e, "check failed");
            CheckOutcome {
                suite,
                name,
                passed: false,
                message: Some(e.to_string()),
                duration_ms,
            }
        }
    }
}

/// Runs suites sequentially against one base URL.
#[derive(Debug, Clone)]
pub struct SuiteRunner {
    base_url: String,
    filter: Option<GlobSet>,
}

impl SuiteRunner {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            filter: None,
        }
    }

    /// Only run checks whose name matches one of `patterns`.
    ///
    /// An empty list keeps every check.
    pub fn with_filter(mut self, patterns: &[String]) -> Result<Self, globset::Error> {
        if patterns.is_empty() {
            self.filter = None;
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        self.filter = Some(builder.build()?);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn selected(&self, name: &str) -> bool {
        self.filter.as_ref().map_or(true, |set| set.is_match(name))
    }

    /// Run the posts suite with one shared [`ApiClient`].
    pub async fn run_posts<C: HttpContext>(
        &self,
        context: C,
    ) -> Result<Vec<CheckOutcome>, ClientError> {
        let api = ApiClient::new(context, &self.base_url)?;
        let mut outcomes = Vec::new();
        for check in PostCheck::ALL {
            if !self.selected(check.name()) {
                continue;
            }
            outcomes.push(timed(SuiteKind::Posts, check.name().to_string(), check.run(&api)).await);
        }
        Ok(outcomes)
    }

    /// Run the users suite with one shared [`UserApiClient`].
    pub async fn run_users<C: HttpContext>(
        &self,
        context: C,
    ) -> Result<Vec<CheckOutcome>, ClientError> {
        let users = UserApiClient::new(context, &self.base_url)?;
        let mut outcomes = Vec::new();
        for check in UserCheck::all() {
            let name = check.name();
            if !self.selected(&name) {
                continue;
            }
            outcomes.push(timed(SuiteKind::Users, name, check.run(&users)).await);
        }
        Ok(outcomes)
    }

    /// Run each suite in `suites`, in order, and collect the outcomes.
    pub async fn run<C: HttpContext + Clone>(
        &self,
        suites: &[SuiteKind],
        context: C,
    ) -> Result<SuiteReport, ClientError> {
        let mut report = SuiteReport {
            base_url: self.base_url.clone(),
            outcomes: Vec::new(),
        };
        for suite in suites {
            tracing::debug!(%suite, base_url = %self.base_url, "running suite");
            let outcomes = match suite {
                SuiteKind::Posts => self.run_posts(context.clone()).await?,
                SuiteKind::Users => self.run_users(context.clone()).await?,
            };
            report.outcomes.extend(outcomes);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_kind_parse() {
        assert_eq!("posts".parse::<SuiteKind>(), Ok(SuiteKind::Posts));
        assert_eq!("users".parse::<SuiteKind>(), Ok(SuiteKind::Users));
        assert!("comments".parse::<SuiteKind>().is_err());
    }

    #[test]
    fn test_filter_selects_by_glob() {
        let runner = SuiteRunner::new("http://localhost")
            .with_filter(&["GET /posts*".to_string()])
            .unwrap();
        assert!(runner.selected("GET /posts"));
        assert!(runner.selected("GET /posts/1/comments"));
        assert!(!runner.selected("POST /posts"));
    }

    #[test]
    fn test_empty_filter_selects_all() {
        let runner = SuiteRunner::new("http://localhost").with_filter(&[]).unwrap();
        assert!(runner.selected("DELETE /posts/1"));
    }

    #[test]
    fn test_report_counts() {
        let outcome = |passed| CheckOutcome {
            suite: SuiteKind::Posts,
            name: "GET /posts".to_string(),
            passed,
            message: None,
            duration_ms: 1,
        };
        let report = SuiteReport {
            base_url: "http://localhost".to_string(),
            outcomes: vec![outcome(true), outcome(false), outcome(true)],
        };
        assert_eq!(report.total(), 3);
        assert_eq!(report.failed(), 1);
        assert!(!report.passed());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_check_names_per_suite() {
        assert_eq!(SuiteKind::Posts.check_names().len(), 8);
        assert_eq!(SuiteKind::Users.check_names().len(), 8);
    }
}
