//! Checks against the users endpoints, including one creation check per
//! user scenario.

use serde_json::Value;

use super::CheckError;
use crate::assertions::{
    expect_has_property, expect_longer_than, expect_no_property, expect_non_empty_array,
    expect_ok, expect_property, AssertionError,
};
use crate::builders::{build_user_for_scenario, Template, UserState};
use crate::client::{HttpContext, UserApiClient};

/// What the service should echo back for an email field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailExpectation {
    Absent,
    Present,
    Equals(&'static str),
}

/// Expected shape of the created user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub email: EmailExpectation,
    pub role: Option<&'static str>,
    pub state: Option<UserState>,
    pub long_username: bool,
}

impl Expectation {
    const fn email(email: EmailExpectation) -> Self {
        Self {
            email,
            role: None,
            state: None,
            long_username: false,
        }
    }

    /// Check a response body against this expectation.
    pub fn verify(&self, body: &Value) -> Result<(), AssertionError> {
        match self.email {
            EmailExpectation::Absent => expect_no_property(body, "email")?,
            EmailExpectation::Equals(email) => expect_property(body, "email", email)?,
            EmailExpectation::Present => expect_has_property(body, "email")?,
        }
        if let Some(role) = self.role {
            expect_property(body, "role", role)?;
        }
        if let Some(state) = self.state {
            expect_property(body, "state", state.as_str())?;
        }
        if self.long_username {
            expect_longer_than(body, "username", 255)?;
        }
        Ok(())
    }
}

/// One parameterized creation case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserScenarioCase {
    pub template: Template,
    pub expected: Expectation,
}

impl UserScenarioCase {
    pub fn description(&self) -> &'static str {
        self.template.description()
    }
}

/// The creation cases, in run order.
pub fn user_scenario_cases() -> Vec<UserScenarioCase> {
    vec![
        UserScenarioCase {
            template: Template::Admin,
            expected: Expectation {
                role: Some("admin"),
                state: Some(UserState::Active),
                ..Expectation::email(EmailExpectation::Present)
            },
        },
        UserScenarioCase {
            template: Template::Guest,
            expected: Expectation {
                role: Some("guest"),
                state: Some(UserState::Active),
                ..Expectation::email(EmailExpectation::Present)
            },
        },
        UserScenarioCase {
            template: Template::MissingEmail,
            expected: Expectation::email(EmailExpectation::Absent),
        },
        UserScenarioCase {
            template: Template::InvalidEmail,
            expected: Expectation::email(EmailExpectation::Equals("not-an-email")),
        },
        UserScenarioCase {
            template: Template::LongUsername,
            expected: Expectation {
                long_username: true,
                ..Expectation::email(EmailExpectation::Present)
            },
        },
        UserScenarioCase {
            template: Template::Deactivated,
            expected: Expectation {
                state: Some(UserState::Deactivated),
                ..Expectation::email(EmailExpectation::Present)
            },
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCheck {
    ListUsers,
    GetUser,
    CreateUser(UserScenarioCase),
}

impl UserCheck {
    pub fn all() -> Vec<UserCheck> {
        let mut checks = vec![UserCheck::ListUsers, UserCheck::GetUser];
        checks.extend(user_scenario_cases().into_iter().map(UserCheck::CreateUser));
        checks
    }

    pub fn name(&self) -> String {
        match self {
            UserCheck::ListUsers => "GET /users".to_string(),
            UserCheck::GetUser => "GET /users/1".to_string(),
            UserCheck::CreateUser(case) => format!("POST /users ({})", case.description()),
        }
    }

    pub async fn run<C: HttpContext>(&self, users: &UserApiClient<C>) -> Result<(), CheckError> {
        match self {
            UserCheck::ListUsers => {
                let response = users.get_all_users().await?;
                expect_ok(&response)?;
                expect_non_empty_array(&response.json()?)?;
            }
            UserCheck::GetUser => {
                let response = users.get_user_by_id(1).await?;
                expect_ok(&response)?;
                expect_property(&response.json()?, "id", 1)?;
            }
            UserCheck::CreateUser(case) => {
                let user = build_user_for_scenario(case.template.into(), None)?;
                let response = users.create_user(&user).await?;
                expect_ok(&response)?;
                let body = response.json()?;
                case.expected.verify(&body)?;
                expect_has_property(&body, "id")?;
            }
        }
        Ok(())
    }
}
