//! Named user templates for edge-case scenarios.
//!
//! Each template has exactly one table entry, picked by an exhaustive match
//! in [`user_template`]. [`get_user_template`] always returns an owned copy,
//! so callers cannot corrupt the shared entries.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{UserData, UserState};
use super::user::{
    build_address, build_company, build_user_data, AddressOverrides, CompanyOverrides, Fill,
    UserOverrides,
};

/// Username length used by the long-username template.
pub const LONG_USERNAME_LEN: usize = 300;

/// Errors raised while resolving a scenario.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("scenario 'custom' requires user overrides")]
    MissingCustomOverrides,
    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),
}

/// A named entry in the template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Template {
    Admin,
    Guest,
    MissingEmail,
    InvalidEmail,
    LongUsername,
    Deactivated,
    Random,
}

impl Template {
    pub const ALL: [Template; 7] = [
        Template::Admin,
        Template::Guest,
        Template::MissingEmail,
        Template::InvalidEmail,
        Template::LongUsername,
        Template::Deactivated,
        Template::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Admin => "admin",
            Template::Guest => "guest",
            Template::MissingEmail => "missingEmail",
            Template::InvalidEmail => "invalidEmail",
            Template::LongUsername => "longUsername",
            Template::Deactivated => "deactivated",
            Template::Random => "random",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Template::Admin => "admin user",
            Template::Guest => "guest user",
            Template::MissingEmail => "user with missing email",
            Template::InvalidEmail => "user with invalid email",
            Template::LongUsername => "user with long username",
            Template::Deactivated => "deactivated user",
            Template::Random => "randomly generated user",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Template {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| BuilderError::UnknownScenario(s.to_string()))
    }
}

/// A table entry: a fixed record or a generator producing a fresh one.
#[derive(Debug, Clone)]
pub enum UserTemplate {
    Fixed(UserData),
    Generated(fn() -> UserData),
}

impl UserTemplate {
    /// Produce an owned user from this entry.
    pub fn resolve(&self) -> UserData {
        match self {
            UserTemplate::Fixed(user) => user.clone(),
            UserTemplate::Generated(generate) => generate(),
        }
    }
}

/// Either a template or caller-supplied overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Template(Template),
    Custom,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Template(t) => write!(f, "{}", t),
            Scenario::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for Scenario {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "custom" {
            return Ok(Scenario::Custom);
        }
        s.parse().map(Scenario::Template)
    }
}

impl From<Template> for Scenario {
    fn from(template: Template) -> Self {
        Scenario::Template(template)
    }
}

/// Fixed fields of a static template. Address and company are the
/// placeholder records with only the city / company name changed.
struct FixedUser {
    name: &'static str,
    username: String,
    email: Option<&'static str>,
    city: &'static str,
    phone: &'static str,
    website: &'static str,
    company: &'static str,
    role: &'static str,
    state: UserState,
}

impl FixedUser {
    fn into_user(self) -> UserData {
        let mut overrides = UserOverrides::new()
            .with_name(self.name)
            .with_username(self.username)
            .with_address(build_address(
                AddressOverrides::new().with_city(self.city),
                Fill::Placeholder,
            ))
            .with_phone(self.phone)
            .with_website(self.website)
            .with_company(build_company(
                CompanyOverrides::new().with_name(self.company),
                Fill::Placeholder,
            ))
            .with_role(self.role)
            .with_state(self.state);
        overrides = match self.email {
            Some(email) => overrides.with_email(email),
            None => overrides.without_email(),
        };
        build_user_data(overrides, Fill::Placeholder)
    }
}

fn random_user() -> UserData {
    build_user_data(UserOverrides::default(), Fill::Random)
}

fn fixed(user: FixedUser) -> UserTemplate {
    UserTemplate::Fixed(user.into_user())
}

lazy_static! {
    static ref ADMIN: UserTemplate = fixed(FixedUser {
        name: "Admin User",
        username: "adminuser".to_string(),
        email: Some("admin@example.com"),
        city: "Admin City",
        phone: "999-999-9999",
        website: "adminsite.com",
        company: "AdminCorp",
        role: "admin",
        state: UserState::Active,
    });
    static ref GUEST: UserTemplate = fixed(FixedUser {
        name: "Guest User",
        username: "guestuser".to_string(),
        email: Some("guest@example.com"),
        city: "Guestville",
        phone: "000-000-0000",
        website: "guestsite.com",
        company: "GuestCorp",
        role: "guest",
        state: UserState::Active,
    });
    static ref MISSING_EMAIL: UserTemplate = fixed(FixedUser {
        name: "No Email User",
        username: "noemailuser".to_string(),
        email: None,
        city: "NoEmail City",
        phone: "111-111-1111",
        website: "noemail.com",
        company: "NoEmailCorp",
        role: "tester",
        state: UserState::Active,
    });
    static ref INVALID_EMAIL: UserTemplate = fixed(FixedUser {
        name: "Invalid Email User",
        username: "invalidemailuser".to_string(),
        email: Some("not-an-email"),
        city: "InvalidEmail City",
        phone: "222-222-2222",
        website: "invalidemail.com",
        company: "InvalidEmailCorp",
        role: "tester",
        state: UserState::Active,
    });
    static ref LONG_USERNAME: UserTemplate = fixed(FixedUser {
        name: "Long Username User",
        username: "a".repeat(LONG_USERNAME_LEN),
        email: Some("longusername@example.com"),
        city: "LongUsername City",
        phone: "333-333-3333",
        website: "longusername.com",
        company: "LongUsernameCorp",
        role: "tester",
        state: UserState::Active,
    });
    static ref DEACTIVATED: UserTemplate = fixed(FixedUser {
        name: "Deactivated User",
        username: "deactivateduser".to_string(),
        email: Some("deactivated@example.com"),
        city: "Deactivated City",
        phone: "444-444-4444",
        website: "deactivated.com",
        company: "DeactivatedCorp",
        role: "user",
        state: UserState::Deactivated,
    });
}

static RANDOM: UserTemplate = UserTemplate::Generated(random_user);

/// The table entry for `template`.
pub fn user_template(template: Template) -> &'static UserTemplate {
    match template {
        Template::Admin => &*ADMIN,
        Template::Guest => &*GUEST,
        Template::MissingEmail => &*MISSING_EMAIL,
        Template::InvalidEmail => &*INVALID_EMAIL,
        Template::LongUsername => &*LONG_USERNAME,
        Template::Deactivated => &*DEACTIVATED,
        Template::Random => &RANDOM,
    }
}

/// Look up a template and return an owned user.
///
/// Generator entries produce a fresh random user per call.
pub fn get_user_template(template: Template) -> UserData {
    user_template(template).resolve()
}

/// Resolve a scenario to a user.
///
/// `Scenario::Custom` builds from `custom` with placeholder fill and fails
/// when no overrides are given. For template scenarios `custom` is ignored.
pub fn build_user_for_scenario(
    scenario: Scenario,
    custom: Option<UserOverrides>,
) -> Result<UserData, BuilderError> {
    match (scenario, custom) {
        (Scenario::Custom, Some(overrides)) => Ok(build_user_data(overrides, Fill::Placeholder)),
        (Scenario::Custom, None) => Err(BuilderError::MissingCustomOverrides),
        (Scenario::Template(template), custom) => {
            if custom.is_some() {
                tracing::debug!(%template, "ignoring custom overrides for template scenario");
            }
            Ok(get_user_template(template))
        }
    }
}
