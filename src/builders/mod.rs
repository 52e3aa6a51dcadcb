//! Payload builders for posts and users.
//!
//! Builders are pure: each call constructs a fresh record, overrides win
//! over defaults, and nothing is validated. Malformed values (an email
//! without `@`, a 300-character username) pass straight through so the
//! service's handling of them can be checked.

mod post;
mod scenarios;
mod types;
mod user;

pub use post::{build_post_data, PostOverrides, DEFAULT_BODY, DEFAULT_TITLE, DEFAULT_USER_ID};
pub use scenarios::{
    build_user_for_scenario, get_user_template, user_template, BuilderError, Scenario, Template,
    UserTemplate, LONG_USERNAME_LEN,
};
pub use types::{Address, Company, Geo, PostData, UserData, UserState};
pub use user::{
    build_address, build_address_with, build_company, build_company_with, build_user_data,
    build_user_data_with, defaults, AddressOverrides, CompanyOverrides, Fill, UserOverrides,
};
