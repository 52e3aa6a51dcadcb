//! User, address, and company payload builders.
//!
//! Every builder takes an overrides struct and a [`Fill`] mode. Fields set on
//! the overrides always win; the remaining fields come either from fixed
//! placeholder values or from a [`Faker`].

use rand::Rng;

use super::types::{Address, Company, Geo, UserData, UserState};
use crate::fake::Faker;

/// How to fill fields the caller did not override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// Fixed, deterministic placeholder values.
    #[default]
    Placeholder,
    /// Faker-generated values, different on every call.
    Random,
}

impl Fill {
    pub fn from_random(use_random: bool) -> Self {
        if use_random {
            Fill::Random
        } else {
            Fill::Placeholder
        }
    }
}

/// Placeholder values used by [`Fill::Placeholder`].
pub mod defaults {
    pub const NAME: &str = "Default Name";
    pub const USERNAME: &str = "defaultuser";
    pub const EMAIL: &str = "default@example.com";
    pub const PHONE: &str = "123-456-7890";
    pub const WEBSITE: &str = "example.com";

    pub const STREET: &str = "123 Main St";
    pub const SUITE: &str = "Apt. 1";
    pub const CITY: &str = "Metropolis";
    pub const ZIPCODE: &str = "12345";
    pub const LAT: &str = "0.0000";
    pub const LNG: &str = "0.0000";

    pub const COMPANY_NAME: &str = "Default Company";
    pub const CATCH_PHRASE: &str = "Innovate and Excel";
    pub const BS: &str = "synergize scalable solutions";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressOverrides {
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub geo: Option<Geo>,
}

impl AddressOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.zipcode = Some(zipcode.into());
        self
    }

    pub fn with_geo(mut self, lat: impl Into<String>, lng: impl Into<String>) -> Self {
        self.geo = Some(Geo {
            lat: lat.into(),
            lng: lng.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyOverrides {
    pub name: Option<String>,
    pub catch_phrase: Option<String>,
    pub bs: Option<String>,
}

impl CompanyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_catch_phrase(mut self, catch_phrase: impl Into<String>) -> Self {
        self.catch_phrase = Some(catch_phrase.into());
        self
    }

    pub fn with_bs(mut self, bs: impl Into<String>) -> Self {
        self.bs = Some(bs.into());
        self
    }
}

/// Fields to set on a user instead of the defaults.
///
/// `address` and `company` replace the nested record wholesale.
/// `email` is doubly optional: `None` leaves the default in place,
/// `Some(None)` removes the field from the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserOverrides {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<Option<String>>,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub company: Option<Company>,
    pub role: Option<String>,
    pub state: Option<UserState>,
}

impl UserOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(Some(email.into()));
        self
    }

    pub fn without_email(mut self) -> Self {
        self.email = Some(None);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_state(mut self, state: UserState) -> Self {
        self.state = Some(state);
        self
    }
}

pub fn build_address(overrides: AddressOverrides, fill: Fill) -> Address {
    match fill {
        Fill::Placeholder => placeholder_address(overrides),
        Fill::Random => build_address_with(overrides, &mut Faker::new()),
    }
}

/// Random address from the given faker; overridden fields are kept as-is.
pub fn build_address_with<R: Rng>(overrides: AddressOverrides, faker: &mut Faker<R>) -> Address {
    Address {
        street: overrides.street.unwrap_or_else(|| faker.street_address()),
        suite: overrides.suite.unwrap_or_else(|| faker.suite()),
        city: overrides.city.unwrap_or_else(|| faker.city()),
        zipcode: overrides.zipcode.unwrap_or_else(|| faker.zip_code()),
        geo: overrides.geo.unwrap_or_else(|| Geo {
            lat: faker.latitude(),
            lng: faker.longitude(),
        }),
    }
}

fn placeholder_address(overrides: AddressOverrides) -> Address {
    Address {
        street: overrides.street.unwrap_or_else(|| defaults::STREET.to_string()),
        suite: overrides.suite.unwrap_or_else(|| defaults::SUITE.to_string()),
        city: overrides.city.unwrap_or_else(|| defaults::CITY.to_string()),
        zipcode: overrides.zipcode.unwrap_or_else(|| defaults::ZIPCODE.to_string()),
        geo: overrides.geo.unwrap_or_else(|| Geo {
            lat: defaults::LAT.to_string(),
            lng: defaults::LNG.to_string(),
        }),
    }
}

pub fn build_company(overrides: CompanyOverrides, fill: Fill) -> Company {
    match fill {
        Fill::Placeholder => placeholder_company(overrides),
        Fill::Random => build_company_with(overrides, &mut Faker::new()),
    }
}

pub fn build_company_with<R: Rng>(overrides: CompanyOverrides, faker: &mut Faker<R>) -> Company {
    Company {
        name: overrides.name.unwrap_or_else(|| faker.company_name()),
        catch_phrase: overrides.catch_phrase.unwrap_or_else(|| faker.catch_phrase()),
        bs: overrides.bs.unwrap_or_else(|| faker.buzz_phrase()),
    }
}

fn placeholder_company(overrides: CompanyOverrides) -> Company {
    Company {
        name: overrides
            .name
            .unwrap_or_else(|| defaults::COMPANY_NAME.to_string()),
        catch_phrase: overrides
            .catch_phrase
            .unwrap_or_else(|| defaults::CATCH_PHRASE.to_string()),
        bs: overrides.bs.unwrap_or_else(|| defaults::BS.to_string()),
    }
}

/// Build a user record. Never sets `id`; `state` defaults to active.
pub fn build_user_data(overrides: UserOverrides, fill: Fill) -> UserData {
    match fill {
        Fill::Placeholder => placeholder_user(overrides),
        Fill::Random => build_user_data_with(overrides, &mut Faker::new()),
    }
}

pub fn build_user_data_with<R: Rng>(overrides: UserOverrides, faker: &mut Faker<R>) -> UserData {
    UserData {
        id: None,
        name: overrides.name.unwrap_or_else(|| faker.full_name()),
        username: overrides.username.unwrap_or_else(|| faker.user_name()),
        email: overrides.email.unwrap_or_else(|| Some(faker.email())),
        address: overrides
            .address
            .unwrap_or_else(|| build_address_with(AddressOverrides::default(), faker)),
        phone: overrides.phone.unwrap_or_else(|| faker.phone_number()),
        website: overrides.website.unwrap_or_else(|| faker.domain_name()),
        company: overrides
            .company
            .unwrap_or_else(|| build_company_with(CompanyOverrides::default(), faker)),
        role: overrides.role,
        state: Some(overrides.state.unwrap_or(UserState::Active)),
    }
}

fn placeholder_user(overrides: UserOverrides) -> UserData {
    UserData {
        id: None,
        name: overrides.name.unwrap_or_else(|| defaults::NAME.to_string()),
        username: overrides
            .username
            .unwrap_or_else(|| defaults::USERNAME.to_string()),
        email: overrides
            .email
            .unwrap_or_else(|| Some(defaults::EMAIL.to_string())),
        address: overrides
            .address
            .unwrap_or_else(|| placeholder_address(AddressOverrides::default())),
        phone: overrides.phone.unwrap_or_else(|| defaults::PHONE.to_string()),
        website: overrides
            .website
            .unwrap_or_else(|| defaults::WEBSITE.to_string()),
        company: overrides
            .company
            .unwrap_or_else(|| placeholder_company(CompanyOverrides::default())),
        role: overrides.role,
        state: Some(overrides.state.unwrap_or(UserState::Active)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_user() {
        let user = build_user_data(UserOverrides::default(), Fill::Placeholder);
        assert_eq!(user.id, None);
        assert_eq!(user.name, "Default Name");
        assert_eq!(user.username, "defaultuser");
        assert_eq!(user.email.as_deref(), Some("default@example.com"));
        assert_eq!(user.phone, "123-456-7890");
        assert_eq!(user.website, "example.com");
        assert_eq!(user.address.city, "Metropolis");
        assert_eq!(user.address.geo.lat, "0.0000");
        assert_eq!(user.company.name, "Default Company");
        assert_eq!(user.company.bs, "synergize scalable solutions");
        assert_eq!(user.role, None);
        assert_eq!(user.state, Some(UserState::Active));
    }

    #[test]
    fn test_overrides_beat_random_values() {
        let overrides = UserOverrides::new()
            .with_name("Pinned Name")
            .with_email("pinned@example.com")
            .with_role("admin");
        let user = build_user_data_with(overrides, &mut Faker::seeded(5));
        assert_eq!(user.name, "Pinned Name");
        assert_eq!(user.email.as_deref(), Some("pinned@example.com"));
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert_ne!(user.username, defaults::USERNAME);
    }

    #[test]
    fn test_without_email_removes_field() {
        let user = build_user_data(UserOverrides::new().without_email(), Fill::Placeholder);
        assert_eq!(user.email, None);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_address_partial_override() {
        let address = build_address(
            AddressOverrides::new().with_city("Admin City"),
            Fill::Placeholder,
        );
        assert_eq!(address.city, "Admin City");
        assert_eq!(address.street, "123 Main St");
        assert_eq!(address.suite, "Apt. 1");
        assert_eq!(address.zipcode, "12345");
    }

    #[test]
    fn test_random_address_keeps_override() {
        let mut faker = Faker::seeded(11);
        let address = build_address_with(AddressOverrides::new().with_zipcode("00000"), &mut faker);
        assert_eq!(address.zipcode, "00000");
        assert!(address.suite.starts_with("Apt. "));
    }

    #[test]
    fn test_company_override() {
        let company = build_company(
            CompanyOverrides::new().with_name("AdminCorp"),
            Fill::Placeholder,
        );
        assert_eq!(company.name, "AdminCorp");
        assert_eq!(company.catch_phrase, "Innovate and Excel");
    }

    #[test]
    fn test_fill_from_random_flag() {
        assert_eq!(Fill::from_random(true), Fill::Random);
        assert_eq!(Fill::from_random(false), Fill::Placeholder);
    }
}
