//! Faker-style random value generation for test payloads.
//!
//! A thin wrapper over the `fake` crate's English locale that owns the RNG,
//! so one source drives every field of a record. Uses the thread RNG by
//! default; [`Faker::seeded`] gives reproducible output.

use fake::faker::address::en::{BuildingNumber, CityName, Latitude, Longitude, StreetName, ZipCode};
use fake::faker::company::en::{Bs, CatchPhrase, CompanyName};
use fake::faker::internet::en::{DomainSuffix, SafeEmail, Username};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::number::en::NumberWithFormat;
use fake::Fake;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Random value generator.
pub struct Faker<R: Rng = ThreadRng> {
    rng: R,
}

impl Faker<ThreadRng> {
    /// Create a faker backed by the thread-local RNG.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for Faker<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Faker<StdRng> {
    /// Create a faker with a fixed seed. Same seed, same sequence of values.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Faker<R> {
    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    pub fn full_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    pub fn user_name(&mut self) -> String {
        Username().fake_with_rng(&mut self.rng)
    }

    pub fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.rng)
    }

    /// Phone number in `###-###-####` form.
    pub fn phone_number(&mut self) -> String {
        NumberWithFormat("###-###-####").fake_with_rng(&mut self.rng)
    }

    pub fn domain_name(&mut self) -> String {
        let word: String = Word().fake_with_rng(&mut self.rng);
        let suffix: String = DomainSuffix().fake_with_rng(&mut self.rng);
        format!("{}.{}", word, suffix)
    }

    pub fn street_address(&mut self) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        format!("{} {}", number, street)
    }

    /// `Apt. N` with N in 1..=999.
    pub fn suite(&mut self) -> String {
        format!("Apt. {}", (1..1000u32).fake_with_rng::<u32, _>(&mut self.rng))
    }

    pub fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    pub fn zip_code(&mut self) -> String {
        ZipCode().fake_with_rng(&mut self.rng)
    }

    /// Latitude in [-90, 90], four decimal places.
    pub fn latitude(&mut self) -> String {
        let raw: String = Latitude().fake_with_rng(&mut self.rng);
        four_decimals(raw)
    }

    /// Longitude in [-180, 180], four decimal places.
    pub fn longitude(&mut self) -> String {
        let raw: String = Longitude().fake_with_rng(&mut self.rng);
        four_decimals(raw)
    }

    pub fn company_name(&mut self) -> String {
        CompanyName().fake_with_rng(&mut self.rng)
    }

    pub fn catch_phrase(&mut self) -> String {
        CatchPhrase().fake_with_rng(&mut self.rng)
    }

    pub fn buzz_phrase(&mut self) -> String {
        Bs().fake_with_rng(&mut self.rng)
    }
}

fn four_decimals(raw: String) -> String {
    match raw.parse::<f64>() {
        Ok(value) => format!("{:.4}", value),
        Err(_) => raw,
    }
}
