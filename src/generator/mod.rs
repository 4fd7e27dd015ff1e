mod builder;
mod resolver;

pub use builder::PropertyBuilder;
pub use resolver::DistrictResolver;

use crate::auth::Credentials;
use crate::client::ResourceApi;
use crate::domain::{PropertyRecord, DISTRICT_SEEDS};
use crate::errors::SeedError;
use rand::Rng;
use tracing::{info, warn};

/// What a seeding run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub requested: usize,
    /// Ids of the properties the server accepted, in creation order.
    pub created: Vec<u64>,
    pub districts: usize,
}

impl SeedReport {
    pub fn failed(&self) -> usize {
        self.requested - self.created.len()
    }
}

/// Populate the site with `count` random properties.
///
/// Credentials are mandatory and are confirmed before anything is written.
/// District resolution is the only step whose failure aborts the run; a
/// rejected property is logged and the batch carries on.
pub fn seed<A: ResourceApi, R: Rng>(
    api: &A,
    credentials: Option<&Credentials>,
    count: usize,
    rng: R,
) -> Result<SeedReport, SeedError> {
    let credentials = credentials.ok_or(SeedError::MissingCredentials)?;
    let token = credentials.token();

    let who = api
        .whoami(&token)
        .map_err(|e| SeedError::Unauthenticated(e.to_string()))?;
    if !who.is_success() {
        return Err(SeedError::Unauthenticated(format!(
            "Status code: {}",
            who.status
        )));
    }
    info!("Authenticated as {}", credentials.username());

    let resolution = DistrictResolver::new(api, &token).resolve(&DISTRICT_SEEDS)?;
    let mut builder = PropertyBuilder::new(&resolution.districts, rng)?;

    info!("Generating {count} mock properties");
    let mut created = Vec::with_capacity(count);

    for index in 0..count {
        let property = builder.build(index);

        let outcome = match api.create_property(&property, &token) {
            Ok(resp) if resp.is_success() => resp.parse::<PropertyRecord>().map(|r| r.id),
            Ok(resp) => Err(format!("Status code: {} {}", resp.status, resp.excerpt(200))),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(id) => {
                info!("Created property: {} (ID: {id})", property.title);
                created.push(id);
            }
            Err(reason) => warn!("Failed to create property {}: {reason}", property.title),
        }
    }

    info!("Successfully created {} out of {count} properties", created.len());

    Ok(SeedReport {
        requested: count,
        created,
        districts: resolution.districts.len(),
    })
}
