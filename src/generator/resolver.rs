// src/generator/resolver.rs
use crate::auth::AuthToken;
use crate::client::ResourceApi;
use crate::domain::{District, DistrictSeed};
use crate::errors::SeedError;
use tracing::{info, warn};

/// Outcome of making sure the reference districts exist remotely.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Districts available for building properties.
    pub districts: Vec<District>,
    /// True when existing remote districts were adopted as-is.
    pub adopted: bool,
    /// Slugs whose creation failed, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Ensures the fixed district set exists without ever duplicating it.
pub struct DistrictResolver<'a, A: ResourceApi> {
    api: &'a A,
    token: &'a AuthToken,
}

impl<'a, A: ResourceApi> DistrictResolver<'a, A> {
    pub fn new(api: &'a A, token: &'a AuthToken) -> Self {
        Self { api, token }
    }

    /// Adopt whatever the server already has; only an empty collection gets
    /// populated from `seeds`, in order. A failed creation is logged and the
    /// rest continue. Fatal when the collection cannot be read at all, or when
    /// nothing usable is left at the end.
    pub fn resolve(&self, seeds: &[DistrictSeed]) -> Result<Resolution, SeedError> {
        let resp = self
            .api
            .list_districts(Some(self.token))
            .map_err(|e| SeedError::DistrictsUnavailable(e.to_string()))?;

        if resp.is_success() {
            let existing: Vec<District> = resp
                .parse()
                .map_err(SeedError::DistrictsUnavailable)?;
            if !existing.is_empty() {
                info!("Found {} existing districts", existing.len());
                return Ok(Resolution {
                    districts: existing,
                    adopted: true,
                    failed: Vec::new(),
                });
            }
        } else {
            warn!(
                "Listing districts returned status {}, creating the reference set",
                resp.status
            );
        }

        let mut districts = Vec::with_capacity(seeds.len());
        let mut failed = Vec::new();

        for seed in seeds {
            match self.create(seed) {
                Ok(district) => {
                    info!("Created district: {} ({})", district.name, district.slug);
                    districts.push(district);
                }
                Err(reason) => {
                    warn!("Failed to create district {}: {reason}", seed.name);
                    failed.push((seed.slug.to_string(), reason));
                }
            }
        }

        info!("Created {} of {} districts", districts.len(), seeds.len());

        if districts.is_empty() {
            return Err(SeedError::DistrictsUnavailable(
                "no district could be created".to_string(),
            ));
        }

        Ok(Resolution {
            districts,
            adopted: false,
            failed,
        })
    }

    fn create(&self, seed: &DistrictSeed) -> Result<District, String> {
        let resp = self
            .api
            .create_district(&seed.payload(), self.token)
            .map_err(|e| e.to_string())?;

        if !resp.is_success() {
            return Err(format!("Status code: {}", resp.status));
        }
        resp.parse()
    }
}
