// src/domain/district.rs

use serde::{Deserialize, Serialize};

/// A district term as stored on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of the fixed reference set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistrictSeed {
    pub name: &'static str,
    pub slug: &'static str,
    /// Locative form used in generated text ("у Центральному районі").
    pub locative: &'static str,
}

impl DistrictSeed {
    pub fn description(&self) -> String {
        format!("Properties in the {} district", self.name)
    }

    pub fn payload(&self) -> NewDistrict {
        NewDistrict {
            name: self.name.to_string(),
            slug: self.slug.to_string(),
            description: self.description(),
        }
    }
}

/// Request body for creating a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDistrict {
    pub name: String,
    pub slug: String,
    pub description: String,
}

pub const DISTRICT_SEEDS: [DistrictSeed; 5] = [
    DistrictSeed {
        name: "Центральний",
        slug: "central",
        locative: "Центральному",
    },
    DistrictSeed {
        name: "Північний",
        slug: "northern",
        locative: "Північному",
    },
    DistrictSeed {
        name: "Південний",
        slug: "southern",
        locative: "Південному",
    },
    DistrictSeed {
        name: "Східний",
        slug: "eastern",
        locative: "Східному",
    },
    DistrictSeed {
        name: "Західний",
        slug: "western",
        locative: "Західному",
    },
];

/// Locative form for a slug; unknown slugs (adopted from a server that has its
/// own districts) fall back to the central one.
pub fn locative_for(slug: &str) -> &'static str {
    DISTRICT_SEEDS
        .iter()
        .find(|d| d.slug == slug)
        .map(|d| d.locative)
        .unwrap_or(DISTRICT_SEEDS[0].locative)
}
