// src/domain/property.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Construction material of the building. Serialised with the server's slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Panel,
    Brick,
    FoamBlock,
}

impl BuildingType {
    pub const ALL: [BuildingType; 3] = [
        BuildingType::Panel,
        BuildingType::Brick,
        BuildingType::FoamBlock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingType::Panel => "panel",
            BuildingType::Brick => "brick",
            BuildingType::FoamBlock => "foam_block",
        }
    }

    /// Human label used in generated listing text.
    pub fn display_name(self) -> &'static str {
        match self {
            BuildingType::Panel => "Панель",
            BuildingType::Brick => "Цегла",
            BuildingType::FoamBlock => "Піноблок",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latitude/longitude in decimal degrees. On the wire this is the single
/// string `"lat, lon"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        let (lat, lon) = raw
            .split_once(',')
            .ok_or_else(|| serde::de::Error::custom(format!("bad coordinates: {raw}")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("bad coordinate '{part}': {e}")))
        };
        Ok(Coordinates::new(parse(lat)?, parse(lon)?))
    }
}

/// One unit inside a building. Owned by its `Property`; has no id of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Premises {
    /// Square meters. Sent as a decimal string with one fractional digit.
    #[serde(with = "area_string")]
    pub area: f64,
    pub rooms: u32,
    #[serde(with = "yes_no")]
    pub balcony: bool,
    #[serde(with = "yes_no")]
    pub bathroom: bool,
}

/// A listing as sent to the server on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub content: String,
    /// District slug.
    pub district: String,
    pub building_name: String,
    pub coordinates: Coordinates,
    pub floors: u32,
    pub building_type: BuildingType,
    pub eco_rating: u8,
    pub premises: Vec<Premises>,
}

/// Sparse update. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_type: Option<BuildingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_rating: Option<u8>,
}

/// District reference as embedded in a server-side property record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistrictRef {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// The parts of a server response we validate. Everything else is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_u8")]
    pub eco_rating: Option<u8>,
    #[serde(default)]
    pub districts: Vec<DistrictRef>,
}

/// Body of a successful DELETE.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeleteAck {
    pub deleted: bool,
    #[serde(default)]
    pub previous: Option<PropertyRecord>,
}

// Custom fields are sometimes echoed back as strings ("4") instead of numbers.
fn lenient_u8<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(flag: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *flag { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match String::deserialize(d)?.as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'yes' or 'no', got '{other}'"
            ))),
        }
    }
}

mod area_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(area: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{area:.1}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(d)?;
        raw.trim().parse().map_err(serde::de::Error::custom)
    }
}
