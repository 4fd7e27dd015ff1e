mod http;
mod response;

pub use http::HttpResourceClient;
pub use response::{Accept, ApiResponse};

use crate::auth::AuthToken;
use crate::domain::{BuildingType, NewDistrict, Property, PropertyPatch};
use crate::errors::ClientError;
use serde::Serialize;

/// Query parameters understood by `GET /properties`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_type: Option<BuildingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_eco_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListFilters {
    pub fn is_empty(&self) -> bool {
        *self == ListFilters::default()
    }
}

/// Everything the checker and the generator need from the remote site.
///
/// Every call either reaches the server and returns its response (any status),
/// or fails with `ClientError::Transport`. Write operations take a token by
/// reference so they cannot be issued without one.
pub trait ResourceApi {
    fn list_properties(
        &self,
        filters: &ListFilters,
        accept: Accept,
    ) -> Result<ApiResponse, ClientError>;

    fn get_property(&self, id: u64) -> Result<ApiResponse, ClientError>;

    fn create_property(
        &self,
        property: &Property,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError>;

    fn update_property(
        &self,
        id: u64,
        patch: &PropertyPatch,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError>;

    fn delete_property(&self, id: u64, token: &AuthToken) -> Result<ApiResponse, ClientError>;

    /// Protected identity check used to confirm a token.
    fn whoami(&self, token: &AuthToken) -> Result<ApiResponse, ClientError>;

    fn list_districts(&self, token: Option<&AuthToken>) -> Result<ApiResponse, ClientError>;

    fn create_district(
        &self,
        district: &NewDistrict,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError>;

    /// REST discovery document at the site root.
    fn api_index(&self) -> Result<ApiResponse, ClientError>;
}
