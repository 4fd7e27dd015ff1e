// src/client/http.rs
use crate::auth::AuthToken;
use crate::client::{Accept, ApiResponse, ListFilters, ResourceApi};
use crate::config::{ProbeConfig, DISTRICT_PATH, IDENTITY_PATH, INDEX_PATH, RESOURCE_PREFIX};
use crate::domain::{NewDistrict, Property, PropertyPatch};
use crate::errors::ClientError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("listing_probe/", env!("CARGO_PKG_VERSION"));

/// Blocking `reqwest` implementation of [`ResourceApi`].
pub struct HttpResourceClient {
    client: Client,
    base_url: Url,
}

impl HttpResourceClient {
    pub fn new(config: &ProbeConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    fn properties_url(&self, id: Option<u64>) -> Result<Url, ClientError> {
        match id {
            Some(id) => self.url(&format!("{RESOURCE_PREFIX}/properties/{id}")),
            None => self.url(&format!("{RESOURCE_PREFIX}/properties")),
        }
    }

    fn with_json<T: Serialize>(
        request: RequestBuilder,
        payload: &T,
    ) -> Result<RequestBuilder, ClientError> {
        let body = serde_json::to_vec(payload).map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(request
            .header(CONTENT_TYPE, Accept::Json.as_str())
            .body(body))
    }

    fn send(
        &self,
        request: RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, ClientError> {
        let request = match token {
            Some(t) => request.header(AUTHORIZATION, t.header_value()),
            None => request,
        };

        let resp = request
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let url = resp.url().clone();

        let text = resp
            .text()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        debug!(%url, status, content_type = ?content_type, bytes = text.len(), "response");
        Ok(ApiResponse::from_parts(status, content_type, text))
    }
}

impl ResourceApi for HttpResourceClient {
    fn list_properties(
        &self,
        filters: &ListFilters,
        accept: Accept,
    ) -> Result<ApiResponse, ClientError> {
        let req = self
            .client
            .get(self.properties_url(None)?)
            .header(ACCEPT, accept.as_str());
        let req = if filters.is_empty() {
            req
        } else {
            req.query(filters)
        };
        self.send(req, None)
    }

    fn get_property(&self, id: u64) -> Result<ApiResponse, ClientError> {
        let req = self
            .client
            .get(self.properties_url(Some(id))?)
            .header(ACCEPT, Accept::Json.as_str());
        self.send(req, None)
    }

    fn create_property(
        &self,
        property: &Property,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError> {
        let req = self.client.post(self.properties_url(None)?);
        self.send(Self::with_json(req, property)?, Some(token))
    }

    fn update_property(
        &self,
        id: u64,
        patch: &PropertyPatch,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError> {
        let req = self.client.put(self.properties_url(Some(id))?);
        self.send(Self::with_json(req, patch)?, Some(token))
    }

    fn delete_property(&self, id: u64, token: &AuthToken) -> Result<ApiResponse, ClientError> {
        let req = self.client.delete(self.properties_url(Some(id))?);
        self.send(req, Some(token))
    }

    fn whoami(&self, token: &AuthToken) -> Result<ApiResponse, ClientError> {
        let req = self.client.get(self.url(IDENTITY_PATH)?);
        self.send(req, Some(token))
    }

    fn list_districts(&self, token: Option<&AuthToken>) -> Result<ApiResponse, ClientError> {
        let req = self.client.get(self.url(DISTRICT_PATH)?);
        self.send(req, token)
    }

    fn create_district(
        &self,
        district: &NewDistrict,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError> {
        let req = self.client.post(self.url(DISTRICT_PATH)?);
        self.send(Self::with_json(req, district)?, Some(token))
    }

    fn api_index(&self) -> Result<ApiResponse, ClientError> {
        let req = self.client.get(self.url(INDEX_PATH)?);
        self.send(req, None)
    }
}
