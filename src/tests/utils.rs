// src/tests/utils.rs
use crate::auth::{AuthToken, Credentials};
use crate::client::{Accept, ApiResponse, ListFilters, ResourceApi};
use crate::domain::{District, NewDistrict, Property, PropertyPatch};
use crate::errors::ClientError;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// A call the fake received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListFilters, Accept),
    Get(u64),
    Create,
    Update(u64),
    Delete(u64),
    WhoAmI,
    ListDistricts,
    CreateDistrict(String),
    Index,
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Call::Create | Call::Update(_) | Call::Delete(_))
    }
}

/// In-memory stand-in for the listing site.
pub struct FakeApi {
    pub properties: RefCell<Vec<Value>>,
    pub districts: RefCell<Vec<District>>,
    pub calls: RefCell<Vec<Call>>,
    /// Token accepted by protected endpoints; `None` rejects everything.
    pub valid_token: Option<AuthToken>,
    pub xml_supported: bool,
    /// When false, PUT returns the record unchanged.
    pub applies_patch: bool,
    pub rejects_create: bool,
    /// Every call fails at the transport level.
    pub unreachable: bool,
    pub failing_district_slugs: HashSet<&'static str>,
    /// Canned reply for the district listing instead of the stored terms.
    pub district_listing: Option<ApiResponse>,
    pub namespaces: Vec<&'static str>,
    pub next_id: Cell<u64>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            properties: RefCell::new(Vec::new()),
            districts: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            valid_token: None,
            xml_supported: true,
            applies_patch: true,
            rejects_create: false,
            unreachable: false,
            failing_district_slugs: HashSet::new(),
            district_listing: None,
            namespaces: vec!["wp/v2", "real-estate/v1"],
            next_id: Cell::new(100),
        }
    }
}

pub fn admin() -> Credentials {
    Credentials::new("admin", "app pass word")
}

impl FakeApi {
    /// Site with one stored property, id 7 in the central district.
    pub fn with_property_7() -> Self {
        let api = Self::default();
        api.properties.borrow_mut().push(json!({
            "id": 7,
            "title": "Existing",
            "eco_rating": "3",
            "districts": [{ "id": 1, "name": "Центральний", "slug": "central" }],
        }));
        api
    }

    pub fn accepting(mut self, creds: &Credentials) -> Self {
        self.valid_token = Some(creds.token());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn write_calls(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.is_write()).count()
    }

    fn log(&self, call: Call) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(call);
        if self.unreachable {
            Err(ClientError::Transport("connection refused".into()))
        } else {
            Ok(())
        }
    }

    fn authorized(&self, token: &AuthToken) -> bool {
        self.valid_token.as_ref() == Some(token)
    }

    fn unauthorized() -> ApiResponse {
        ApiResponse::json(401, json!({ "code": "rest_forbidden" }))
    }

    fn not_found() -> ApiResponse {
        ApiResponse::json(404, json!({ "code": "not_found" }))
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.properties
            .borrow()
            .iter()
            .position(|p| p.get("id").and_then(Value::as_u64) == Some(id))
    }
}

impl ResourceApi for FakeApi {
    fn list_properties(
        &self,
        filters: &ListFilters,
        accept: Accept,
    ) -> Result<ApiResponse, ClientError> {
        self.log(Call::List(filters.clone(), accept))?;
        let items = Value::Array(self.properties.borrow().clone());

        if accept == Accept::Xml && self.xml_supported {
            return Ok(ApiResponse::from_parts(
                200,
                Some("application/xml; charset=UTF-8".into()),
                "<?xml version=\"1.0\"?><response/>".into(),
            ));
        }
        Ok(ApiResponse::json(200, items))
    }

    fn get_property(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.log(Call::Get(id))?;
        Ok(match self.position(id) {
            Some(i) => ApiResponse::json(200, self.properties.borrow()[i].clone()),
            None => Self::not_found(),
        })
    }

    fn create_property(
        &self,
        property: &Property,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError> {
        self.log(Call::Create)?;
        if !self.authorized(token) {
            return Ok(Self::unauthorized());
        }
        if self.rejects_create {
            return Ok(ApiResponse::json(500, json!({ "code": "insert_failed" })));
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut record = serde_json::to_value(property).map_err(|e| ClientError::Encode(e.to_string()))?;
        record["id"] = json!(id);
        self.properties.borrow_mut().push(record.clone());
        Ok(ApiResponse::json(201, record))
    }

    fn update_property(
        &self,
        id: u64,
        patch: &PropertyPatch,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError> {
        self.log(Call::Update(id))?;
        if !self.authorized(token) {
            return Ok(Self::unauthorized());
        }
        let Some(i) = self.position(id) else {
            return Ok(Self::not_found());
        };

        let mut props = self.properties.borrow_mut();
        if self.applies_patch {
            if let Some(title) = &patch.title {
                props[i]["title"] = json!(title);
            }
            if let Some(rating) = patch.eco_rating {
                props[i]["eco_rating"] = json!(rating);
            }
        }
        Ok(ApiResponse::json(200, props[i].clone()))
    }

    fn delete_property(&self, id: u64, token: &AuthToken) -> Result<ApiResponse, ClientError> {
        self.log(Call::Delete(id))?;
        if !self.authorized(token) {
            return Ok(Self::unauthorized());
        }
        let Some(i) = self.position(id) else {
            return Ok(Self::not_found());
        };
        let previous = self.properties.borrow_mut().remove(i);
        Ok(ApiResponse::json(
            200,
            json!({ "deleted": true, "previous": previous }),
        ))
    }

    fn whoami(&self, token: &AuthToken) -> Result<ApiResponse, ClientError> {
        self.log(Call::WhoAmI)?;
        if self.authorized(token) {
            Ok(ApiResponse::json(200, json!({ "id": 1, "name": "admin" })))
        } else {
            Ok(Self::unauthorized())
        }
    }

    fn list_districts(&self, _token: Option<&AuthToken>) -> Result<ApiResponse, ClientError> {
        self.log(Call::ListDistricts)?;
        if let Some(canned) = &self.district_listing {
            return Ok(canned.clone());
        }
        let body = serde_json::to_value(&*self.districts.borrow())
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(ApiResponse::json(200, body))
    }

    fn create_district(
        &self,
        district: &NewDistrict,
        token: &AuthToken,
    ) -> Result<ApiResponse, ClientError> {
        self.log(Call::CreateDistrict(district.slug.clone()))?;
        if !self.authorized(token) {
            return Ok(Self::unauthorized());
        }
        if self.failing_district_slugs.contains(district.slug.as_str()) {
            return Ok(ApiResponse::json(500, json!({ "code": "term_failed" })));
        }

        let mut districts = self.districts.borrow_mut();
        if districts.iter().any(|d| d.slug == district.slug) {
            return Ok(ApiResponse::json(400, json!({ "code": "term_exists" })));
        }
        let created = District {
            id: districts.len() as u64 + 1,
            name: district.name.clone(),
            slug: district.slug.clone(),
            description: district.description.clone(),
        };
        districts.push(created.clone());
        let body = serde_json::to_value(&created).map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(ApiResponse::json(201, body))
    }

    fn api_index(&self) -> Result<ApiResponse, ClientError> {
        self.log(Call::Index)?;
        Ok(ApiResponse::json(
            200,
            json!({ "name": "Test site", "namespaces": self.namespaces }),
        ))
    }
}
