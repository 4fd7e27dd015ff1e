// src/orchestrator.rs
//
// One conformance run: unauthenticated reads, authentication, then the
// create -> update -> delete lifecycle. Every check records exactly one result
// and never aborts its phase.

use crate::auth::{AuthToken, Credentials};
use crate::client::{Accept, ApiResponse, ListFilters, ResourceApi};
use crate::config::RESOURCE_NAMESPACE;
use crate::domain::{
    BuildingType, Coordinates, DeleteAck, Premises, Property, PropertyPatch, PropertyRecord,
};
use crate::errors::ClientError;
use crate::recorder::{FailureKind, ResultRecorder};
use serde_json::Value;
use tracing::{debug, info};

pub const CHECK_INDEX: &str = "REST API index";
pub const CHECK_NAMESPACE: &str = "Plugin REST API registration";
pub const CHECK_LIST: &str = "GET /properties";
pub const CHECK_FILTERED: &str = "GET /properties with filters";
pub const CHECK_XML: &str = "XML format";
pub const CHECK_AUTH: &str = "Authentication";
pub const CHECK_CREATE: &str = "POST /properties";
pub const CHECK_UPDATE: &str = "PUT /properties";
pub const CHECK_DELETE: &str = "DELETE /properties";

pub const PREREQUISITE_FAILED: &str = "prerequisite failed";
pub const WRITES_SKIPPED: &str = "write checks skipped";

const UPDATED_TITLE: &str = "Updated Test Property";
const UPDATED_ECO_RATING: u8 = 5;

/// Why a single check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Failure {
    kind: FailureKind,
    message: String,
}

impl Failure {
    fn contract(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Contract,
            message: message.into(),
        }
    }
}

impl From<ClientError> for Failure {
    fn from(e: ClientError) -> Self {
        Self {
            kind: FailureKind::Transport,
            message: e.to_string(),
        }
    }
}

type CheckResult<T> = Result<T, Failure>;

/// Turn a call result into a successful response or a transport/protocol failure.
fn expect_success(result: Result<ApiResponse, ClientError>) -> CheckResult<ApiResponse> {
    let resp = result?;
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(Failure {
            kind: FailureKind::Protocol,
            message: format!("Status code: {}", resp.status),
        })
    }
}

fn expect_array(resp: &ApiResponse) -> CheckResult<Vec<Value>> {
    match resp.json_body() {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(Failure::contract(format!(
            "expected a JSON array, got {}",
            json_kind(other)
        ))),
        None => Err(Failure::contract(format!(
            "expected a JSON array, got: {}",
            resp.excerpt(120)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Payload used for the lifecycle create step.
pub fn sample_property() -> Property {
    Property {
        id: None,
        title: "Test Property".to_string(),
        content: "This is a test property created via API".to_string(),
        district: "central".to_string(),
        building_name: "Test Building".to_string(),
        coordinates: Coordinates::new(50.4501, 30.5234),
        floors: 5,
        building_type: BuildingType::Brick,
        eco_rating: 4,
        premises: vec![
            Premises {
                area: 75.0,
                rooms: 2,
                balcony: true,
                bathroom: true,
            },
            Premises {
                area: 45.0,
                rooms: 1,
                balcony: false,
                bathroom: true,
            },
            Premises {
                area: 120.0,
                rooms: 3,
                balcony: true,
                bathroom: true,
            },
        ],
    }
}

/// Filter set exercised by the filtered-list check.
pub fn sample_filters() -> ListFilters {
    ListFilters {
        district: Some("central".to_string()),
        building_type: Some(BuildingType::Brick),
        min_eco_rating: Some(3),
        ..Default::default()
    }
}

/// Drives one sequential run against `api`.
pub struct ConformanceRun<'a, A: ResourceApi> {
    api: &'a A,
    credentials: Option<Credentials>,
    discovery: bool,
    recorder: ResultRecorder,
}

impl<'a, A: ResourceApi> ConformanceRun<'a, A> {
    pub fn new(api: &'a A, credentials: Option<Credentials>) -> Self {
        Self {
            api,
            credentials,
            discovery: false,
            recorder: ResultRecorder::new(),
        }
    }

    /// Also probe the REST index and namespace registration first.
    pub fn with_discovery(mut self, enabled: bool) -> Self {
        self.discovery = enabled;
        self
    }

    /// Run every phase and hand back the full log. Always completes.
    pub fn run(mut self) -> ResultRecorder {
        info!("Starting listing API checks");

        if self.discovery {
            self.check_discovery();
        }

        // Unauthenticated reads
        if let Some(items) = self.check_list() {
            if let Some(first) = items.first() {
                self.check_first(first);
            }
        }
        self.check_filtered();
        self.check_xml();

        // Authentication, then gated writes
        if let Some(token) = self.authenticate() {
            self.lifecycle(&token);
        }

        info!("Listing API checks completed ({} results)", self.recorder.len());
        self.recorder
    }

    fn settle<T>(&mut self, name: &str, result: CheckResult<T>) -> Option<T> {
        match result {
            Ok(v) => {
                self.recorder.pass(name);
                Some(v)
            }
            Err(f) => {
                self.recorder.fail(name, f.kind, f.message);
                None
            }
        }
    }

    fn check_discovery(&mut self) {
        info!("Checking REST API discovery");
        let index = expect_success(self.api.api_index());
        let Some(index) = self.settle(CHECK_INDEX, index) else {
            self.recorder.fail(
                CHECK_NAMESPACE,
                FailureKind::Precondition,
                PREREQUISITE_FAILED,
            );
            return;
        };

        let registered = index
            .json_body()
            .and_then(|v| v.get("namespaces"))
            .and_then(Value::as_array)
            .is_some_and(|ns| ns.iter().any(|n| n.as_str() == Some(RESOURCE_NAMESPACE)));

        let result = if registered {
            Ok(())
        } else {
            Err(Failure::contract(format!(
                "Namespace {RESOURCE_NAMESPACE} not found"
            )))
        };
        self.settle(CHECK_NAMESPACE, result);
    }

    fn check_list(&mut self) -> Option<Vec<Value>> {
        info!("Testing {CHECK_LIST}");
        let result = expect_success(
            self.api
                .list_properties(&ListFilters::default(), Accept::Json),
        )
        .and_then(|resp| expect_array(&resp));

        let items = self.settle(CHECK_LIST, result)?;
        info!("Found {} properties", items.len());
        Some(items)
    }

    fn check_first(&mut self, first: &Value) {
        let Some(id) = first.get("id").and_then(Value::as_u64) else {
            self.recorder.fail(
                "GET /properties/{id}",
                FailureKind::Contract,
                "first listed property has no numeric id",
            );
            return;
        };

        let name = format!("GET /properties/{id}");
        info!("Testing {name}");
        let result = expect_success(self.api.get_property(id)).and_then(|resp| {
            let record: PropertyRecord = resp.parse().map_err(Failure::contract)?;
            if record.id == id {
                Ok(())
            } else {
                Err(Failure::contract(format!(
                    "requested id {id}, got {}",
                    record.id
                )))
            }
        });
        self.settle(&name, result);
    }

    fn check_filtered(&mut self) {
        info!("Testing {CHECK_FILTERED}");
        let result = expect_success(self.api.list_properties(&sample_filters(), Accept::Json))
            .and_then(|resp| expect_array(&resp));
        if let Some(items) = self.settle(CHECK_FILTERED, result) {
            info!("Filtered list returned {} properties", items.len());
        }
    }

    fn check_xml(&mut self) {
        info!("Testing {CHECK_XML}");
        let result = expect_success(self.api.list_properties(&ListFilters::default(), Accept::Xml))
            .and_then(|resp| {
                if resp.content_type_matches(Accept::Xml) {
                    Ok(())
                } else {
                    Err(Failure::contract(format!(
                        "Response not in XML format (Content-Type: {})",
                        resp.content_type.as_deref().unwrap_or("<none>")
                    )))
                }
            });
        self.settle(CHECK_XML, result);
    }

    /// Build a token and confirm it against the identity endpoint. A token
    /// that fails confirmation is dropped, and its failure message says the
    /// writes did not run.
    fn authenticate(&mut self) -> Option<AuthToken> {
        let Some(credentials) = self.credentials.as_ref() else {
            debug!("No credentials supplied, {WRITES_SKIPPED}");
            return None;
        };
        info!("Testing authentication as {}", credentials.username());
        let token = credentials.token();

        let result = expect_success(self.api.whoami(&token)).map_err(|mut f| {
            f.message = format!("{}; {WRITES_SKIPPED}", f.message);
            f
        });
        let resp = self.settle(CHECK_AUTH, result)?;
        if let Some(name) = resp.json_body().and_then(|v| v.get("name")).and_then(Value::as_str) {
            info!("Logged in as: {name}");
        }
        Some(token)
    }

    fn lifecycle(&mut self, token: &AuthToken) {
        let Some(id) = self.check_create(token) else {
            for name in [CHECK_UPDATE, CHECK_DELETE] {
                self.recorder.fail(
                    name,
                    FailureKind::Precondition,
                    format!("{PREREQUISITE_FAILED}: no property was created"),
                );
            }
            return;
        };

        self.check_update(id, token);
        self.check_delete(id, token);
    }

    fn check_create(&mut self, token: &AuthToken) -> Option<u64> {
        info!("Testing {CHECK_CREATE}");
        let result = expect_success(self.api.create_property(&sample_property(), token))
            .and_then(|resp| {
                resp.parse::<PropertyRecord>()
                    .map(|record| record.id)
                    .map_err(|e| Failure::contract(format!("no property id returned: {e}")))
            });

        let id = self.settle(CHECK_CREATE, result)?;
        info!("Created property with ID: {id}");
        Some(id)
    }

    fn check_update(&mut self, id: u64, token: &AuthToken) {
        let name = format!("{CHECK_UPDATE}/{id}");
        info!("Testing {name}");
        let patch = PropertyPatch {
            title: Some(UPDATED_TITLE.to_string()),
            eco_rating: Some(UPDATED_ECO_RATING),
            ..Default::default()
        };

        let result = expect_success(self.api.update_property(id, &patch, token)).and_then(|resp| {
            let record: PropertyRecord = resp.parse().map_err(Failure::contract)?;
            if record.title != UPDATED_TITLE {
                return Err(Failure::contract(format!(
                    "title not updated: expected '{UPDATED_TITLE}', got '{}'",
                    record.title
                )));
            }
            match record.eco_rating {
                Some(r) if r != UPDATED_ECO_RATING => Err(Failure::contract(format!(
                    "eco_rating not updated: expected {UPDATED_ECO_RATING}, got {r}"
                ))),
                _ => Ok(()),
            }
        });
        self.settle(&name, result);
    }

    fn check_delete(&mut self, id: u64, token: &AuthToken) {
        let name = format!("{CHECK_DELETE}/{id}");
        info!("Testing {name}");
        let result = expect_success(self.api.delete_property(id, token)).and_then(|resp| {
            let ack: DeleteAck = resp.parse().map_err(Failure::contract)?;
            if ack.deleted {
                Ok(())
            } else {
                Err(Failure::contract("server did not acknowledge deletion"))
            }
        });
        self.settle(&name, result);
    }
}
