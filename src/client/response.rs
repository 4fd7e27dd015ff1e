// src/client/response.rs
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Representation requested through the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accept {
    #[default]
    Json,
    Xml,
}

impl Accept {
    pub fn as_str(self) -> &'static str {
        match self {
            Accept::Json => "application/json",
            Accept::Xml => "application/xml",
        }
    }
}

/// Response body, parsed once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Raw(String),
}

/// Outcome of one HTTP exchange that reached the server, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Body,
}

impl ApiResponse {
    /// Parse `text` as JSON when the declared type is JSON (or undeclared);
    /// anything else, or JSON that fails to parse, is kept verbatim.
    pub fn from_parts(status: u16, content_type: Option<String>, text: String) -> Self {
        let wants_json = match content_type.as_deref().and_then(essence) {
            None => true,
            Some(e) => e == "application/json" || e.ends_with("+json"),
        };

        let body = if wants_json {
            match serde_json::from_str::<Value>(&text) {
                Ok(v) => Body::Json(v),
                Err(_) => Body::Raw(text),
            }
        } else {
            Body::Raw(text)
        };

        Self {
            status,
            content_type,
            body,
        }
    }

    #[cfg(test)]
    pub fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            content_type: Some(Accept::Json.as_str().to_string()),
            body: Body::Json(value),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the declared content-type has the same essence as `accept`
    /// (parameters such as `charset` are ignored).
    pub fn content_type_matches(&self, accept: Accept) -> bool {
        self.content_type
            .as_deref()
            .and_then(essence)
            .is_some_and(|e| e == accept.as_str())
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(v) => Some(v),
            Body::Raw(_) => None,
        }
    }

    /// Deserialize the JSON body into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, String> {
        let value = self
            .json_body()
            .ok_or_else(|| "response body is not JSON".to_string())?;
        serde_json::from_value(value.clone()).map_err(|e| format!("unexpected body shape: {e}"))
    }

    /// Short excerpt of the body for failure messages.
    pub fn excerpt(&self, max: usize) -> String {
        let text = match &self.body {
            Body::Json(v) => v.to_string(),
            Body::Raw(s) => s.clone(),
        };
        if text.chars().count() <= max {
            text
        } else {
            let cut: String = text.chars().take(max).collect();
            format!("{cut}...")
        }
    }
}

fn essence(raw: &str) -> Option<String> {
    raw.parse::<mime::Mime>()
        .ok()
        .map(|m| m.essence_str().to_ascii_lowercase())
}
