// src/config.rs
use crate::auth::Credentials;
use crate::errors::ConfigError;
use url::Url;

/// Namespace of the listing resource, relative to the site root.
pub const RESOURCE_PREFIX: &str = "wp-json/real-estate/v1";
/// Namespace name as advertised by the REST index.
pub const RESOURCE_NAMESPACE: &str = "real-estate/v1";
/// Reference (district) collection.
pub const DISTRICT_PATH: &str = "wp-json/wp/v2/district";
/// Protected endpoint used to confirm a token before trusting it.
pub const IDENTITY_PATH: &str = "wp-json/wp/v2/users/me";
/// REST discovery document.
pub const INDEX_PATH: &str = "wp-json/";

pub const DEFAULT_SEED_COUNT: usize = 8;

/// Validated settings shared by both the checker and the generator.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub base_url: Url,
    pub credentials: Option<Credentials>,
}

impl ProbeConfig {
    /// Parse and normalise the site URL. The result always ends in `/` so
    /// relative joins keep the site path (`https://host/blog/` + `wp-json/..`).
    pub fn new(
        raw_url: &str,
        username: Option<String>,
        secret: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(raw_url)?;
        let credentials = credentials_from(username, secret)?;

        Ok(Self {
            base_url,
            credentials,
        })
    }
}

/// Settings specific to a seeding run.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub count: usize,
    pub rng_seed: Option<u64>,
}

impl SeedConfig {
    pub fn new(count: usize, rng_seed: Option<u64>) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        Ok(Self { count, rng_seed })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let mut url = Url::parse(trimmed).map_err(|e| ConfigError::BadBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::BadBaseUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Both halves present -> credentials; either missing -> none. A half that
/// was given but is blank is a configuration mistake, not "no credentials".
fn credentials_from(
    username: Option<String>,
    secret: Option<String>,
) -> Result<Option<Credentials>, ConfigError> {
    if matches!(&username, Some(u) if u.trim().is_empty()) {
        return Err(ConfigError::BlankCredential("username"));
    }
    if matches!(&secret, Some(s) if s.is_empty()) {
        return Err(ConfigError::BlankCredential("secret"));
    }

    Ok(match (username, secret) {
        (Some(u), Some(s)) => Some(Credentials::new(u, s)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised_with_trailing_slash() {
        let cfg = ProbeConfig::new("https://example.com/site///", None, None).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://example.com/site/");

        let cfg = ProbeConfig::new("http://localhost:8080", None, None).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = ProbeConfig::new("ftp://example.com", None, None).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedScheme("ftp".into()));
    }

    #[test]
    fn rejects_garbage_url() {
        let err = ProbeConfig::new("not a url", None, None).unwrap_err();
        assert!(matches!(err, ConfigError::BadBaseUrl { .. }));
    }

    #[test]
    fn half_credentials_mean_none() {
        let cfg = ProbeConfig::new("https://example.com", Some("admin".into()), None).unwrap();
        assert!(cfg.credentials.is_none());

        let cfg = ProbeConfig::new("https://example.com", None, Some("pw".into())).unwrap();
        assert!(cfg.credentials.is_none());
    }

    #[test]
    fn blank_username_is_rejected() {
        let err = ProbeConfig::new("https://example.com", Some("  ".into()), Some("pw".into()))
            .unwrap_err();
        assert_eq!(err, ConfigError::BlankCredential("username"));
    }

    #[test]
    fn zero_seed_count_is_rejected() {
        assert_eq!(SeedConfig::new(0, None).unwrap_err(), ConfigError::ZeroCount);
        assert_eq!(SeedConfig::new(3, Some(9)).unwrap().count, 3);
    }
}
