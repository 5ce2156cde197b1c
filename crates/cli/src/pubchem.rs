//! PubChem PUG REST lookups.
//!
//! One name is resolved with at most two GET requests:
//!
//! ```text
//! {api_base}/compound/name/{name}/property/CanonicalSMILES/JSON
//! {api_base}/substance/name/{name}/property/CanonicalSMILES/JSON   (only after a 404)
//! ```
//!
//! A 404 is PubChem's "no such entity" answer. Any other failure (non-2xx
//! status, network error, unparsable body) ends the lookup for that row as
//! "not found". Nothing is retried and nothing here aborts the run.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use smilefetch_config::LookupSettings;
use smilefetch_core::{normalize, url_encode, EntityKind, LookupResult, PercentEncoding};

use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

pub const USER_AGENT: &str = concat!("smilefetch/", env!("CARGO_PKG_VERSION"));
const PROPERTY_PATH: &str = "property/CanonicalSMILES/JSON";

// ── Errors ──────────────────────────────────────────────────────────

/// Why a single request did not produce a structure.
#[derive(Debug, PartialEq, Eq)]
pub enum LookupError {
    /// HTTP 404 for this entity kind.
    NotFound,
    /// Any other non-success status.
    Status(u16),
    /// Connection, TLS, timeout or body read failure.
    Transport(String),
    /// Success status but the body is not a usable property table.
    Malformed(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Status(code) => write!(f, "HTTP error {code}"),
            Self::Transport(msg) => write!(f, "request failed: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

// ── Response shape ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PropertyResponse {
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PropertyTable {
    properties: Vec<PropertyEntry>,
}

/// First entry of `PropertyTable.Properties`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyEntry {
    #[serde(rename = "CID", alias = "SID")]
    pub identifier: u64,
    // Current PubChem answers a CanonicalSMILES request with ConnectivitySMILES.
    #[serde(rename = "CanonicalSMILES", alias = "ConnectivitySMILES")]
    pub smiles: String,
}

fn parse_property_body(body: &str) -> Result<PropertyEntry, LookupError> {
    let response: PropertyResponse =
        serde_json::from_str(body.trim_start_matches('\u{feff}')).map_err(|e| {
            let excerpt: String = body.chars().take(200).collect();
            LookupError::Malformed(format!("{} (body: {})", e, excerpt))
        })?;

    response
        .property_table
        .properties
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::Malformed("PropertyTable.Properties is empty".into()))
}

// ── Resolver ────────────────────────────────────────────────────────

/// Maps a raw compound name to a lookup outcome. Never fails: every problem
/// is reported and folded into [`LookupStatus::NotFound`].
///
/// [`LookupStatus::NotFound`]: smilefetch_core::LookupStatus::NotFound
pub trait Resolver {
    fn resolve(&self, name: &str) -> LookupResult;
}

pub struct PubChemClient {
    http: reqwest::blocking::Client,
    base_url: String,
    encoding: PercentEncoding,
}

impl PubChemClient {
    pub fn new(settings: &LookupSettings) -> Result<Self, CliError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| CliError::general(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            encoding: settings.percent_encoding,
        })
    }

    pub fn with_base_url(base_url: String, encoding: PercentEncoding) -> Result<Self, CliError> {
        Self::new(&LookupSettings {
            api_base: base_url,
            percent_encoding: encoding,
            ..LookupSettings::default()
        })
    }

    /// Request URL for `name` (already normalized or raw; normalization is
    /// idempotent).
    pub fn lookup_url(&self, kind: EntityKind, name: &str) -> String {
        format!(
            "{}/{}/name/{}/{}",
            self.base_url,
            kind.as_path(),
            url_encode(name, self.encoding),
            PROPERTY_PATH,
        )
    }

    /// One GET against one entity kind.
    pub fn fetch(&self, kind: EntityKind, name: &str) -> Result<PropertyEntry, LookupError> {
        let url = self.lookup_url(kind, name);
        tracing::debug!(%url, "PubChem request");

        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        parse_property_body(&text)
    }
}

impl Resolver for PubChemClient {
    fn resolve(&self, name: &str) -> LookupResult {
        let normalized = normalize(name);
        if normalized.is_empty() {
            tracing::warn!("empty compound name, skipping lookup");
            return LookupResult::not_found();
        }

        // Compound first; a 404 moves to the fallback kind exactly once.
        let mut kind = EntityKind::Compound;
        loop {
            match self.fetch(kind, &normalized) {
                Ok(entry) => return LookupResult::found(kind, entry.identifier, entry.smiles),
                Err(LookupError::NotFound) => match kind.fallback() {
                    Some(next) => {
                        tracing::debug!(name = %normalized, "no {} match, trying {}", kind, next);
                        kind = next;
                    }
                    None => {
                        tracing::warn!("Substance '{}' not found in PubChem.", normalized);
                        return LookupResult::not_found();
                    }
                },
                Err(err) => {
                    tracing::warn!("{} lookup for '{}' failed: {}", kind, normalized, err);
                    return LookupResult::not_found();
                }
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
