//! AUR RPC request encoding and response envelope decoding
//!
//! Every RPC response shares one envelope:
//!
//! ```json
//! {"version": 5, "type": "search", "resultcount": 1, "results": [...], "error": null}
//! ```
//!
//! `type` decides how to read the rest: a success type means `results` holds
//! records, the error type means `error` holds a message. Decoding is therefore
//! done in two steps. [`RpcEnvelope::parse`] reads the envelope and keeps
//! `results` as raw JSON; [`RpcEnvelope::into_results`] checks the
//! discriminator and only then decodes the payload into the requested record
//! type.

use std::fmt;
use std::str::FromStr;

use archapi_core::{ArchApiError, ArchApiResult, DecodeStage, Operation};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Default AUR RPC endpoint
pub const AUR_RPC_URL: &str = "https://aur.archlinux.org/rpc/";

/// RPC interface version sent with every request
pub const RPC_VERSION: &str = "5";

/// Ordered query parameters for one request
pub type QueryParams = Vec<(&'static str, String)>;

/// Field a search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchBy {
    Name,
    /// Name and description (the server default)
    NameDesc,
    Maintainer,
    Depends,
    MakeDepends,
    OptDepends,
    CheckDepends,
}

impl SearchBy {
    pub const ALL: [SearchBy; 7] = [
        SearchBy::Name,
        SearchBy::NameDesc,
        SearchBy::Maintainer,
        SearchBy::Depends,
        SearchBy::MakeDepends,
        SearchBy::OptDepends,
        SearchBy::CheckDepends,
    ];

    /// Wire value of the `by` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchBy::Name => "name",
            SearchBy::NameDesc => "name-desc",
            SearchBy::Maintainer => "maintainer",
            SearchBy::Depends => "depends",
            SearchBy::MakeDepends => "makedepends",
            SearchBy::OptDepends => "optdepends",
            SearchBy::CheckDepends => "checkdepends",
        }
    }
}

impl fmt::Display for SearchBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown search field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search field '{0}' (expected one of: name, name-desc, maintainer, depends, makedepends, optdepends, checkdepends)")]
pub struct ParseSearchByError(String);

impl FromStr for SearchBy {
    type Err = ParseSearchByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchBy::ALL
            .into_iter()
            .find(|by| by.as_str() == s)
            .ok_or_else(|| ParseSearchByError(s.to_string()))
    }
}

/// Value of the `type` request parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Search,
    Info,
    /// Older spelling of `info` that some servers still expect
    MultiInfo,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Search => "search",
            QueryType::Info => "info",
            QueryType::MultiInfo => "multiinfo",
        }
    }
}

/// A single RPC request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Search { by: Option<SearchBy>, term: String },
    Info { names: Vec<String> },
    MultiInfo { names: Vec<String> },
}

impl Query {
    pub fn search(by: Option<SearchBy>, term: impl Into<String>) -> Self {
        Query::Search {
            by,
            term: term.into(),
        }
    }

    pub fn info<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::Info {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn query_type(&self) -> QueryType {
        match self {
            Query::Search { .. } => QueryType::Search,
            Query::Info { .. } => QueryType::Info,
            Query::MultiInfo { .. } => QueryType::MultiInfo,
        }
    }

    /// Client operation this query belongs to
    pub fn operation(&self) -> Operation {
        match self {
            Query::Search { .. } => Operation::Search,
            Query::Info { .. } | Query::MultiInfo { .. } => Operation::Info,
        }
    }

    /// Encode into ordered query parameters.
    ///
    /// Package names become one `arg[]` each, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ArchApiError::Validation`] for an info query without names.
    pub fn encode(&self) -> ArchApiResult<QueryParams> {
        let mut params: QueryParams = vec![
            ("v", RPC_VERSION.to_string()),
            ("type", self.query_type().as_str().to_string()),
        ];

        match self {
            Query::Search { by, term } => {
                if let Some(by) = by {
                    params.push(("by", by.as_str().to_string()));
                }
                params.push(("arg", term.clone()));
            }
            Query::Info { names } | Query::MultiInfo { names } => {
                if names.is_empty() {
                    return Err(ArchApiError::validation(
                        self.operation(),
                        "no packages passed",
                    ));
                }
                params.extend(names.iter().map(|name| ("arg[]", name.clone())));
            }
        }

        Ok(params)
    }

    /// Full request URL against the RPC endpoint `base`
    pub fn to_url(&self, base: &Url) -> ArchApiResult<Url> {
        let params = self.encode()?;
        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }
}

/// Discriminator carried in the envelope's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Search,
    Info,
    Multiinfo,
    /// Remote failure; the live service sends `error`, older ones `string`
    #[serde(rename = "string", alias = "error")]
    Error,
    /// Any other value; `results` is still decoded
    #[serde(other)]
    Other,
}

/// RPC response envelope with the payload left undecoded
#[derive(Debug, Clone, Deserialize)]
pub struct RpcEnvelope {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    #[serde(rename = "resultcount", default)]
    pub result_count: u64,
    /// `None` when the key is absent; an explicit `null` is `Some(Value::Null)`
    #[serde(default, deserialize_with = "present")]
    results: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RpcEnvelope {
    /// Parse the envelope without touching `results`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchApiError::Decode`] at [`DecodeStage::Envelope`] for
    /// malformed JSON or a body without a valid `type`.
    pub fn parse(operation: Operation, body: &[u8]) -> ArchApiResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| ArchApiError::decode(operation, DecodeStage::Envelope, e))
    }

    /// Check if the remote reported a failure
    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::Error
    }

    /// Error text sent by the remote, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Decode the payload as a list of `T`.
    ///
    /// A `null` `results` is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ArchApiError::Application`] with the remote message when the
    /// discriminator signals failure, otherwise [`ArchApiError::Decode`] at
    /// [`DecodeStage::Payload`] if `results` is missing or not a list of `T`.
    pub fn into_results<T: DeserializeOwned>(self, operation: Operation) -> ArchApiResult<Vec<T>> {
        if self.is_error() {
            let message = self.error.unwrap_or_default();
            debug!(%operation, %message, "remote reported error");
            return Err(ArchApiError::application(operation, message));
        }

        let results = match self.results {
            None => {
                let missing = <serde_json::Error as de::Error>::missing_field("results");
                return Err(ArchApiError::decode(operation, DecodeStage::Payload, missing));
            }
            Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value::<Vec<T>>(value)
                .map_err(|e| ArchApiError::decode(operation, DecodeStage::Payload, e))?,
        };

        if results.len() as u64 != self.result_count {
            warn!(
                %operation,
                resultcount = self.result_count,
                decoded = results.len(),
                "resultcount does not match decoded results"
            );
        }

        Ok(results)
    }
}

/// Decode a complete RPC response body into a list of `T`
pub fn decode_results<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> ArchApiResult<Vec<T>> {
    RpcEnvelope::parse(operation, body)?.into_results(operation)
}
