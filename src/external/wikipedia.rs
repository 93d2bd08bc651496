use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::{
    entities::{Coordinates, DirectoryEntry, LoadingState, Place},
    error::Error,
};

pub const DEFAULT_API_BASE: &str = "https://en.wikipedia.org";
pub const SEARCH_RADIUS: u32 = 10_000;
pub const RESULT_LIMIT: u32 = 50;
pub const THUMBNAIL_SIZE: u32 = 500;

const USER_AGENT: &str = concat!("bucketlist/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    query: Option<Query>,
    error: Option<ServiceError>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Query {
    #[serde(default)]
    pages: BTreeMap<i64, DirectoryEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ServiceError {
    code: String,
    #[serde(default)]
    info: String,
}

/// Looks up encyclopedia pages near a point.
///
/// Every call issues exactly one request; nothing is cached or retried.
#[derive(Clone, Debug)]
pub struct DirectoryClient {
    http: reqwest::Client,
    api_base: String,
}

impl DirectoryClient {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetches pages near `place`, collapsing every failure into
    /// [`LoadingState::Failed`].
    #[tracing::instrument(skip(self, place), fields(place_id = %place.id))]
    pub async fn fetch_nearby(&self, place: &Place) -> LoadingState {
        match self.query_nearby(place.coordinates()).await {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "nearby pages loaded");
                LoadingState::Loaded { entries }
            }
            Err(err) => {
                tracing::warn!(error = %err, "nearby lookup failed");
                LoadingState::Failed
            }
        }
    }

    /// Pages near `coordinates`, sorted by title.
    #[tracing::instrument(skip(self))]
    pub async fn query_nearby(&self, coordinates: Coordinates) -> Result<Vec<DirectoryEntry>, Error> {
        let ggscoord: String = coordinates.into();
        let url = format!("{}/w/api.php", self.api_base);

        let res = self
            .http
            .get(url)
            .query(&[("ggscoord", ggscoord)])
            .query(&[
                ("action", "query"),
                ("prop", "coordinates|pageimages|pageterms"),
                ("piprop", "thumbnail"),
                ("wbptterms", "description"),
                ("generator", "geosearch"),
                ("format", "json"),
            ])
            .query(&[
                ("colimit", RESULT_LIMIT),
                ("pithumbsize", THUMBNAIL_SIZE),
                ("pilimit", RESULT_LIMIT),
                ("ggsradius", SEARCH_RADIUS),
                ("ggslimit", RESULT_LIMIT),
            ])
            .send()
            .await?;

        let status = res.status();

        if status.is_client_error() {
            return Err(Error::invalid_input_error());
        } else if status != reqwest::StatusCode::OK {
            return Err(Error::upstream_error());
        }

        let data: Response = res.json().await?;

        if let Some(err) = data.error {
            tracing::debug!(code = %err.code, info = %err.info, "directory service error");
            return Err(Error::upstream_error());
        }

        // no query object is how the service reports zero results
        let pages = data.query.map(|query| query.pages).unwrap_or_default();

        Ok(sorted_by_title(pages.into_values().collect()))
    }
}

/// Stable sort, so equal titles keep their page-key order.
pub fn sorted_by_title(mut entries: Vec<DirectoryEntry>) -> Vec<DirectoryEntry> {
    entries.sort_by(|a, b| a.title.cmp(&b.title));
    entries
}
