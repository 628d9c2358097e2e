use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::{EnrichedMovie, MovieMetadata, MovieSuggestion};

pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

/// OMDb's marker for a field it has no value for.
const NOT_AVAILABLE: &str = "N/A";

/// Source of poster, year, genre and plot for a movie title.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Returns all-absent metadata on any failure.
    async fn lookup(&self, title: &str, year: Option<&str>) -> MovieMetadata;
}

pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, api_key, LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    async fn fetch(
        &self,
        api_key: &str,
        title: &str,
        year: Option<&str>,
    ) -> anyhow::Result<OmdbResponse> {
        let mut params = vec![("t", title), ("apikey", api_key)];
        if let Some(year) = year.filter(|year| !year.is_empty()) {
            params.push(("y", year));
        }
        let url = Url::parse_with_params(&self.base_url, &params)?;

        let response = self.http.get(url).send().await?;
        let body = response.json::<OmdbResponse>().await?;
        Ok(body)
    }
}

#[async_trait]
impl MetadataLookup for OmdbClient {
    async fn lookup(&self, title: &str, year: Option<&str>) -> MovieMetadata {
        let Some(api_key) = self.api_key.as_deref() else {
            return MovieMetadata::default();
        };

        let body = match self.fetch(api_key, title, year).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%title, "OMDb lookup failed: {}", e);
                return MovieMetadata::default();
            }
        };

        if body.response.as_deref() != Some("True") {
            debug!(%title, error = ?body.error, "OMDb has no match");
            return MovieMetadata::default();
        }

        MovieMetadata {
            poster: body.poster.filter(|poster| poster != NOT_AVAILABLE),
            year: body.year,
            genre: body.genre,
            plot: body.plot,
        }
    }
}

/// Enriches each suggestion in order, one lookup at a time.
pub async fn enrich_movies(
    metadata: &dyn MetadataLookup,
    suggestions: Vec<MovieSuggestion>,
) -> Vec<EnrichedMovie> {
    let mut enriched = Vec::with_capacity(suggestions.len());

    for suggestion in suggestions {
        let found = match suggestion.title.as_deref().filter(|title| !title.is_empty()) {
            Some(title) => {
                info!(%title, "Looking up movie metadata");
                metadata.lookup(title, suggestion.year.as_deref()).await
            }
            None => MovieMetadata::default(),
        };
        enriched.push(EnrichedMovie::new(suggestion, found));
    }

    enriched
}
