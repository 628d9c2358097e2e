use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::error::RecommendError;
use crate::models::{
    GenerationRequest, MovieSuggestion, ParsedRecommendations, RecommendationOutcome,
};
use crate::tasks::{
    GenerationClient, MetadataLookup, OmdbClient, OpenAiResponsesClient, build_prompt,
    enrich_movies, extract_text, parse_json_block,
};

/// Mood in, enriched movie and song suggestions out.
///
/// Every call is independent: prompt, one generation call, then one metadata
/// lookup per suggested movie, in order.
pub struct RecommendationService {
    generator: Arc<dyn GenerationClient>,
    metadata: Arc<dyn MetadataLookup>,
    model: String,
}

impl RecommendationService {
    pub fn new(
        generator: Arc<dyn GenerationClient>,
        metadata: Arc<dyn MetadataLookup>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            metadata,
            model: model.into(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let generator = Arc::new(OpenAiResponsesClient::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
        ));
        let metadata = Arc::new(OmdbClient::new(
            config.omdb_base_url.clone(),
            config.omdb_api_key.clone(),
        )?);
        Ok(Self::new(generator, metadata, config.openai_model.clone()))
    }

    pub async fn recommend(
        &self,
        mood: Option<&str>,
    ) -> Result<RecommendationOutcome, RecommendError> {
        let mood = mood
            .filter(|mood| !mood.is_empty())
            .ok_or(RecommendError::MissingMood)?;

        let span = info_span!("recommend", request_id = %Uuid::new_v4());
        self.run(mood).instrument(span).await
    }

    async fn run(&self, mood: &str) -> Result<RecommendationOutcome, RecommendError> {
        info!(%mood, "Received recommendation request");

        let request = GenerationRequest::new(self.model.clone(), build_prompt(mood));
        let raw = self.generator.generate(&request).await?;

        let text = extract_text(&raw);
        info!("Model returned {} characters", text.len());

        let mut parsed = match parse_json_block(&text) {
            ParsedRecommendations::Structured(Value::Object(map)) => map,
            ParsedRecommendations::Structured(_) | ParsedRecommendations::RawFallback { .. } => {
                warn!("Model output is not a JSON object");
                return Ok(RecommendationOutcome::Unparsed { raw: text });
            }
        };

        let suggestions: Vec<MovieSuggestion> = match parsed.get("movies") {
            Some(Value::Array(movies)) => movies.iter().map(MovieSuggestion::from_value).collect(),
            _ => {
                warn!("Model output has no movie list");
                return Ok(RecommendationOutcome::Unparsed { raw: text });
            }
        };

        let enriched = enrich_movies(self.metadata.as_ref(), suggestions).await;
        info!("Enriched {} movies", enriched.len());

        parsed.insert(
            "movies".to_string(),
            serde_json::to_value(&enriched).unwrap_or(Value::Null),
        );

        Ok(RecommendationOutcome::Recommendations(parsed))
    }
}
