use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Served in place of a poster when the metadata provider has none.
pub const PLACEHOLDER_POSTER: &str = "/static/poster-placeholder.png";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 700;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub mood: Option<String>,
}

/// Body of a single call to the Responses endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    #[serde(rename = "input")]
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MovieSuggestion {
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub why: String,
}

impl MovieSuggestion {
    /// Reads a movie entry from model output. Years may arrive as numbers.
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: text_field(value, "title"),
            year: text_field(value, "year"),
            why: text_field(value, "why").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SongSuggestion {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub why: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet {
    pub movies: Vec<MovieSuggestion>,
    pub songs: Vec<SongSuggestion>,
}

/// Outcome of tolerant parsing: either decoded JSON or the text we could not decode.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecommendations {
    Structured(Value),
    RawFallback { raw_text: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieMetadata {
    pub poster: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub plot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedMovie {
    pub title: Option<String>,
    pub year: Option<String>,
    pub why: String,
    pub poster_url: String,
    pub genre: Option<String>,
    pub plot: Option<String>,
}

impl EnrichedMovie {
    pub fn new(suggestion: MovieSuggestion, metadata: MovieMetadata) -> Self {
        let MovieMetadata {
            poster,
            year,
            genre,
            plot,
        } = metadata;

        Self {
            title: suggestion.title,
            year: non_empty(year).or(suggestion.year),
            why: suggestion.why,
            poster_url: non_empty(poster).unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            genre,
            plot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    /// Parsed model output with `movies` replaced by enriched entries.
    Recommendations(Map<String, Value>),
    /// The model answered but no movie list could be recovered.
    Unparsed { raw: String },
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
