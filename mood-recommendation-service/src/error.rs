use thiserror::Error;

/// Failures talking to the text-generation API. The `Display` text is what
/// callers see in the `details` field of a 500 response.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request to generation API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generation API returned an unreadable body: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Mood is required")]
    MissingMood,

    #[error("OpenAI request failed: {0}")]
    Generation(#[from] GenerationError),
}
