use crate::models::{MovieSuggestion, RecommendationSet, SongSuggestion};

/// The single example shown to the model so it copies the expected shape.
pub fn worked_example() -> RecommendationSet {
    RecommendationSet {
        movies: vec![MovieSuggestion {
            title: Some("In the Mood for Love".to_string()),
            year: Some("2000".to_string()),
            why: "A melancholic and visually poetic film about longing.".to_string(),
        }],
        songs: vec![SongSuggestion {
            title: "The Look of Love".to_string(),
            artist: Some("Dusty Springfield".to_string()),
            why: "Smooth and romantic.".to_string(),
        }],
    }
}

pub fn build_prompt(mood: &str) -> String {
    // Serializing plain strings and Vecs cannot fail.
    let example = serde_json::to_string(&worked_example()).unwrap_or_default();

    format!(
        "You are a helpful movie curator. Based on the user's mood '{mood}', \
         suggest 3 movies and 3 songs.\n\
         Output a valid JSON object with keys 'movies' and 'songs'.\n\
         Each movie must have: title, year (if known), why (1 sentence).\n\
         Each song must have: title, artist (if known), why (1 sentence).\n\
         Return strictly JSON, no other text.\n\
         Example:\n\
         {example}"
    )
}
