pub mod enrich;
pub mod extract;
pub mod generation;
pub mod parse;
pub mod prompt;

pub use enrich::{MetadataLookup, OmdbClient, enrich_movies};
pub use extract::{RawModelOutput, extract_text};
pub use generation::{GenerationClient, OpenAiResponsesClient};
pub use parse::parse_json_block;
pub use prompt::build_prompt;
