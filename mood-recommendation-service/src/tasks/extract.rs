use serde_json::Value;

/// The response shapes we know how to read text out of.
#[derive(Debug, Clone, PartialEq)]
pub enum RawModelOutput {
    /// Provider already aggregated the text for us.
    DirectText(String),
    /// A non-empty `output` sequence of blocks.
    Blocks(Vec<OutputBlock>),
    /// Anything else; rendered as-is.
    Unknown(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputBlock {
    Parts(Vec<ContentPart>),
    Text(String),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Plain(String),
    Keyed(String),
    Other,
}

impl RawModelOutput {
    /// Classifies a raw provider payload by inspecting its shape.
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = value.get("output_text").and_then(Value::as_str) {
            if !text.is_empty() {
                return Self::DirectText(text.to_string());
            }
        }

        match value.get("output").and_then(Value::as_array) {
            Some(blocks) if !blocks.is_empty() => {
                Self::Blocks(blocks.iter().map(OutputBlock::from_value).collect())
            }
            _ => Self::Unknown(value),
        }
    }
}

impl OutputBlock {
    fn from_value(block: &Value) -> Self {
        match block.get("content") {
            Some(Value::Array(parts)) => {
                Self::Parts(parts.iter().map(ContentPart::from_value).collect())
            }
            Some(Value::String(text)) => Self::Text(text.clone()),
            _ => Self::Other,
        }
    }
}

impl ContentPart {
    fn from_value(part: &Value) -> Self {
        match part {
            Value::String(text) => Self::Plain(text.clone()),
            Value::Object(fields) => match fields.get("text") {
                Some(Value::String(text)) => Self::Keyed(text.clone()),
                _ => Self::Other,
            },
            _ => Self::Other,
        }
    }
}

/// Best-effort plain text from a model response. Never fails.
pub fn extract_text(response: &RawModelOutput) -> String {
    match response {
        RawModelOutput::DirectText(text) => text.clone(),
        RawModelOutput::Blocks(blocks) => {
            let mut text = String::new();
            for block in blocks {
                match block {
                    OutputBlock::Parts(parts) => {
                        for part in parts {
                            if let ContentPart::Plain(fragment) | ContentPart::Keyed(fragment) =
                                part
                            {
                                text.push_str(fragment);
                            }
                        }
                    }
                    OutputBlock::Text(fragment) => text.push_str(fragment),
                    OutputBlock::Other => {}
                }
            }
            text
        }
        RawModelOutput::Unknown(value) => value.to_string(),
    }
}
