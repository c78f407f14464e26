use log::{trace, warn};
use thiserror::Error;

use crate::helpers::AnswerText;
use crate::model::{Difficulty, Riddle};

pub const HINT_APOLOGY: &str = "The sages are silent for now. Trust your intuition.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    PlainText,
}

/// A single call to the text generator. Network backends only need
/// `prompt()` and `response_format()`; offline backends may use the
/// structured fields instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Riddle {
        difficulty: Difficulty,
        prompt: String,
    },
    Hint {
        answer_name: String,
        prompt: String,
    },
}

impl GenerationRequest {
    pub fn riddle(difficulty: Difficulty) -> Self {
        let prompt = format!(
            "You are an expert in Vedic lore. Generate a concise and intriguing riddle of two to \
             four sentences about {}. Do not mention the figure's name anywhere in the riddle. \
             Return the response as a single, valid JSON object with the string fields \
             \"riddle\" (the riddle text) and \"name\" (the figure who answers it).",
            difficulty.prompt_guidance()
        );
        GenerationRequest::Riddle { difficulty, prompt }
    }

    pub fn hint(answer_name: &str) -> Self {
        let prompt = format!(
            "Give a single-sentence hint about the Vedic figure {answer_name} that helps a player \
             identify them. Never use the name \"{answer_name}\" in the hint. Reply with the \
             sentence only."
        );
        GenerationRequest::Hint {
            answer_name: answer_name.to_string(),
            prompt,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            GenerationRequest::Riddle { prompt, .. } | GenerationRequest::Hint { prompt, .. } => {
                prompt
            }
        }
    }

    pub fn response_format(&self) -> ResponseFormat {
        match self {
            GenerationRequest::Riddle { .. } => ResponseFormat::Json,
            GenerationRequest::Hint { .. } => ResponseFormat::PlainText,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generator unavailable: {0}")]
    Unavailable(String),
    #[error("text generator returned an empty response")]
    EmptyResponse,
    #[error("malformed riddle response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("riddle response is missing the {0} field")]
    MissingField(&'static str),
    #[error("generated text gives away the answer")]
    AnswerRevealed,
}

/// Capability boundary to whatever produces riddle and hint text.
pub trait TextGenerator {
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        (**self).generate(request)
    }
}

/// Produces riddles and hints from a [`TextGenerator`], substituting fixed
/// fallback content whenever the generator fails or misbehaves.
pub struct RiddleSource<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> RiddleSource<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generate_riddle(&mut self, difficulty: Difficulty) -> Riddle {
        match self.try_generate_riddle(difficulty) {
            Ok(riddle) => {
                trace!(target: "riddle_source", "Generated {difficulty} riddle about {}", riddle.answer_name);
                riddle
            }
            Err(err) => {
                warn!(target: "riddle_source", "Falling back to the default riddle: {err}");
                Riddle::fallback()
            }
        }
    }

    pub fn generate_hint(&mut self, answer_name: &str) -> String {
        match self.try_generate_hint(answer_name) {
            Ok(hint) => hint,
            Err(err) => {
                warn!(target: "riddle_source", "Hint unavailable for {answer_name}: {err}");
                HINT_APOLOGY.to_string()
            }
        }
    }

    fn try_generate_riddle(&mut self, difficulty: Difficulty) -> Result<Riddle, GenerationError> {
        let response = self
            .generator
            .generate(&GenerationRequest::riddle(difficulty))?;
        parse_riddle_response(&response)
    }

    fn try_generate_hint(&mut self, answer_name: &str) -> Result<String, GenerationError> {
        let response = self.generator.generate(&GenerationRequest::hint(answer_name))?;
        parse_hint_response(&response, answer_name)
    }
}

/// Parses the generator's structured riddle, tolerating a Markdown code fence.
pub fn parse_riddle_response(response: &str) -> Result<Riddle, GenerationError> {
    let body = strip_code_fence(response);
    if body.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let parsed: Riddle = serde_json::from_str(body)?;
    let riddle = Riddle::new(parsed.text.trim(), parsed.answer_name.trim());
    if riddle.text.is_empty() {
        return Err(GenerationError::MissingField("riddle"));
    }
    if riddle.answer_name.is_empty() {
        return Err(GenerationError::MissingField("name"));
    }
    if riddle.reveals_answer() {
        return Err(GenerationError::AnswerRevealed);
    }
    Ok(riddle)
}

/// Keeps the first non-blank line of the response.
pub fn parse_hint_response(response: &str, answer_name: &str) -> Result<String, GenerationError> {
    let hint = response
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(GenerationError::EmptyResponse)?;
    if hint.mentions(answer_name) {
        return Err(GenerationError::AnswerRevealed);
    }
    Ok(hint.to_string())
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let fenced = fenced.strip_prefix("json").unwrap_or(fenced);
    fenced.strip_suffix("```").unwrap_or(fenced).trim()
}
