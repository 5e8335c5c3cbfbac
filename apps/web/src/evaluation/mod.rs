// Resume evaluation: prompt templates, completion parsing and the HTML handlers.
// All LLM calls go through llm_client — nothing here talks to Gemini directly.

pub mod handlers;
pub mod parser;
pub mod prompts;
