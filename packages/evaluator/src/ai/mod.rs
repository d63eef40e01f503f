//! Reasoning service implementations.

mod openai;

pub use openai::{
    OpenAI, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TEMPERATURE, GROQ_BASE_URL,
    OPENAI_BASE_URL,
};
