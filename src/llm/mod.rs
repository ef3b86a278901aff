// LLM abstraction layer

pub mod provider;
pub mod openai;
pub mod groq;

#[cfg(test)]
pub mod scripted;

pub use provider::*;
pub use crate::types::*;
