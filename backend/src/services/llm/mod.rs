//! LLM Service Module
//!
//! Generation backend used by the answer pipeline.
//!
//! # Architecture
//! ```text
//! ┌─────────────────┐
//! │   LLMService    │  ← Trait (prompt in, text out)
//! └────────┬────────┘
//!          │
//!    ┌─────┴─────┐
//!    ▼           ▼
//! ┌──────┐  ┌──────────┐
//! │Gemini│  │  Test    │
//! │Client│  │  doubles │
//! └──────┘  └──────────┘
//! ```

mod client;
mod models;
mod scenarios;
mod service;

pub use client::GeminiClient;
pub use models::*;
pub use scenarios::healthcare::{Prompt, PromptBuilder, ResponseStyle};
pub use service::LLMService;
