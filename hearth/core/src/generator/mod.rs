//! Message Generation
//!
//! This module provides abstracted access to generative backends through a
//! common trait interface, plus the local fallback used whenever generation
//! fails.
//!
//! # Available Generators
//!
//! - **Gemini**: Google's generative-language API (default)
//!
//! # Usage
//!
//! ```ignore
//! use hearth_core::generator::{GeminiGenerator, MessageGenerator, GeneratorRequest};
//! use hearth_core::message::MessageKind;
//!
//! let generator = GeminiGenerator::from_env();
//! let request = GeneratorRequest::new(MessageKind::Quote);
//! let message = generator.generate(&request).await?;
//! ```

mod gemini;
mod traits;

pub use gemini::{GeminiGenerator, DEFAULT_MODEL};
pub use traits::{fallback_message, GeneratorError, GeneratorRequest, MessageGenerator};
