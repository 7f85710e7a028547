//! Medical image analyzer - forwards an uploaded medical image to a hosted
//! multimodal generative-AI model and returns the model's text verbatim.
//!
//! The conversation is seeded with a fixed instruction/acknowledgement pair so
//! every analysis request is interpreted in the same assistant context. One
//! user action maps to exactly one outbound request.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod session;

pub use error::{Error, Result};
