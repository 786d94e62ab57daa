pub mod chat;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod form;
pub mod gemini;
pub mod meal_plan;
pub mod normalizer;
pub mod profile;
pub mod prompt;
pub mod session;
pub mod transcript;
pub mod validation;
