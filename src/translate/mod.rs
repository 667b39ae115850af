pub mod interface;
pub mod language_codes;
pub mod normalizer;
pub mod extractor;
pub mod client;

pub use interface::{TranslationBackend, TranslationRequest, TranslationResponse};
pub use client::HuggingFaceClient;
