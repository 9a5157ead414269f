pub mod client;
pub mod config;
pub mod converters;
pub mod errors;
pub mod models;
pub mod resolver;
pub mod session;
pub mod wasm;

pub use client::DeckApiClient;
pub use config::ClientConfig;
pub use converters::markdown;
pub use errors::{DeckApiError, Result};
pub use models::form::{FieldValue, FormState};
pub use models::slide::Slide;
pub use models::template::Template;
pub use resolver::{initialize, merge_generated, resolve_template, Resolution};
pub use session::{ContentGenerator, EditingSession, GenerationOutcome};

// features
#[cfg(feature = "diff")]
pub mod diff;
#[cfg(feature = "diff")]
pub use diff::comparer::ComparerBuilder;
