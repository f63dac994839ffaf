//! Streaming splitter for plain text, inline code and fenced code.
//!
//! Input arrives as arbitrarily cut fragments (LLM tokens, network chunks). Regions are told
//! apart only by counting backticks: one toggles inline code, three or more toggle a fence, two
//! are literal. Runs are resolved lazily, so the output never depends on where the cuts fall.

pub mod driver;
pub mod render;
pub mod resolver;
pub mod state;
pub mod stream;
pub mod types;

#[cfg(feature = "pulldown")]
pub mod adapters;

pub use driver::*;
pub use render::*;
pub use resolver::*;
pub use state::*;
pub use stream::*;
pub use types::*;
