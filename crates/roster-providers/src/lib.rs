//! Model backend clients.
//!
//! The runtime talks to the inference backend through [`ModelClient`];
//! the only shipped implementation is the Anthropic Messages API, but
//! tests substitute scripted fakes through the same trait.

mod anthropic;
mod config;
mod error;
mod traits;

pub use anthropic::AnthropicClient;
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use traits::{ModelClient, ModelResult};
