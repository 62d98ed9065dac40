//! Anthropic completion provider

mod client;
mod completion;
mod types;

pub use client::AnthropicClient;
pub use completion::AnthropicCompletionProvider;
