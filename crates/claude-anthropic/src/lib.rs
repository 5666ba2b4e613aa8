mod adapter;
mod model_map;

pub use adapter::{AnthropicAdapter, AnthropicAdapterBuilder, DEFAULT_BASE_URL};
pub use client::AnthropicClient;
pub use dispatch::{DispatchSummary, Dispatched, Dispatcher};
pub mod api_v1;
mod client;
pub mod credentials;
pub mod dispatch;
pub mod error;
