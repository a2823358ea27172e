//! Transport collaborators.
//!
//! The pipeline only knows the candidate base URLs of a stack and the path
//! it needs. Choosing a mirror is done by [`ShardedUrls`]; performing the
//! request is done by an [`AsyncHttpClient`].

mod http;
mod sharded;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use sharded::ShardedUrls;
pub use types::TransportError;

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
