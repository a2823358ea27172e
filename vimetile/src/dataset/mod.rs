//! Dataset open entry point.
//!
//! A [`DatasetRegistry`] is the session-scoped object through which stacks
//! are opened. It owns the HTTP client, the decoder registry and a bounded
//! memo of stack metadata keyed by [`StackIdentity`]:
//!
//! - concurrent opens of the same stack share one in-flight stack info fetch,
//! - failed fetches are not remembered, so a later open retries,
//! - dropping the registry (or calling [`DatasetRegistry::clear`]) releases
//!   everything it memoized.
//!
//! # Example
//!
//! ```ignore
//! use vimetile::dataset::DatasetRegistry;
//! use vimetile::transport::AsyncReqwestClient;
//!
//! let registry = DatasetRegistry::new(AsyncReqwestClient::new()?);
//! let dataset = registry.open("https://host/project/p1/stack/s1/type/raw/3/0").await?;
//! println!("{} levels", dataset.num_levels());
//! ```

mod error;
mod url;

pub use error::DatasetError;
pub use url::DatasetUrl;

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::{debug, info, warn};

use crate::decode::DecoderRegistry;
use crate::pipeline::TilePipeline;
use crate::source::MultiscaleTileSource;
use crate::stack::{parse_stack_info, MetadataValidationError, StackIdentity, StackMetadata};
use crate::tile::stack_info_path;
use crate::transport::{AsyncHttpClient, ShardedUrls};

/// Default number of stacks whose metadata is memoized.
pub const DEFAULT_MAX_STACKS: u64 = 64;

/// Options of a [`DatasetRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Maximum number of memoized stack metadata records.
    pub max_stacks: u64,
    /// Extra base URLs added to every stack's candidate set.
    pub mirrors: Vec<String>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            max_stacks: DEFAULT_MAX_STACKS,
            mirrors: Vec::new(),
        }
    }
}

/// Opens datasets and memoizes their stack metadata.
pub struct DatasetRegistry<C> {
    client: Arc<C>,
    pipeline: TilePipeline<C>,
    mirrors: Vec<String>,
    metadata: MokaCache<StackIdentity, Arc<StackMetadata>>,
}

impl<C: AsyncHttpClient> DatasetRegistry<C> {
    /// Creates a registry with the built-in decoders and default options.
    pub fn new(client: C) -> Self {
        Self::with_options(
            client,
            DecoderRegistry::with_defaults(),
            RegistryOptions::default(),
        )
    }

    pub fn with_options(client: C, decoders: DecoderRegistry, options: RegistryOptions) -> Self {
        let client = Arc::new(client);
        let pipeline = TilePipeline::new(Arc::clone(&client), Arc::new(decoders));
        let metadata = MokaCache::builder()
            .max_capacity(options.max_stacks)
            .build();

        Self {
            client,
            pipeline,
            mirrors: options.mirrors,
            metadata,
        }
    }

    /// Opens the dataset named by a connection string.
    pub async fn open(&self, connection: &str) -> Result<MultiscaleTileSource<C>, DatasetError> {
        let url = DatasetUrl::parse(connection)?;
        self.open_url(&url).await
    }

    /// Opens an already parsed dataset URL.
    pub async fn open_url(
        &self,
        url: &DatasetUrl,
    ) -> Result<MultiscaleTileSource<C>, DatasetError> {
        let metadata = self.stack_info(&url.identity).await?;
        let base_urls = self.base_urls(&url.identity);
        let source = MultiscaleTileSource::new(base_urls, metadata, self.pipeline.clone());

        info!(
            stack = %url.identity,
            levels = source.num_levels(),
            "Opened dataset"
        );
        Ok(source)
    }

    /// Returns the metadata of a stack, fetching it on first use.
    pub async fn stack_info(
        &self,
        identity: &StackIdentity,
    ) -> Result<Arc<StackMetadata>, DatasetError> {
        self.metadata
            .try_get_with(identity.clone(), self.fetch_stack_info(identity))
            .await
            .map_err(|e| (*e).clone())
    }

    /// Number of memoized stacks.
    pub async fn cached_stacks(&self) -> u64 {
        self.metadata.run_pending_tasks().await;
        self.metadata.entry_count()
    }

    /// Forgets all memoized metadata.
    pub async fn clear(&self) {
        self.metadata.invalidate_all();
        self.metadata.run_pending_tasks().await;
    }

    fn base_urls(&self, identity: &StackIdentity) -> ShardedUrls {
        self.mirrors
            .iter()
            .fold(ShardedUrls::single(identity.base_url.as_str()), |urls, mirror| {
                urls.with_mirror(mirror.as_str())
            })
    }

    async fn fetch_stack_info(
        &self,
        identity: &StackIdentity,
    ) -> Result<Arc<StackMetadata>, DatasetError> {
        let url = self.base_urls(identity).url_for(&stack_info_path(identity));
        debug!(url = %url, "Fetching stack info");

        let body = self.client.get(&url).await.map_err(|source| {
            warn!(stack = %identity, error = %source, "Stack info fetch failed");
            DatasetError::MetadataFetch {
                stack: identity.to_string(),
                source,
            }
        })?;

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            MetadataValidationError::new("<root>", format!("invalid JSON: {}", e))
        })?;

        Ok(Arc::new(parse_stack_info(&value)?))
    }
}
