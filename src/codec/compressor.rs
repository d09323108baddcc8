//! String compressor: UTF-8 text in, URL-safe Brotli string out.
//!
//! ```text
//! compress:   text ─utf8─> bytes ─brotli─> stream ─base64─> std ─url_safe─> encoded
//! decompress: encoded ─url_safe─> std ─base64─> stream ─brotli─> bytes ─utf8─> text
//! ```
//!
//! The async methods wait for the backend and then call the synchronous ones,
//! so both paths always produce the same output.

use std::sync::{Arc, OnceLock};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::backend::{Backend, BrotliBackend};
use super::loader::{BackendLoader, LoaderState};
use super::url_safe;
use crate::config::CodecConfig;
use crate::error::{CompassError, DecodeError, Result};

static SHARED: OnceLock<StrCompressor> = OnceLock::new();

/// Sizes of one compression, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    /// Encoded output
    pub data: String,
    /// Original size in bytes
    pub original_bytes: usize,
    /// Encoded size in bytes
    pub encoded_bytes: usize,
}

impl CompressionStats {
    /// Original / encoded size ratio
    pub fn byte_ratio(&self) -> f64 {
        if self.encoded_bytes == 0 {
            0.0
        } else {
            self.original_bytes as f64 / self.encoded_bytes as f64
        }
    }

    /// Check if compression made the text shorter
    pub fn is_beneficial(&self) -> bool {
        self.encoded_bytes < self.original_bytes
    }
}

/// URL-safe string compressor.
///
/// Cloning is cheap; clones share the same backend loader.
#[derive(Clone, Debug)]
pub struct StrCompressor {
    loader: Arc<BackendLoader>,
}

impl Default for StrCompressor {
    fn default() -> Self {
        Self::from_config(&CodecConfig::default())
    }
}

impl StrCompressor {
    /// Create an uninitialized compressor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized compressor from configuration
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            loader: Arc::new(BackendLoader::brotli(config.max_output_bytes)),
        }
    }

    /// Create a compressor from configuration, starting the backend load
    /// right away when `eager_init` is set.
    pub fn build(config: &CodecConfig) -> Self {
        let compressor = Self::from_config(config);
        if config.eager_init {
            compressor.start();
        }
        compressor
    }

    /// Create a compressor around a custom loader
    pub fn with_loader(loader: BackendLoader) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }

    /// Create a compressor whose backend is built right away.
    ///
    /// Synchronous `compress`/`decompress` work immediately on the result.
    pub fn ready(config: &CodecConfig) -> Result<Self> {
        let backend =
            BrotliBackend::build(config.max_output_bytes).map_err(CompassError::Initialization)?;
        Ok(Self {
            loader: Arc::new(BackendLoader::ready(Arc::new(backend))),
        })
    }

    /// Process-wide compressor.
    ///
    /// Constructed on first access; if that happens inside a Tokio runtime the
    /// backend load starts right away.
    pub fn shared() -> &'static StrCompressor {
        SHARED.get_or_init(|| StrCompressor::build(&CodecConfig::default()))
    }

    /// Start loading the backend in the background.
    ///
    /// Returns `false` when there is no Tokio runtime to run the load on; the
    /// first async call will load it instead.
    pub fn start(&self) -> bool {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let loader = Arc::clone(&self.loader);
                handle.spawn(async move {
                    if let Err(e) = loader.ensure_ready().await {
                        tracing::warn!(error = %e, "eager backend initialization failed");
                    }
                });
                true
            },
            Err(_) => false,
        }
    }

    /// Wait until the backend is ready
    pub async fn ensure_ready(&self) -> Result<()> {
        self.loader.ensure_ready().await.map(|_| ())
    }

    /// Check if synchronous calls will succeed
    pub fn is_ready(&self) -> bool {
        self.loader.is_ready()
    }

    /// Current loader state
    pub fn state(&self) -> LoaderState {
        self.loader.state()
    }

    /// Compress raw bytes with the ready backend
    pub fn compress_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        let backend = self.loader.try_get()?;
        backend.compress(input)
    }

    /// Decompress raw bytes with the ready backend
    pub fn decompress_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        let backend = self.loader.try_get()?;
        backend.decompress(input)
    }

    /// Compress text to a URL-safe string.
    ///
    /// Fails with [`CompassError::NotInitialized`] if the backend is not
    /// ready yet.
    pub fn compress(&self, text: &str) -> Result<String> {
        let backend = self.loader.try_get()?;
        Self::encode_with(backend.as_ref(), text)
    }

    /// Decompress a string produced by [`StrCompressor::compress`].
    pub fn decompress(&self, encoded: &str) -> Result<String> {
        let backend = self.loader.try_get()?;
        Self::decode_with(backend.as_ref(), encoded)
    }

    /// Compress and report sizes
    pub fn compress_with_stats(&self, text: &str) -> Result<CompressionStats> {
        let data = self.compress(text)?;
        Ok(CompressionStats {
            original_bytes: text.len(),
            encoded_bytes: data.len(),
            data,
        })
    }

    /// Wait for the backend, then [`StrCompressor::compress`].
    pub async fn compress_async(&self, text: &str) -> Result<String> {
        self.ensure_ready().await?;
        self.compress(text)
    }

    /// Wait for the backend, then [`StrCompressor::decompress`].
    pub async fn decompress_async(&self, encoded: &str) -> Result<String> {
        self.ensure_ready().await?;
        self.decompress(encoded)
    }

    fn encode_with(backend: &dyn Backend, text: &str) -> Result<String> {
        let compressed = backend.compress(text.as_bytes())?;
        let encoded = url_safe::encode(&BASE64.encode(&compressed));
        tracing::trace!(
            original = text.len(),
            compressed = compressed.len(),
            encoded = encoded.len(),
            "compressed text"
        );
        Ok(encoded)
    }

    fn decode_with(backend: &dyn Backend, encoded: &str) -> Result<String> {
        if encoded.is_empty() {
            return Err(DecodeError::EmptyInput.into());
        }

        let standard = url_safe::decode(encoded)?;
        let compressed = BASE64.decode(standard.as_bytes())?;
        let bytes = backend.decompress(&compressed)?;

        String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8(e.to_string()).into())
    }
}
