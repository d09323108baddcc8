//! Compression backend capability and its Brotli adapter.
//!
//! The rest of the codec only sees [`Backend`]. How an engine is produced
//! (statically linked, loaded from a plugin, mocked in tests) stays behind
//! the loader's factory.

use std::future::Future;
use std::io::{Cursor, Read, Write};
use std::pin::Pin;
use std::sync::Arc;

use brotli::{CompressorWriter, Decompressor};

use crate::error::{CompassError, DecodeError, Result};

/// Brotli compression quality. Fixed: the wire format has one setting.
const QUALITY: u32 = 11;

/// Brotli window size (log2).
const LG_WINDOW_SIZE: u32 = 22;

/// Internal buffer size for the streaming reader/writer.
const BUFFER_SIZE: usize = 4096;

/// Default cap on decompressed output (16 MiB).
pub const DEFAULT_MAX_OUTPUT: usize = 16 * 1024 * 1024;

/// Byte-level compression engine.
///
/// Implementations are immutable once constructed and shared between all
/// callers as `Arc<dyn Backend>`.
pub trait Backend: Send + Sync {
    /// Compress a byte buffer. Empty input yields a valid, non-empty stream.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decompress a byte buffer, failing with [`DecodeError::CorruptData`]
    /// when the input is not a complete stream.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Engine name for logs.
    fn name(&self) -> &'static str;
}

/// Future returned by a backend factory.
pub type BackendFuture =
    Pin<Box<dyn Future<Output = std::result::Result<Arc<dyn Backend>, String>> + Send>>;

/// Brotli backend
#[derive(Debug, Clone)]
pub struct BrotliBackend {
    /// Maximum decompressed size in bytes
    max_output: usize,
}

impl Default for BrotliBackend {
    fn default() -> Self {
        Self {
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }
}

impl BrotliBackend {
    /// Create a Brotli backend with the default output cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with a custom decompressed-size cap
    pub fn with_limit(max_output: usize) -> Self {
        Self { max_output }
    }

    /// Build the backend and check that the engine round-trips a probe.
    ///
    /// This is the blocking half of [`BrotliBackend::load`], usable when a
    /// ready compressor is needed outside of an async context.
    pub fn build(max_output: usize) -> std::result::Result<Self, String> {
        let backend = Self::with_limit(max_output);
        let probe = b"compass-probe";
        let restored = backend
            .compress(probe)
            .and_then(|stream| backend.decompress(&stream))
            .map_err(|e| format!("brotli self-check failed: {e}"))?;
        if restored != probe {
            return Err("brotli self-check returned different bytes".to_string());
        }
        Ok(backend)
    }

    /// Factory future used by the backend loader.
    pub fn load(max_output: usize) -> BackendFuture {
        Box::pin(async move {
            let backend = Self::build(max_output)?;
            Ok(Arc::new(backend) as Arc<dyn Backend>)
        })
    }
}

impl Backend for BrotliBackend {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut writer = CompressorWriter::new(Vec::new(), BUFFER_SIZE, QUALITY, LG_WINDOW_SIZE);
        writer
            .write_all(input)
            .map_err(|e| CompassError::Compression(e.to_string()))?;
        Ok(writer.into_inner())
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Err(DecodeError::CorruptData("empty stream".to_string()).into());
        }

        let limit = self.max_output as u64 + 1;
        let mut decompressed = Vec::new();
        let mut reader = Decompressor::new(Cursor::new(input), BUFFER_SIZE).take(limit);
        reader
            .read_to_end(&mut decompressed)
            .map_err(|e| DecodeError::CorruptData(e.to_string()))?;

        if decompressed.len() > self.max_output {
            return Err(DecodeError::TooLarge {
                limit: self.max_output,
            }
            .into());
        }

        // The stream must end exactly at the end of the input. Bytes already
        // buffered past the end are reported by one more read; bytes never
        // pulled from the cursor show up in its position.
        let mut decompressor = reader.into_inner();
        let mut extra = [0u8; 1];
        let buffered_tail = !matches!(decompressor.read(&mut extra), Ok(0));
        let unread_tail = decompressor.get_ref().position() != input.len() as u64;
        if buffered_tail || unread_tail {
            return Err(DecodeError::CorruptData("trailing data after stream".to_string()).into());
        }
        Ok(decompressed)
    }

    fn name(&self) -> &'static str {
        "brotli"
    }
}
