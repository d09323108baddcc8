//! URL-safe text compression.
//!
//! One algorithm (Brotli, quality 11) and one encoding (base64 with the
//! URL-safe alphabet, no padding). Encoded strings only contain
//! `A-Z a-z 0-9 - _` and can be placed in a URL as-is.
//!
//! # Components
//!
//! | Component          | Type / function                          |
//! |--------------------|------------------------------------------|
//! | Backend            | [`Backend`], [`BrotliBackend`]           |
//! | Backend loader     | [`BackendLoader`] (single-flight)        |
//! | URL-safe transform | [`url_safe::encode`], [`url_safe::decode`] |
//! | String codec       | [`StrCompressor`]                        |
//!
//! # Usage
//!
//! ```rust,ignore
//! use compass::codec::StrCompressor;
//!
//! let compressor = StrCompressor::shared();
//! let encoded = compressor.compress_async("Hello, World!").await?;
//! let text = compressor.decompress_async(&encoded).await?;
//!
//! // Once ready, the synchronous API gives identical results
//! assert_eq!(compressor.compress("Hello, World!")?, encoded);
//! ```

mod backend;
mod compressor;
mod loader;
pub mod url_safe;

pub use backend::{Backend, BackendFuture, BrotliBackend, DEFAULT_MAX_OUTPUT};
pub use compressor::{CompressionStats, StrCompressor};
pub use loader::{BackendLoader, LoaderState};

/// Check if a string could be compressor output (alphabet and length only)
pub fn is_encoded_format(content: &str) -> bool {
    !content.is_empty() && content.len() % 4 != 1 && url_safe::is_url_safe(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_encoded_format() {
        assert!(is_encoded_format("CwaASGVsbG8D"));
        assert!(!is_encoded_format(""));
        assert!(!is_encoded_format("abcde"));
        assert!(!is_encoded_format("a+b/"));
    }
}
