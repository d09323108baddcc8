//! # Compass - URL-safe text compression
//!
//! Turns arbitrary text into a short string made only of `A-Z a-z 0-9 - _`
//! and back, losslessly and deterministically. The string can be put in a URL
//! (query parameter, path segment, fragment) without escaping.
//!
//! ## Pipeline
//!
//! ```text
//! text ──UTF-8──> bytes ──Brotli (q11)──> stream ──base64──> standard
//!                                                             │ + → -
//!                                                             │ / → _
//!                                                             │ strip =
//!                                                             v
//!                                                          encoded
//! ```
//!
//! ## Backend lifecycle
//!
//! The Brotli backend is built once per [`StrCompressor`] and shared by its
//! clones. Loading is single-flight:
//!
//! ```text
//! [Uninitialized] ──ensure_ready()──> [Initializing] ──> [Ready]
//!                                            │
//!                                            └──> [Failed]  (terminal)
//! ```
//!
//! - `compress` / `decompress` never wait. Before `Ready` they fail with
//!   [`CompassError::NotInitialized`].
//! - `compress_async` / `decompress_async` wait for `Ready`, then run the
//!   synchronous code. Output is identical on both paths.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use compass::StrCompressor;
//!
//! let compressor = StrCompressor::shared();
//! let encoded = compressor.compress_async("Hello, World!").await?;
//! assert_eq!(compressor.decompress(&encoded)?, "Hello, World!");
//! ```
//!
//! For purely synchronous use build a ready instance up front:
//!
//! ```rust,ignore
//! use compass::{codec::StrCompressor, config::CodecConfig};
//!
//! let compressor = StrCompressor::ready(&CodecConfig::default())?;
//! let encoded = compressor.compress("Hello, World!")?;
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: backend, loader, URL-safe transform, string compressor
//! - [`prompts`]: fixed few-shot prompt chains (summaries, language detection)
//! - [`social`]: follow/favorite/like calls forwarded to a remote endpoint
//! - [`config`]: configuration management
//! - [`error`]: error types and result aliases

pub mod codec;
pub mod config;
pub mod error;
pub mod prompts;
pub mod social;

// Re-exports for convenience
pub use codec::{Backend, BackendLoader, BrotliBackend, LoaderState, StrCompressor};
pub use config::Config;
pub use error::{CompassError, DecodeError, Result};
pub use prompts::{ChatMessage, ChatPayload, PromptChain, Role};
pub use social::{Pagination, SocialService, Target, TargetType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if content looks like compressor output
pub fn is_encoded_format(content: &str) -> bool {
    codec::is_encoded_format(content)
}
