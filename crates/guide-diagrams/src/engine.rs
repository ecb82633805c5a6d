//! Rendering engine abstraction.

use crate::error::EngineError;
use crate::options::InitOptions;
use crate::target::RenderTarget;

/// Two-phase diagram rendering engine.
///
/// [`DiagramRuntime`](crate::DiagramRuntime) calls [`initialize`](Self::initialize)
/// at most once, then for every pass calls [`parse`](Self::parse) and, only
/// when it returns `Ok(true)`, [`render`](Self::render).
pub trait DiagramEngine: Send + Sync {
    /// Apply global configuration. Called once per runtime.
    fn initialize(&self, options: &InitOptions);

    /// Check the normalized source.
    ///
    /// `Ok(false)` means the source was inspected and found unusable without
    /// a more specific error.
    fn parse(&self, source: &str) -> Result<bool, EngineError>;

    /// Render the normalized source to inline markup scoped to `target`.
    fn render(&self, target: &RenderTarget, source: &str) -> Result<String, EngineError>;
}
