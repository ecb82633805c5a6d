//! Mermaid diagram rendering for the guide site.
//!
//! This crate turns an embedded Mermaid source into inline markup:
//! - [`normalize`] strips common indentation and canonicalizes `<br>` directives
//! - [`DiagramRuntime`] initializes the engine once and runs the
//!   parse-then-render pipeline, never raising on failure
//! - [`DiagramSlot`] holds one diagram instance and discards stale passes
//! - [`KrokiEngine`] renders through a Kroki server
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - `normalize`: source normalization
//! - `options`: engine initialization options and override merging
//! - `engine`: the [`DiagramEngine`] trait
//! - `kroki`: Kroki HTTP engine with a local syntax check
//! - `runtime`: init guard and render pipeline
//! - `slot`: per-instance container with request sequencing
//! - `fallback`: error block markup
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use guide_diagrams::{DiagramRuntime, DiagramSlot, KrokiEngine};
//!
//! let runtime = Arc::new(DiagramRuntime::new(Arc::new(KrokiEngine::new("https://kroki.io"))));
//! let slot = DiagramSlot::mount(Arc::clone(&runtime), None);
//! slot.set_chart("graph TD\n  A[Start] --> B[End]");
//! println!("{}", slot.to_html());
//! ```

mod consts;
mod engine;
mod error;
mod fallback;
mod kroki;
mod normalize;
mod options;
mod runtime;
mod slot;
mod syntax;
mod target;

pub use engine::DiagramEngine;
pub use error::{DiagramError, EngineError};
pub use fallback::{escape_html, fallback_html};
pub use kroki::{KrokiEngine, scope_svg};
pub use normalize::{canonicalize_breaks, normalize, strip_common_indent};
pub use options::{FlowchartOptions, InitOptions, SequenceOptions};
pub use runtime::{DiagramFailure, DiagramRuntime, Rendered};
pub use slot::{DiagramSlot, RenderTicket};
pub use syntax::{check as check_syntax, detect_keyword};
pub use target::RenderTarget;
