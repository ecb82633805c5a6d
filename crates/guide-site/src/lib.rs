//! Routes, navigation and page rendering for the LangChain4j guide.
//!
//! This crate provides:
//! - [`resolve`]: exact-match route table from URL path to page source
//! - [`navigation`]: sidebar groups and footer links
//! - [`Site`]: lazily rendered, memoized pages wrapped in the site shell
//!
//! Page sources are markdown files with YAML front matter, compiled into the
//! binary. Mermaid fences are rendered through `guide-diagrams` when
//! diagrams are enabled.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use guide_site::{Resolution, Site, SiteOptions};
//!
//! let site = Site::new(SiteOptions::default());
//!
//! match site.resolve("/rag-intro") {
//!     Resolution::Page(route) => {
//!         let page = site.page(route.path)?;
//!         let html = site.page_document(&page);
//!     }
//!     Resolution::NotFound => {
//!         let html = site.not_found_document();
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod components;
mod front_matter;
mod layout;
mod markdown;
mod navigation;
mod routes;
mod site;

pub use front_matter::{FrontMatterError, NextLink, PageMeta, PageTag, PathCard, TagVariant};
pub use layout::{LOADING_TEXT, NOT_FOUND_TITLE, SCRIPT_PATH, STYLESHEET_PATH, SiteOptions};
pub use navigation::{
    ExternalLink, FooterLinks, InternalLink, NavGroup, NavItem, NavigationData, footer_links,
    nav_groups, navigation,
};
pub use routes::{Resolution, Route, resolve, routes};
pub use site::{DiagramSettings, PageError, RenderedPage, Site};
