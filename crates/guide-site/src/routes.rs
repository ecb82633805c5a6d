//! Route table: URL path to page source.

/// One routable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// URL path with leading slash.
    pub path: &'static str,
    /// Stable page identifier (`index` for `/`).
    pub page_id: &'static str,
    /// Markdown source with front matter.
    pub source: &'static str,
}

/// Result of looking up a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Page(&'static Route),
    NotFound,
}

macro_rules! route {
    ("/", $id:literal) => {
        Route {
            path: "/",
            page_id: $id,
            source: include_str!(concat!("../content/", $id, ".md")),
        }
    };
    ($id:literal) => {
        Route {
            path: concat!("/", $id),
            page_id: $id,
            source: include_str!(concat!("../content/", $id, ".md")),
        }
    };
}

static ROUTES: &[Route] = &[
    route!("/", "index"),
    route!("getting-started"),
    route!("core-concepts"),
    route!("embedding-models"),
    route!("prompt-templates"),
    route!("output-parsers"),
    route!("model-providers"),
    route!("function-calling-deep"),
    route!("advanced-features"),
    route!("multimodal-full"),
    route!("rag-intro"),
    route!("rag-setup"),
    route!("rag-implementation"),
    route!("rag-advanced"),
    route!("rag-complete"),
    route!("project-chatbot"),
    route!("project-ai-assistant"),
    route!("project-rag-kb"),
    route!("practice"),
    route!("best-practices"),
    route!("testing-strategies"),
    route!("performance-tuning"),
    route!("deep-dive"),
    route!("error-handling"),
    route!("moderation-safety"),
    route!("troubleshooting"),
    route!("interview-prep"),
    route!("search"),
    route!("chat-listeners"),
    route!("faq"),
    route!("cost-optimization"),
    route!("deployment"),
    route!("integrations"),
    route!("examples"),
    // Linked from the sidebar
    route!("token-stream"),
    route!("agent-deep-dive"),
    route!("constraint-validation"),
    route!("output-guard"),
    route!("document-splitting"),
    route!("performance-benchmark"),
    route!("security-deep-dive"),
    route!("production-config"),
];

/// All routes in table order.
#[must_use]
pub fn routes() -> &'static [Route] {
    ROUTES
}

/// Look up a path by exact match.
///
/// No trailing-slash or case folding: `/faq/` and `/FAQ` are not found.
#[must_use]
pub fn resolve(path: &str) -> Resolution {
    ROUTES
        .iter()
        .find(|r| r.path == path)
        .map_or(Resolution::NotFound, Resolution::Page)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::navigation::{footer_links, nav_groups};

    #[test]
    fn test_every_route_resolves_to_itself() {
        for route in routes() {
            match resolve(route.path) {
                Resolution::Page(found) => assert_eq!(found.page_id, route.page_id),
                Resolution::NotFound => panic!("{} not found", route.path),
            }
        }
    }

    #[test]
    fn test_route_count_and_uniqueness() {
        let paths: HashSet<_> = routes().iter().map(|r| r.path).collect();
        assert_eq!(routes().len(), 42);
        assert_eq!(paths.len(), 42);
    }

    #[test]
    fn test_unknown_paths_not_found() {
        assert_eq!(resolve("/does-not-exist"), Resolution::NotFound);
        assert_eq!(resolve("/faq/"), Resolution::NotFound);
        assert_eq!(resolve(""), Resolution::NotFound);
        assert_eq!(resolve("faq"), Resolution::NotFound);
    }

    #[test]
    fn test_root_is_index() {
        let Resolution::Page(route) = resolve("/") else {
            panic!("root not routed");
        };
        assert_eq!(route.page_id, "index");
    }

    #[test]
    fn test_sidebar_paths_resolve() {
        for item in nav_groups().iter().flat_map(|g| g.items) {
            assert!(
                matches!(resolve(item.path), Resolution::Page(r) if r.page_id == item.page_id),
                "sidebar link {} does not resolve",
                item.path
            );
        }
    }

    #[test]
    fn test_footer_paths_resolve() {
        for link in footer_links().learning {
            assert_ne!(resolve(link.path), Resolution::NotFound, "{}", link.path);
        }
    }

    #[test]
    fn test_sources_have_front_matter() {
        for route in routes() {
            assert!(route.source.starts_with("---\n"), "{}", route.page_id);
        }
    }
}
