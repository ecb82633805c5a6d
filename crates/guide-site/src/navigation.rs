//! Sidebar and footer navigation data.

use serde::Serialize;

/// Sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub page_id: &'static str,
}

/// Titled group of sidebar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

/// Footer link to a page of this site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InternalLink {
    pub label: &'static str,
    pub path: &'static str,
}

/// Footer link to another site, opened in a new tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Footer link columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterLinks {
    pub learning: &'static [InternalLink],
    pub official: &'static [ExternalLink],
    pub community: &'static [ExternalLink],
}

/// Navigation payload served to clients.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavigationData {
    pub groups: &'static [NavGroup],
    pub footer: &'static FooterLinks,
}

const fn item(label: &'static str, path: &'static str, page_id: &'static str) -> NavItem {
    NavItem {
        label,
        path,
        page_id,
    }
}

static GROUPS: &[NavGroup] = &[
    NavGroup {
        title: "快速开始",
        items: &[
            item("概览", "/", "index"),
            item("环境准备", "/getting-started", "getting-started"),
            item("核心概念", "/core-concepts", "core-concepts"),
        ],
    },
    NavGroup {
        title: "核心功能",
        items: &[
            item("Embedding 模型", "/embedding-models", "embedding-models"),
            item("Prompt 模板", "/prompt-templates", "prompt-templates"),
            item("输出解析", "/output-parsers", "output-parsers"),
            item("Token 流式", "/token-stream", "token-stream"),
            item("Agent 深度解析", "/agent-deep-dive", "agent-deep-dive"),
            item("模型提供商", "/model-providers", "model-providers"),
            item("函数调用", "/function-calling-deep", "function-calling-deep"),
            item("参数验证", "/constraint-validation", "constraint-validation"),
            item("输出守护", "/output-guard", "output-guard"),
            item("高级特性", "/advanced-features", "advanced-features"),
            item("多模态", "/multimodal-full", "multimodal-full"),
        ],
    },
    NavGroup {
        title: "RAG 完整指南",
        items: &[
            item("RAG 简介", "/rag-intro", "rag-intro"),
            item("RAG 环境搭建", "/rag-setup", "rag-setup"),
            item("RAG 实现", "/rag-implementation", "rag-implementation"),
            item("文档分割", "/document-splitting", "document-splitting"),
            item("RAG 高级", "/rag-advanced", "rag-advanced"),
            item("RAG 完整指南", "/rag-complete", "rag-complete"),
        ],
    },
    NavGroup {
        title: "项目实战",
        items: &[
            item("聊天机器人", "/project-chatbot", "project-chatbot"),
            item("AI助手", "/project-ai-assistant", "project-ai-assistant"),
            item("RAG知识库", "/project-rag-kb", "project-rag-kb"),
            item("综合实战", "/practice", "practice"),
        ],
    },
    NavGroup {
        title: "最佳实践",
        items: &[
            item("最佳实践", "/best-practices", "best-practices"),
            item("测试策略", "/testing-strategies", "testing-strategies"),
            item("性能优化", "/performance-tuning", "performance-tuning"),
            item("性能基准测试", "/performance-benchmark", "performance-benchmark"),
            item("深度解析", "/deep-dive", "deep-dive"),
            item("错误处理", "/error-handling", "error-handling"),
            item("内容审核", "/moderation-safety", "moderation-safety"),
            item("安全深度分析", "/security-deep-dive", "security-deep-dive"),
            item("故障排查", "/troubleshooting", "troubleshooting"),
        ],
    },
    NavGroup {
        title: "面试准备",
        items: &[item("面试准备", "/interview-prep", "interview-prep")],
    },
    NavGroup {
        title: "其他",
        items: &[
            item("向量搜索", "/search", "search"),
            item("监听器", "/chat-listeners", "chat-listeners"),
            item("常见问题", "/faq", "faq"),
            item("成本优化", "/cost-optimization", "cost-optimization"),
            item("生产环境配置", "/production-config", "production-config"),
            item("部署上线", "/deployment", "deployment"),
            item("框架集成", "/integrations", "integrations"),
            item("实战示例", "/examples", "examples"),
        ],
    },
];

static FOOTER: FooterLinks = FooterLinks {
    learning: &[
        InternalLink { label: "快速入门", path: "/getting-started" },
        InternalLink { label: "核心概念", path: "/core-concepts" },
        InternalLink { label: "Embedding模型", path: "/embedding-models" },
        InternalLink { label: "Prompt模板", path: "/prompt-templates" },
        InternalLink { label: "输出解析", path: "/output-parsers" },
        InternalLink { label: "模型提供商", path: "/model-providers" },
        InternalLink { label: "Function Calling", path: "/function-calling-deep" },
        InternalLink { label: "高级特性", path: "/advanced-features" },
        InternalLink { label: "最佳实践", path: "/best-practices" },
        InternalLink { label: "实战示例", path: "/examples" },
        InternalLink { label: "框架集成", path: "/integrations" },
        InternalLink { label: "问题排查", path: "/troubleshooting" },
    ],
    official: &[
        ExternalLink { label: "官方文档", href: "https://docs.langchain4j.dev" },
        ExternalLink { label: "GitHub", href: "https://github.com/langchain4j/langchain4j" },
        ExternalLink {
            label: "示例代码",
            href: "https://github.com/langchain4j/langchain4j-examples",
        },
    ],
    community: &[
        ExternalLink { label: "Discord", href: "https://discord.gg/JzF7hqFKrE" },
        ExternalLink { label: "Twitter", href: "https://twitter.com/langchain4j" },
        ExternalLink {
            label: "Stack Overflow",
            href: "https://stackoverflow.com/questions/tagged/langchain4j",
        },
    ],
};

/// Sidebar groups in display order.
#[must_use]
pub fn nav_groups() -> &'static [NavGroup] {
    GROUPS
}

/// Footer link columns.
#[must_use]
pub fn footer_links() -> &'static FooterLinks {
    &FOOTER
}

/// Sidebar groups and footer links together.
#[must_use]
pub fn navigation() -> NavigationData {
    NavigationData {
        groups: GROUPS,
        footer: &FOOTER,
    }
}
