//! Static metadata for the servers this tool knows how to describe.
//!
//! The table is compiled in; it is never loaded from disk. Servers that come
//! from registry fragments but have no entry here get [`ServerMetadata::UNKNOWN`].

use std::fmt;

/// Grouping used when listing the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Documentation,
    ProblemSolving,
    CodeAnalysis,
    CodeModification,
    Testing,
    UiGeneration,
    Productivity,
    KnowledgeManagement,
    Other,
}

impl Category {
    /// Listing order.
    pub const ALL: [Self; 9] = [
        Self::Documentation,
        Self::ProblemSolving,
        Self::CodeAnalysis,
        Self::CodeModification,
        Self::Testing,
        Self::UiGeneration,
        Self::Productivity,
        Self::KnowledgeManagement,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::ProblemSolving => "problem-solving",
            Self::CodeAnalysis => "code-analysis",
            Self::CodeModification => "code-modification",
            Self::Testing => "testing",
            Self::UiGeneration => "ui-generation",
            Self::Productivity => "productivity",
            Self::KnowledgeManagement => "knowledge-management",
            Self::Other => "other",
        }
    }

    /// Heading shown above the group, e.g. `Problem Solving`.
    pub fn title(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect::<String>()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive, never-persisted information about a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerMetadata {
    pub category: Category,
    pub requires_api_key: bool,
    pub api_key_env: Option<&'static str>,
    pub description: &'static str,
    pub rate_limit: Option<&'static str>,
    pub note: Option<&'static str>,
    pub requires_docker: bool,
}

impl ServerMetadata {
    pub const UNKNOWN: Self = Self {
        category: Category::Other,
        requires_api_key: false,
        api_key_env: None,
        description: "No description",
        rate_limit: None,
        note: None,
        requires_docker: false,
    };

    /// Variable the user is told to export. Falls back to `API_KEY` when the
    /// table does not name one.
    pub fn api_key_var(&self) -> Option<&'static str> {
        self.requires_api_key.then(|| self.api_key_env.unwrap_or("API_KEY"))
    }
}

const fn plain(category: Category, description: &'static str) -> ServerMetadata {
    ServerMetadata { category, description, ..ServerMetadata::UNKNOWN }
}

const fn keyed(category: Category, env: &'static str, description: &'static str) -> ServerMetadata {
    ServerMetadata {
        category,
        requires_api_key: true,
        api_key_env: Some(env),
        description,
        ..ServerMetadata::UNKNOWN
    }
}

static KNOWN_SERVERS: &[(&str, ServerMetadata)] = &[
    (
        "context7",
        keyed(
            Category::Documentation,
            "CONTEXT7_API_KEY",
            "Official library documentation and code examples (optional API key for higher rate limits)",
        ),
    ),
    (
        "sequential-thinking",
        plain(Category::ProblemSolving, "Multi-step problem solving and systematic analysis"),
    ),
    (
        "magic",
        keyed(
            Category::UiGeneration,
            "TWENTYFIRST_API_KEY",
            "Modern UI component generation and design systems",
        ),
    ),
    ("playwright", plain(Category::Testing, "Cross-browser E2E testing and automation")),
    ("serena", plain(Category::CodeAnalysis, "Semantic code analysis and intelligent editing")),
    (
        "morphllm-fast-apply",
        keyed(
            Category::CodeModification,
            "MORPH_API_KEY",
            "Fast Apply capability for context-aware code modifications",
        ),
    ),
    (
        "notion",
        ServerMetadata {
            rate_limit: Some("100 operations/hour"),
            ..keyed(
                Category::Productivity,
                "NOTION_TOKEN",
                "Rate-limited Notion integration (100 ops/hour)",
            )
        },
    ),
    (
        "archon",
        ServerMetadata {
            requires_docker: true,
            note: Some("Requires Docker running with Archon services (docker compose up)"),
            ..plain(
                Category::KnowledgeManagement,
                "AI-powered knowledge base and task management platform",
            )
        },
    ),
    (
        "selenium",
        ServerMetadata {
            note: Some("Requires browser drivers (ChromeDriver, GeckoDriver, etc.)"),
            ..plain(Category::Testing, "Cross-browser web automation with Selenium WebDriver")
        },
    ),
];

/// Metadata for `name`, or the `other` defaults when the table has no entry.
pub fn lookup(name: &str) -> &'static ServerMetadata {
    KNOWN_SERVERS
        .iter()
        .find(|(known, _)| *known == name)
        .map_or(&ServerMetadata::UNKNOWN, |(_, meta)| meta)
}
