use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed content types a digest curates one item for.
///
/// Declaration order is the canonical processing order. Earlier categories
/// get first claim on titles and topics during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    News,
    Discourse,
    ModelRelease,
    ToolUpdate,
    ProductLaunch,
    Paper,
    Funding,
    TrendingRepo,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::News,
        Category::Discourse,
        Category::ModelRelease,
        Category::ToolUpdate,
        Category::ProductLaunch,
        Category::Paper,
        Category::Funding,
        Category::TrendingRepo,
    ];

    /// Categories that may share a topic with other categories on the same day.
    pub const TOPIC_OVERLAP: [Category; 3] =
        [Category::News, Category::Discourse, Category::ToolUpdate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Discourse => "discourse",
            Category::ModelRelease => "model-release",
            Category::ToolUpdate => "tool-update",
            Category::ProductLaunch => "product-launch",
            Category::Paper => "paper",
            Category::Funding => "funding",
            Category::TrendingRepo => "trending-repo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::News => "AI News",
            Category::Discourse => "AI Discourse",
            Category::ModelRelease => "Model Release",
            Category::ToolUpdate => "AI Tool",
            Category::ProductLaunch => "Product Hunt",
            Category::Paper => "AI Paper",
            Category::Funding => "AI Funding",
            Category::TrendingRepo => "GitHub Repo",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Category::News => "What happened today",
            Category::Discourse => "What people are debating",
            Category::ModelRelease => "What you can try",
            Category::ToolUpdate => "What you can use",
            Category::ProductLaunch => "What's launching",
            Category::Paper => "What's being discovered",
            Category::Funding => "Where money flows",
            Category::TrendingRepo => "What to explore",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
