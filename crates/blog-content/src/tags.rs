/// Tag and category display colors.
///
/// The registry is a small insertion-ordered table matched case-insensitively;
/// unknown names resolve to [`FALLBACK_COLOR`] and keep their own spelling as
/// display name. Categories share the same table as tags.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Pink,
    Yellow,
    Cyan,
    Purple,
}

impl TagColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TagColor::Pink => "pink",
            TagColor::Yellow => "yellow",
            TagColor::Cyan => "cyan",
            TagColor::Purple => "purple",
        }
    }
}

impl std::fmt::Display for TagColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const FALLBACK_COLOR: TagColor = TagColor::Cyan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagConfig {
    pub name: String,
    pub color: TagColor,
    pub display_name: String,
}

impl TagConfig {
    pub fn new(name: &str, color: TagColor, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            color,
            display_name: display_name.to_string(),
        }
    }
}

/// Result of a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTag {
    pub color: TagColor,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColoredTag {
    pub tag: String,
    pub color: TagColor,
}

#[derive(Debug, Clone)]
pub struct TagRegistry {
    configs: Vec<TagConfig>,
}

impl TagRegistry {
    pub fn new(configs: Vec<TagConfig>) -> Self {
        Self { configs }
    }

    /// The site's own table.
    pub fn builtin() -> Self {
        Self::new(vec![
            TagConfig::new("AI", TagColor::Pink, "AI"),
            TagConfig::new("Tech", TagColor::Cyan, "Tech"),
            TagConfig::new("Leadership", TagColor::Yellow, "Leadership"),
            TagConfig::new("Marketing", TagColor::Yellow, "Marketing"),
            TagConfig::new("Music", TagColor::Purple, "Music"),
        ])
    }

    pub fn configs(&self) -> &[TagConfig] {
        &self.configs
    }

    /// First configured entry whose name matches `name` ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&TagConfig> {
        let needle = name.to_lowercase();
        self.configs
            .iter()
            .find(|config| config.name.to_lowercase() == needle)
    }

    pub fn resolve(&self, name: &str) -> ResolvedTag {
        match self.lookup(name) {
            Some(config) => ResolvedTag {
                color: config.color,
                display_name: config.display_name.clone(),
            },
            None => ResolvedTag {
                color: FALLBACK_COLOR,
                display_name: name.to_string(),
            },
        }
    }

    pub fn category_color(&self, category: &str) -> TagColor {
        self.resolve(category).color
    }

    pub fn tag_color(&self, tag: &str) -> TagColor {
        self.resolve(tag).color
    }

    pub fn display_name(&self, tag: &str) -> String {
        self.resolve(tag).display_name
    }

    pub fn tags_with_colors(&self, tags: &[String]) -> Vec<ColoredTag> {
        tags.iter()
            .map(|tag| ColoredTag {
                tag: tag.clone(),
                color: self.tag_color(tag),
            })
            .collect()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
