use std::fs;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::engine::curriculum::LessonStatus;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub tiers: TierClasses,
    #[serde(default = "default_summary_class")]
    pub summary: String,
    #[serde(default = "default_error_class")]
    pub error: String,
}

/// CSS classes for dashboard cards, one set per lesson status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierClasses {
    pub locked: String,
    pub available: String,
    pub completed: String,
}

fn default_summary_class() -> String {
    "summary-card".to_string()
}

fn default_error_class() -> String {
    "error-card".to_string()
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        let user_theme_path = Config::config_dir().join("themes").join(&filename);
        if let Ok(content) = fs::read_to_string(&user_theme_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(e) => tracing::warn!(path = %user_theme_path.display(), error = %e, "Ignoring invalid theme"),
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }

    pub fn tier_class(&self, status: LessonStatus) -> &str {
        match status {
            LessonStatus::Locked => &self.tiers.locked,
            LessonStatus::Available => &self.tiers.available,
            LessonStatus::Completed => &self.tiers.completed,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("slate").unwrap_or_else(|| Self {
            name: "default".to_string(),
            tiers: TierClasses::default(),
            summary: default_summary_class(),
            error: default_error_class(),
        })
    }
}

impl Default for TierClasses {
    fn default() -> Self {
        Self {
            locked: "card tier-locked".to_string(),
            available: "card tier-available".to_string(),
            completed: "card tier-completed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&"slate".to_string()));
        for name in names {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to parse");
        }
    }

    #[test]
    fn test_unknown_theme_is_none() {
        assert!(Theme::load("does-not-exist").is_none());
    }

    #[test]
    fn test_tier_classes_are_distinct() {
        let theme = Theme::default();
        let locked = theme.tier_class(LessonStatus::Locked);
        let available = theme.tier_class(LessonStatus::Available);
        let completed = theme.tier_class(LessonStatus::Completed);
        assert_ne!(locked, available);
        assert_ne!(available, completed);
        assert_ne!(locked, completed);
    }
}
