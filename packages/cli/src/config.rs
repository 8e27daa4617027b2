use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "chronicle.config.json";

/// Chronicle configuration file format.
///
/// Everything the renderer needs (portrait map, emoji overrides, masthead,
/// theme color) travels through this object; the parser and renderer
/// crates never read files or environment themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing .session files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Output directory for rendered HTML
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Site title shown in the masthead
    #[serde(default = "default_masthead")]
    pub masthead: String,

    /// Accent color, hex only
    #[serde(default = "default_theme_color")]
    pub theme_color: String,

    /// Portrait URL for names missing from `portraits`
    #[serde(default = "default_portrait")]
    pub default_portrait: String,

    /// Character name -> portrait URL
    #[serde(default)]
    pub portraits: BTreeMap<String, String>,

    /// Extra emoji shortcodes, merged over the built-in table
    #[serde(default)]
    pub emoji: BTreeMap<String, String>,
}

fn default_src_dir() -> String {
    "sessions".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_masthead() -> String {
    "Campaign Diary".to_string()
}

fn default_theme_color() -> String {
    "#3366ff".to_string()
}

fn default_portrait() -> String {
    "img/default-portrait.png".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults when no
    /// config file exists.
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the session source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    /// Get absolute path to the output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            masthead: default_masthead(),
            theme_color: default_theme_color(),
            default_portrait: default_portrait(),
            portraits: BTreeMap::new(),
            emoji: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "srcDir": "diary",
            "masthead": "The Duskmoor Company",
            "themeColor": "#8b0000",
            "portraits": { "Elora": "img/elora.png" },
            "emoji": { "ale": "X" }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "diary");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.masthead, "The Duskmoor Company");
        assert_eq!(config.theme_color, "#8b0000");
        assert_eq!(config.portraits["Elora"], "img/elora.png");
        assert_eq!(config.emoji["ale"], "X");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "sessions");
        assert_eq!(config.masthead, "Campaign Diary");
        assert!(config.portraits.is_empty());
    }
}
