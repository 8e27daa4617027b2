use std::collections::BTreeMap;

/// Case-insensitive name -> portrait URL lookup, resolved from project
/// configuration. Unknown and empty names fall back to the default
/// portrait.
#[derive(Debug, Clone)]
pub struct PortraitBook {
    map: BTreeMap<String, String>,
    default_url: String,
}

impl PortraitBook {
    pub fn new(portraits: &BTreeMap<String, String>, default_url: impl Into<String>) -> Self {
        let map = portraits
            .iter()
            .map(|(name, url)| (name.trim().to_lowercase(), url.clone()))
            .collect();
        Self {
            map,
            default_url: default_url.into(),
        }
    }

    pub fn lookup(&self, name: &str) -> &str {
        self.map
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> PortraitBook {
        let mut portraits = BTreeMap::new();
        portraits.insert("Elora".to_string(), "img/elora.png".to_string());
        portraits.insert("Brum".to_string(), "img/brum.png".to_string());
        PortraitBook::new(&portraits, "img/default.png")
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let book = book();
        assert_eq!(book.lookup("elora"), "img/elora.png");
        assert_eq!(book.lookup("BRUM"), "img/brum.png");
        assert_eq!(book.lookup(" Elora "), "img/elora.png");
    }

    #[test]
    fn test_lookup_falls_back() {
        let book = book();
        assert_eq!(book.lookup("Stranger"), "img/default.png");
        assert_eq!(book.lookup(""), "img/default.png");
    }
}
