//! Page-level delivery configuration.

use serde::{Deserialize, Serialize};

/// Delivery hints a page declares to its host.
///
/// Serialized with camel-cased keys, e.g. `{"disableClientScript": true}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    /// Serve the page without attaching or downloading any client script.
    /// The initial response must carry all of the content.
    #[serde(default)]
    pub disable_client_script: bool,
}

impl PageConfig {
    /// Configuration for pages that are pure markup.
    pub const STATIC: PageConfig = PageConfig {
        disable_client_script: true,
    };

    /// Whether the host may attach client script to this page.
    pub const fn hydrate(&self) -> bool {
        !self.disable_client_script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&PageConfig::STATIC).unwrap();
        assert_eq!(json, r#"{"disableClientScript":true}"#);
    }

    #[test]
    fn defaults_to_hydrated() {
        let config: PageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert!(config.hydrate());
        assert!(!PageConfig::STATIC.hydrate());
    }

    #[test]
    fn rejects_unknown_options() {
        let result = serde_json::from_str::<PageConfig>(r#"{"runtimeJs":false}"#);
        assert!(result.is_err());
    }
}
