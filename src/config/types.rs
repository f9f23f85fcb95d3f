use serde::{Deserialize, Serialize};

/// Top-level `refnet.toml` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Codes conventionally held by the top of the program, in priority order.
    #[serde(default = "default_root_codes")]
    pub root_codes: Vec<String>,
    /// Placeholder ids are `-(virtual_id_base + code)`.
    #[serde(default = "default_virtual_id_base")]
    pub virtual_id_base: u32,
    #[serde(default = "default_virtual_label")]
    pub virtual_label: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            root_codes: default_root_codes(),
            virtual_id_base: default_virtual_id_base(),
            virtual_label: default_virtual_label(),
        }
    }
}

fn default_root_codes() -> Vec<String> { vec!["00".to_string(), "01".to_string()] }
fn default_virtual_id_base() -> u32 { 1_000_000 }
fn default_virtual_label() -> String { "cluster".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Deepest level rendered in text output; `None` renders everything.
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub show_contacts: bool,
    #[serde(default = "default_show_metrics")]
    pub show_metrics: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_contacts: false,
            show_metrics: default_show_metrics(),
        }
    }
}

fn default_show_metrics() -> bool { true }
