pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, DisplayConfig, NetworkConfig};

use std::path::Path;

use crate::error::Result;
use crate::network::codes;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new config and loads the local `refnet.toml`, if any.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::new();
        config.load_local_config();
        config
    }

    /// Loads an explicitly named config file. Unlike [`Config::load`], a
    /// missing or malformed file is an error.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        io::read_config(path)
    }

    pub fn load_local_config(&mut self) {
        io::load_local(self);
    }

    /// Parses TOML content into this config, replacing both sections.
    ///
    /// # Errors
    /// Returns error if the content is not valid config TOML.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        let parsed = io::parse_config(content, Path::new("<inline>"))?;
        self.network = parsed.network;
        self.display = parsed.display;
        Ok(())
    }
}

impl NetworkConfig {
    /// Root codes after the same normalization applied to record codes.
    /// Entries that do not normalize are dropped.
    #[must_use]
    pub fn normalized_root_codes(&self) -> Vec<String> {
        self.root_codes
            .iter()
            .filter_map(|c| codes::normalize_code(c))
            .collect()
    }
}
