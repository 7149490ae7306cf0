use bevy::prelude::*;
use serde::Deserialize;

use super::LayoutError;

fn default_commit_delay_ticks() -> u64 {
    1
}

fn default_max_stack() -> u16 {
    64
}

/// Runtime tuning loaded from RON.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuiSettings {
    /// Ticks between a virtual slot interaction and its commit.
    #[serde(default = "default_commit_delay_ticks")]
    pub commit_delay_ticks: u64,
    /// Stack size applied to the items of layouts loaded through the runtime.
    #[serde(default = "default_max_stack")]
    pub default_max_stack: u16,
    #[serde(default)]
    pub log_interactions: bool,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            commit_delay_ticks: default_commit_delay_ticks(),
            default_max_stack: default_max_stack(),
            log_interactions: false,
        }
    }
}

impl GuiSettings {
    pub fn from_ron(source: &str) -> Result<Self, LayoutError> {
        super::from_ron_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_struct_uses_defaults() {
        assert_eq!(GuiSettings::from_ron("()").unwrap(), GuiSettings::default());
    }

    #[test]
    fn fields_override_defaults() {
        let settings = GuiSettings::from_ron("(commit_delay_ticks: 3, log_interactions: true)").unwrap();

        assert_eq!(settings.commit_delay_ticks, 3);
        assert_eq!(settings.default_max_stack, 64);
        assert!(settings.log_interactions);
    }
}
