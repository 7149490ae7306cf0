//! RON-backed configuration.

pub mod layout;
pub mod loader;
pub mod settings;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use layout::GuiLayout;
pub use loader::{LAYOUT_EXTENSION, RonLoader};
pub use settings::GuiSettings;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

pub(crate) fn from_ron_str<T: DeserializeOwned>(source: &str) -> Result<T, LayoutError> {
    Ok(ron::de::from_str(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let result = GuiLayout::from_ron("(structure: [\"###\"");

        assert!(matches!(result, Err(LayoutError::Ron(_))));
    }
}
