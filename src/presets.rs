use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ConfigurePreset {
    name: String,
    #[serde(default)]
    hidden: bool,
}

impl ConfigurePreset {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

/// The `configurePresets` section of a `CMakePresets.json` file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PresetFile {
    #[serde(rename = "configurePresets", default)]
    configure_presets: Vec<ConfigurePreset>,
}

impl PresetFile {
    pub(crate) fn load<T>(path: T) -> Result<Self>
    where
        T: Into<PathBuf>,
    {
        let path = path.into();

        let path = if path.ends_with("CMakePresets.json") {
            path
        } else {
            path.join("CMakePresets.json")
        };

        let content = std::fs::read_to_string(&path).map_err(|source| LaunchError::PresetFile {
            path: path.clone(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Looks up a configure preset by name. Hidden presets cannot be selected
    /// directly, matching CMake's own behavior.
    pub(crate) fn find(&self, name: &str) -> Option<&ConfigurePreset> {
        self.configure_presets
            .iter()
            .find(|p| p.name == name && !p.hidden)
    }
}
