use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::params::{ImpactParameters, ImpactRequest};

/// Named impactor stored as YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: Option<String>,
    pub impact: ImpactRequest,
}

impl Preset {
    pub fn parameters(&self) -> Result<ImpactParameters, EngineError> {
        ImpactParameters::try_from(&self.impact)
    }
}

pub struct PresetLoader {
    base_dir: PathBuf,
}

impl PresetLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Preset> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preset file {}", path.display()))?;
        let preset: Preset = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(preset)
    }

    /// Every `*.yaml` preset in the base directory, ordered by file name.
    pub fn load_all(&self) -> Result<Vec<Preset>> {
        let entries = fs::read_dir(&self.base_dir).with_context(|| {
            format!("Failed to list preset directory {}", self.base_dir.display())
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                if let Some(name) = path.file_name() {
                    files.push(PathBuf::from(name));
                }
            }
        }
        files.sort();

        files.iter().map(|file| self.load(file)).collect()
    }

    /// Looks a preset up by file stem (`meteor_crater`) or display name.
    pub fn find(&self, key: &str) -> Result<Preset> {
        for extension in ["yaml", "yml"] {
            let file = format!("{key}.{extension}");
            if self.base_dir.join(&file).is_file() {
                return self.load(file);
            }
        }
        self.load_all()?
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(key))
            .with_context(|| format!("No preset named '{key}' in {}", self.base_dir.display()))
    }
}
