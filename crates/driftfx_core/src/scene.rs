//! Scene serialization
//!
//! A [`StageScene`] is a RON file describing which effects to mount.
//! Effect templates are plain data; [`EffectTemplate::to_config`] turns
//! them into runtime configs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::effect::{EffectConfig, EffectFlags, EffectKind, Intensity};

/// Serializable description of one effect
///
/// Mirrors [`EffectConfig`] with the behavior flags unpacked into named
/// booleans so scene files stay readable and diffable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub intensity: Intensity,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub connections: bool,
    #[serde(default)]
    pub trails: bool,
    #[serde(default)]
    pub glow: bool,
    /// Stop automatically after this many seconds
    #[serde(default)]
    pub duration: Option<f32>,
    /// Seed override; the kind's default seed when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EffectTemplate {
    /// Template with a kind's default settings
    pub fn for_kind(kind: EffectKind) -> Self {
        Self::from_config(&EffectConfig::for_kind(kind))
    }

    /// Unpack a runtime config into a template
    pub fn from_config(config: &EffectConfig) -> Self {
        Self {
            kind: config.kind,
            intensity: config.intensity,
            interactive: config.flags.contains(EffectFlags::INTERACTIVE),
            connections: config.flags.contains(EffectFlags::CONNECTIONS),
            trails: config.flags.contains(EffectFlags::TRAILS),
            glow: config.flags.contains(EffectFlags::GLOW),
            duration: config.duration,
            seed: Some(config.seed),
        }
    }

    /// Build the runtime config this template describes
    pub fn to_config(&self) -> EffectConfig {
        let mut flags = EffectFlags::NONE;
        flags.set(EffectFlags::INTERACTIVE, self.interactive);
        flags.set(EffectFlags::CONNECTIONS, self.connections);
        flags.set(EffectFlags::TRAILS, self.trails);
        flags.set(EffectFlags::GLOW, self.glow);

        let mut config = EffectConfig::for_kind(self.kind);
        config.intensity = self.intensity;
        config.flags = flags;
        config.duration = self.duration;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}

/// A loadable/saveable set of effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageScene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Effects to mount, in order
    pub effects: Vec<EffectTemplate>,
}

impl StageScene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add an effect template to this scene
    pub fn add_effect(&mut self, effect: EffectTemplate) {
        self.effects.push(effect);
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
