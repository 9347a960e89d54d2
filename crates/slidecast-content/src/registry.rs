//! The immutable, ordered scene table.

use std::path::Path;

use slidecast_core::error::SequencerError;
use slidecast_core::scene::SceneIndex;
use tracing::info;

use crate::error::ContentError;
use crate::scene::{SceneDefinition, SceneTable};

const BUILTIN_DECK: &str = include_str!("../decks/tour.yaml");

/// Ordered scenes `0..N-1`, read-only after construction. `N >= 1`.
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    scenes: Vec<SceneDefinition>,
}

impl SceneRegistry {
    /// Builds a registry from definitions already in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Empty` for an empty list,
    /// `ContentError::NonContiguous` if an index does not match its
    /// position and `ContentError::InvalidDemo` for an unplayable demo.
    pub fn new(scenes: Vec<SceneDefinition>) -> Result<Self, ContentError> {
        if scenes.is_empty() {
            return Err(ContentError::Empty);
        }
        for (position, scene) in scenes.iter().enumerate() {
            if scene.index.get() != position {
                return Err(ContentError::NonContiguous {
                    position,
                    index: scene.index.get(),
                });
            }
            if let Some(script) = &scene.demo {
                script
                    .demo()
                    .validate()
                    .map_err(|reason| ContentError::InvalidDemo {
                        index: position,
                        reason,
                    })?;
            }
        }
        Ok(Self { scenes })
    }

    /// Parses a YAML scene table.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` for malformed YAML and any error of
    /// [`SceneRegistry::new`].
    pub fn from_yaml(source: &str) -> Result<Self, ContentError> {
        let table: SceneTable = serde_yaml::from_str(source)?;
        let scenes = table
            .scenes
            .into_iter()
            .enumerate()
            .map(|(index, record)| SceneDefinition::from_record(index, record))
            .collect();
        Self::new(scenes)
    }

    /// Reads and parses a YAML scene table from disk.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Io` if the file cannot be read and any error
    /// of [`SceneRegistry::from_yaml`].
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path)?;
        let registry = Self::from_yaml(&source)?;
        info!(path = %path.display(), scenes = registry.count(), "loaded scene table");
        Ok(registry)
    }

    /// The deck compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded table is broken, which its tests rule out.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_DECK)
    }

    /// Looks up a scene.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::OutOfRange` if `index` is not in `0..N`.
    pub fn get(&self, index: SceneIndex) -> Result<&SceneDefinition, SequencerError> {
        self.scenes
            .get(index.get())
            .ok_or(SequencerError::OutOfRange {
                index: index.get(),
                count: self.scenes.len(),
            })
    }

    /// Number of scenes.
    #[must_use]
    pub fn count(&self) -> usize {
        self.scenes.len()
    }

    /// All scenes in order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneDefinition> {
        self.scenes.iter()
    }
}
