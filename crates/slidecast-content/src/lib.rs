//! Slidecast — presentation content.
//!
//! Scenes are authored as a YAML table (see `decks/tour.yaml` for the
//! built-in deck) and loaded once into an immutable [`SceneRegistry`].

pub mod error;
pub mod registry;
pub mod scene;

pub use error::ContentError;
pub use registry::SceneRegistry;
pub use scene::SceneDefinition;
