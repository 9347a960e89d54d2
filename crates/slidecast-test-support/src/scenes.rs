//! Scene fixtures.

use std::time::Duration;

use slidecast_content::{SceneDefinition, SceneRegistry};
use slidecast_core::scene::SceneIndex;

/// A scene without a demo.
#[must_use]
pub fn scene(index: usize, narration: &str, minimum_ms: u64) -> SceneDefinition {
    SceneDefinition {
        index: SceneIndex(index),
        title: format!("Scene {index}"),
        narration: narration.to_owned(),
        demo: None,
        minimum_duration: Duration::from_millis(minimum_ms),
    }
}

/// A registry of demo-less scenes with the given narrations and minimum
/// durations in milliseconds.
///
/// # Panics
///
/// Panics if `scenes` is empty.
#[must_use]
pub fn registry(scenes: &[(&str, u64)]) -> SceneRegistry {
    let definitions = scenes
        .iter()
        .enumerate()
        .map(|(index, (narration, minimum_ms))| scene(index, narration, *minimum_ms))
        .collect();
    SceneRegistry::new(definitions).expect("test registry must not be empty")
}
