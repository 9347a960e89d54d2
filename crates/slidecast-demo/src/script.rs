//! Demo references stored in the scene table.

use serde::{Deserialize, Serialize};

use crate::routines::{Counters, Demo, Exchange, Pulse, Reveal, Spotlight};

/// The demo attached to a scene, tagged by `kind` in the scene table.
///
/// ```yaml
/// demo:
///   kind: reveal
///   group: steps
///   count: 4
///   stagger_ms: 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemoScript {
    /// See [`Spotlight`].
    Spotlight(Spotlight),
    /// See [`Exchange`].
    Exchange(Exchange),
    /// See [`Pulse`].
    Pulse(Pulse),
    /// See [`Reveal`].
    Reveal(Reveal),
    /// See [`Counters`].
    Counters(Counters),
}

impl DemoScript {
    /// The routine that plays this script.
    #[must_use]
    pub fn demo(&self) -> &dyn Demo {
        match self {
            Self::Spotlight(demo) => demo,
            Self::Exchange(demo) => demo,
            Self::Pulse(demo) => demo,
            Self::Reveal(demo) => demo,
            Self::Counters(demo) => demo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Animation;

    #[test]
    fn test_script_deserializes_by_kind() {
        let json = serde_json::json!({
            "kind": "pulse",
            "element": "price-line",
            "animation": "up",
            "duration_ms": 3000
        });

        let script: DemoScript = serde_json::from_value(json).unwrap();

        assert_eq!(
            script,
            DemoScript::Pulse(Pulse {
                element: "price-line".into(),
                lead_in_ms: 0,
                animation: Animation::Up,
                duration_ms: 3000,
            })
        );
        assert_eq!(script.demo().name(), "pulse");
    }

    #[test]
    fn test_counters_default_frame_interval() {
        let json = serde_json::json!({
            "kind": "counters",
            "counters": [
                { "element": "success", "target": 95.0, "format": "percent", "duration_ms": 1000 }
            ]
        });

        let script: DemoScript = serde_json::from_value(json).unwrap();

        match script {
            DemoScript::Counters(counters) => assert_eq!(counters.frame_ms, 50),
            other => panic!("expected Counters, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = serde_json::json!({ "kind": "fireworks" });

        assert!(serde_json::from_value::<DemoScript>(json).is_err());
    }
}
