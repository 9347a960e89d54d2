//! Voice discovery and selection.

/// A voice offered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Display name, also passed to the engine to select the voice.
    pub name: String,
    /// BCP 47 style language tag, e.g. `en-gb`.
    pub language: String,
}

impl Voice {
    /// Creates a voice.
    #[must_use]
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }
}

/// Deterministic voice selection policy.
///
/// Given the same voice list the same voice is always chosen: the first
/// preferred name (in preference order) contained in a voice name, else the
/// first voice whose language starts with the language prefix, else the
/// first voice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoicePolicy {
    /// Name fragments in order of preference, matched case-insensitively.
    pub preferred_names: Vec<String>,
    /// Language prefix such as `en`.
    pub language_prefix: Option<String>,
}

impl VoicePolicy {
    /// Picks a voice from `voices`.
    #[must_use]
    pub fn select<'a>(&self, voices: &'a [Voice]) -> Option<&'a Voice> {
        for preferred in &self.preferred_names {
            let preferred = preferred.to_lowercase();
            if let Some(voice) = voices
                .iter()
                .find(|v| v.name.to_lowercase().contains(&preferred))
            {
                return Some(voice);
            }
        }

        if let Some(prefix) = &self.language_prefix {
            let prefix = prefix.to_lowercase();
            if let Some(voice) = voices
                .iter()
                .find(|v| v.language.to_lowercase().starts_with(&prefix))
            {
                return Some(voice);
            }
        }

        voices.first()
    }
}

/// Parses the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File          Other Languages
///  5  en-gb           --/M      English_(Great_Britain) gmw/en   (en 2)
/// ```
///
/// Lines that do not have at least the first five columns are skipped.
#[must_use]
pub fn parse_espeak_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_priority, language, _gender, name, _file, ..] => {
                    Some(Voice::new(*name, *language))
                }
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("Afrikaans", "af"),
            Voice::new("English_(America)", "en-us"),
            Voice::new("English_(Great_Britain)", "en-gb"),
            Voice::new("Samantha", "en-us"),
        ]
    }

    #[test]
    fn test_preferred_names_win_in_preference_order() {
        let policy = VoicePolicy {
            preferred_names: vec!["zira".into(), "samantha".into(), "britain".into()],
            language_prefix: Some("en".into()),
        };

        let voices = voices();
        let chosen = policy.select(&voices).unwrap();

        assert_eq!(chosen.name, "Samantha");
    }

    #[test]
    fn test_language_prefix_used_when_no_name_matches() {
        let policy = VoicePolicy {
            preferred_names: vec!["victoria".into()],
            language_prefix: Some("en-GB".into()),
        };

        let voices = voices();
        let chosen = policy.select(&voices).unwrap();

        assert_eq!(chosen.name, "English_(Great_Britain)");
    }

    #[test]
    fn test_falls_back_to_first_voice() {
        let policy = VoicePolicy {
            preferred_names: Vec::new(),
            language_prefix: Some("fr".into()),
        };

        let voices = voices();

        assert_eq!(policy.select(&voices).unwrap().name, "Afrikaans");
        assert!(policy.select(&[]).is_none());
    }

    #[test]
    fn test_parse_espeak_voice_table() {
        let listing = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 2  en-gb           --/M      English_(Great_Britain) gmw/en               (en 2)
 5  en-us           --/M      English_(America)  gmw/en-US            (en 3)
garbage
";

        let voices = parse_espeak_voices(listing);

        assert_eq!(
            voices,
            vec![
                Voice::new("Afrikaans", "af"),
                Voice::new("English_(Great_Britain)", "en-gb"),
                Voice::new("English_(America)", "en-us"),
            ]
        );
    }
}
