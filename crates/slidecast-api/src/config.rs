//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use slidecast_narration::{ProcessNarratorConfig, VoicePolicy};
use slidecast_sequencer::SequencerConfig;

use crate::error::AppError;

/// Which narrator voices the scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarratorKind {
    /// Simulated speech paced by word count, with on-screen captions.
    Paced,
    /// A text-to-speech program such as `espeak-ng`.
    Process,
    /// No speech at all.
    Silent,
}

impl FromStr for NarratorKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paced" => Ok(Self::Paced),
            "process" | "tts" => Ok(Self::Process),
            "silent" | "none" => Ok(Self::Silent),
            other => Err(AppError::Config(format!("unknown narrator `{other}`"))),
        }
    }
}

/// Everything the `slidecast` binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Scene table to load instead of the built-in deck.
    pub scenes: Option<PathBuf>,
    /// Timing of the presentation.
    pub sequencer: SequencerConfig,
    /// Narrator selection.
    pub narrator: NarratorKind,
    /// Speech program for [`NarratorKind::Process`].
    pub tts_program: String,
    /// Voice names to prefer, in order.
    pub preferred_voices: Vec<String>,
    /// Language prefix used when no preferred voice is installed.
    pub voice_language: Option<String>,
    /// Whether to read navigation keys from stdin.
    pub keyboard: bool,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = SequencerConfig::default();
        let settle_timeout = parse_millis(&lookup, "SLIDECAST_SETTLE_TIMEOUT_MS")?
            .unwrap_or(defaults.settle_timeout);
        if settle_timeout.is_zero() {
            return Err(AppError::Config(
                "SLIDECAST_SETTLE_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        let sequencer = SequencerConfig {
            autoplay: parse(&lookup, "SLIDECAST_AUTOPLAY")?.unwrap_or(defaults.autoplay),
            word_duration: parse_millis(&lookup, "SLIDECAST_WORD_MS")?
                .unwrap_or(defaults.word_duration),
            transition_delay: parse_millis(&lookup, "SLIDECAST_TRANSITION_MS")?
                .unwrap_or(defaults.transition_delay),
            settle_timeout,
        };

        let narrator = match lookup("SLIDECAST_NARRATOR") {
            Some(value) => value.parse()?,
            None => NarratorKind::Paced,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse(&lookup, "PORT")?.unwrap_or(3000),
            scenes: lookup("SLIDECAST_SCENES").map(PathBuf::from),
            sequencer,
            narrator,
            tts_program: lookup("SLIDECAST_TTS_PROGRAM").unwrap_or_else(|| "espeak-ng".to_owned()),
            preferred_voices: lookup("SLIDECAST_VOICES")
                .map(|names| {
                    names
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            voice_language: match lookup("SLIDECAST_VOICE_LANG") {
                Some(language) if language.trim().is_empty() => None,
                Some(language) => Some(language.trim().to_owned()),
                None => Some("en".to_owned()),
            },
            keyboard: parse(&lookup, "SLIDECAST_KEYBOARD")?.unwrap_or(true),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid address: {e}")))
    }

    /// Settings for the speech-program narrator.
    #[must_use]
    pub fn narrator_config(&self) -> ProcessNarratorConfig {
        ProcessNarratorConfig {
            program: self.tts_program.clone(),
            voice_policy: VoicePolicy {
                preferred_names: self.preferred_voices.clone(),
                language_prefix: self.voice_language.clone(),
            },
            ..ProcessNarratorConfig::default()
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("invalid {key} `{value}`: {e}")))
        })
        .transpose()
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Duration>, AppError> {
    Ok(parse::<u64>(lookup, key)?.map(Duration::from_millis))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        // Act
        let config = config_from(&[]).unwrap();

        // Assert
        assert_eq!(config.port, 3000);
        assert_eq!(config.narrator, NarratorKind::Paced);
        assert!(config.sequencer.autoplay);
        assert_eq!(config.sequencer.word_duration, Duration::from_millis(150));
        assert_eq!(config.sequencer.transition_delay, Duration::from_millis(700));
        assert_eq!(config.voice_language.as_deref(), Some("en"));
        assert!(config.scenes.is_none());
        assert!(config.keyboard);
    }

    #[test]
    fn test_overrides_are_applied() {
        // Arrange
        let vars = [
            ("PORT", "8080"),
            ("SLIDECAST_AUTOPLAY", "false"),
            ("SLIDECAST_WORD_MS", "200"),
            ("SLIDECAST_NARRATOR", "process"),
            ("SLIDECAST_VOICES", "Samantha, Karen ,"),
            ("SLIDECAST_VOICE_LANG", ""),
            ("SLIDECAST_SCENES", "/tmp/deck.yaml"),
        ];

        // Act
        let config = config_from(&vars).unwrap();

        // Assert
        assert_eq!(config.port, 8080);
        assert!(!config.sequencer.autoplay);
        assert_eq!(config.sequencer.word_duration, Duration::from_millis(200));
        assert_eq!(config.narrator, NarratorKind::Process);
        assert_eq!(config.preferred_voices, vec!["Samantha", "Karen"]);
        assert!(config.voice_language.is_none());
        assert_eq!(config.scenes, Some(PathBuf::from("/tmp/deck.yaml")));
        let narrator = config.narrator_config();
        assert_eq!(narrator.program, "espeak-ng");
        assert_eq!(narrator.voice_policy.preferred_names.len(), 2);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("SLIDECAST_NARRATOR", "robot")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("SLIDECAST_SETTLE_TIMEOUT_MS", "0")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_bind_addr_combines_host_and_port() {
        // Arrange
        let config = config_from(&[("HOST", "127.0.0.1"), ("PORT", "4000")]).unwrap();

        // Act
        let addr = config.bind_addr().unwrap();

        // Assert
        assert_eq!(addr.port(), 4000);
        assert!(addr.ip().is_loopback());
    }
}
