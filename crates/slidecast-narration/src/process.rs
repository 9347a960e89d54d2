//! Narration through an external speech program.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::NarratorError;
use crate::narrator::{Narrator, UtteranceSlot};
use crate::voice::{Voice, VoicePolicy, parse_espeak_voices};

/// Speaking style relative to the engine's defaults (1.0 = unchanged).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechProfile {
    /// Speaking speed multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Volume multiplier.
    pub volume: f32,
}

impl Default for SpeechProfile {
    fn default() -> Self {
        Self {
            rate: 0.85,
            pitch: 1.1,
            volume: 0.95,
        }
    }
}

impl SpeechProfile {
    /// Command-line flags understood by espeak-ng compatible engines.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn espeak_args(&self) -> Vec<String> {
        let words_per_minute = (175.0 * self.rate).round().max(80.0) as u32;
        let pitch = (50.0 * self.pitch).round().clamp(0.0, 99.0) as u32;
        let amplitude = (100.0 * self.volume).round().clamp(0.0, 200.0) as u32;
        vec![
            "-s".to_owned(),
            words_per_minute.to_string(),
            "-p".to_owned(),
            pitch.to_string(),
            "-a".to_owned(),
            amplitude.to_string(),
        ]
    }
}

/// Configuration for [`ProcessNarrator`].
#[derive(Debug, Clone)]
pub struct ProcessNarratorConfig {
    /// Speech program, e.g. `espeak-ng`.
    pub program: String,
    /// Speaking style.
    pub profile: SpeechProfile,
    /// How to choose among the engine's voices.
    pub voice_policy: VoicePolicy,
}

impl Default for ProcessNarratorConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_owned(),
            profile: SpeechProfile::default(),
            voice_policy: VoicePolicy {
                preferred_names: Vec::new(),
                language_prefix: Some("en".to_owned()),
            },
        }
    }
}

/// A narrator that runs one speech-program process per utterance.
///
/// Cancelling kills the process. If the program cannot be started, every
/// utterance resolves immediately and a warning is logged once.
#[derive(Debug)]
pub struct ProcessNarrator {
    program: String,
    args: Vec<String>,
    slot: UtteranceSlot,
    warned_unavailable: AtomicBool,
}

impl ProcessNarrator {
    /// Creates a narrator choosing its voice from `voices`.
    #[must_use]
    pub fn new(config: &ProcessNarratorConfig, voices: &[Voice]) -> Self {
        let mut args = config.profile.espeak_args();
        if let Some(voice) = config.voice_policy.select(voices) {
            info!(voice = %voice.name, language = %voice.language, "selected narration voice");
            args.push("-v".to_owned());
            args.push(voice.name.clone());
        }
        Self {
            program: config.program.clone(),
            args,
            slot: UtteranceSlot::default(),
            warned_unavailable: AtomicBool::new(false),
        }
    }

    /// Queries the program's voice list and creates a narrator.
    ///
    /// A program that cannot list voices still yields a narrator; it uses
    /// the engine's default voice.
    pub async fn discover(config: &ProcessNarratorConfig) -> Self {
        let voices = match Command::new(&config.program)
            .arg("--voices")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                parse_espeak_voices(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                warn!(program = %config.program, status = %output.status, "voice listing failed");
                Vec::new()
            }
            Err(e) => {
                warn!(program = %config.program, error = %e, "speech program not found");
                Vec::new()
            }
        };
        Self::new(config, &voices)
    }

    /// Arguments passed before the utterance text.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full argument list for speaking `text`. The text follows `--` so it
    /// is never read as a flag.
    fn command_args<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        self.args
            .iter()
            .map(String::as_str)
            .chain(["--", text])
            .collect()
    }

    async fn run(&self, text: &str, token: &CancellationToken) -> Result<(), NarratorError> {
        let mut child = Command::new(&self.program)
            .args(self.command_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| NarratorError::Unavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let exited = tokio::select! {
            status = child.wait() => Some(status),
            () = token.cancelled() => None,
        };

        match exited {
            Some(status) => {
                let status = status?;
                if status.success() {
                    Ok(())
                } else {
                    Err(NarratorError::Failed {
                        status: status.to_string(),
                    })
                }
            }
            None => {
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "speech process already gone");
                }
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Narrator for ProcessNarrator {
    async fn speak(&self, text: &str) {
        let utterance = self.slot.begin(text);
        match self.run(text, &utterance.token).await {
            Ok(()) => {}
            Err(e @ NarratorError::Unavailable { .. }) => {
                if !self.warned_unavailable.swap(true, Ordering::Relaxed) {
                    warn!(error = %e, "narration unavailable, continuing without speech");
                }
            }
            Err(e) => warn!(error = %e, "narration failed"),
        }
        self.slot.finish(utterance.id);
    }

    fn cancel(&self) {
        self.slot.cancel();
    }
}
