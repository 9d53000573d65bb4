use async_trait::async_trait;
use log::{ debug, warn };
use std::env;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::Notify;

use super::{ SpeechError, SpeechRequest, SpeechSynthesizer };

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;

/// Speaks through an `espeak-ng` compatible executable.
pub struct EspeakSynthesizer {
    program: String,
    cancel: Notify,
}

impl EspeakSynthesizer {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            cancel: Notify::new(),
        }
    }

    fn args(request: &SpeechRequest) -> Vec<String> {
        vec![
            "-v".to_string(),
            voice_for(&request.language_tag).to_string(),
            "-s".to_string(),
            words_per_minute(request.rate).to_string(),
            "-p".to_string(),
            pitch_value(request.pitch).to_string(),
            "--".to_string(),
            request.text.clone()
        ]
    }
}

fn voice_for(language_tag: &str) -> &'static str {
    if language_tag.to_lowercase().starts_with("hi") { "hi" } else { "en-us" }
}

fn words_per_minute(rate: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * rate).round().max(1.0) as u32
}

fn pitch_value(pitch: f32) -> u32 {
    (BASE_PITCH * pitch).round().clamp(0.0, 99.0) as u32
}

pub(crate) fn program_on_path(program: &str) -> bool {
    if program.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(program).is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    fn is_available(&self) -> bool {
        program_on_path(&self.program)
    }

    async fn speak(&self, request: &SpeechRequest) -> Result<(), SpeechError> {
        // registered before spawning so a cancel issued right after start is seen
        let cancelled = self.cancel.notified();

        let mut child = Command::new(&self.program)
            .args(Self::args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SpeechError::Spawn { program: self.program.clone(), source })?;
        debug!("Speaking {} chars ({})", request.text.chars().count(), request.language_tag);

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|source| SpeechError::Spawn {
                    program: self.program.clone(),
                    source,
                })?;
                if status.success() {
                    Ok(())
                } else {
                    warn!("{} exited with {}", self.program, status);
                    Err(SpeechError::Failed { program: self.program.clone(), status: status.to_string() })
                }
            }
            _ = cancelled => {
                let _ = child.kill().await;
                Err(SpeechError::Cancelled)
            }
        }
    }

    fn cancel(&self) {
        self.cancel.notify_waiters();
    }
}
