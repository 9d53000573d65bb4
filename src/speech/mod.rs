pub mod command;
pub mod espeak;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use log::info;

use crate::models::language::Language;
use self::command::CommandRecognizer;
use self::espeak::EspeakSynthesizer;

pub const DEFAULT_RATE: f32 = 0.8;
pub const DEFAULT_PITCH: f32 = 1.1;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech capability is not available")]
    Unsupported,
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Failed {
        program: String,
        status: String,
    },
    #[error("no speech was recognized")]
    EmptyTranscript,
    #[error("utterance was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    /// BCP-47 tag, `en-US` or `hi-IN`.
    pub language_tag: String,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechRequest {
    pub fn new(text: &str, language: Language, rate: f32, pitch: f32) -> Self {
        Self {
            text: text.to_string(),
            language_tag: language.speech_tag().to_string(),
            rate,
            pitch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    pub language_tag: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionRequest {
    /// One final transcript, no partial results.
    pub fn single_shot(language: Language) -> Self {
        Self {
            language_tag: language.speech_tag().to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Resolves when playback finished, failed or was cancelled.
    async fn speak(&self, request: &SpeechRequest) -> Result<(), SpeechError>;

    /// Stops the utterance in flight, if any.
    fn cancel(&self);
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn is_available(&self) -> bool;

    async fn recognize(&self, request: &RecognitionRequest) -> Result<String, SpeechError>;
}

/// Backend for platforms without speech support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeech;

#[async_trait]
impl SpeechSynthesizer for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn speak(&self, _request: &SpeechRequest) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn cancel(&self) {}
}

#[async_trait]
impl SpeechRecognizer for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn recognize(&self, _request: &RecognitionRequest) -> Result<String, SpeechError> {
        Err(SpeechError::Unsupported)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    Espeak,
    None,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseSpeechBackendError {
    message: String,
}

impl fmt::Display for ParseSpeechBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseSpeechBackendError {}

impl FromStr for SpeechBackend {
    type Err = ParseSpeechBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "espeak" | "espeak-ng" => Ok(SpeechBackend::Espeak),
            "none" | "off" => Ok(SpeechBackend::None),
            _ =>
                Err(ParseSpeechBackendError {
                    message: format!("Invalid TTS backend: '{}'", s),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub backend: SpeechBackend,
    pub tts_command: String,
    pub stt_command: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackend::Espeak,
            tts_command: String::from("espeak-ng"),
            stt_command: None,
        }
    }
}

pub fn new_synthesizer(config: &SpeechConfig) -> Arc<dyn SpeechSynthesizer> {
    match config.backend {
        SpeechBackend::Espeak => {
            let synth = EspeakSynthesizer::new(&config.tts_command);
            if !synth.is_available() {
                info!("'{}' not found on PATH, voice output unavailable", config.tts_command);
            }
            Arc::new(synth)
        }
        SpeechBackend::None => Arc::new(NoSpeech),
    }
}

pub fn new_recognizer(config: &SpeechConfig) -> Arc<dyn SpeechRecognizer> {
    match config.stt_command.as_deref().map(str::trim) {
        Some(cmd) if !cmd.is_empty() => Arc::new(CommandRecognizer::new(cmd)),
        _ => Arc::new(NoSpeech),
    }
}
