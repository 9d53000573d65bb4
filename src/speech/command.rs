use async_trait::async_trait;
use log::debug;
use std::process::Stdio;
use tokio::process::Command;

use super::{ RecognitionRequest, SpeechError, SpeechRecognizer };

const SHELL: &str = "sh";

/// Runs a user supplied shell command and takes its stdout as the transcript.
/// `{lang}` in the command is replaced with the request's language tag.
pub struct CommandRecognizer {
    template: String,
}

impl CommandRecognizer {
    pub fn new(template: &str) -> Self {
        Self { template: template.to_string() }
    }

    fn command_line(&self, request: &RecognitionRequest) -> String {
        self.template.replace("{lang}", &request.language_tag)
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn is_available(&self) -> bool {
        super::espeak::program_on_path(SHELL)
    }

    async fn recognize(&self, request: &RecognitionRequest) -> Result<String, SpeechError> {
        let line = self.command_line(request);
        debug!("Recognizing speech via: {}", line);

        let output = Command::new(SHELL)
            .arg("-c")
            .arg(&line)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output().await
            .map_err(|source| SpeechError::Spawn { program: line.clone(), source })?;

        if !output.status.success() {
            return Err(SpeechError::Failed {
                program: line,
                status: output.status.to_string(),
            });
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(SpeechError::EmptyTranscript);
        }
        Ok(transcript)
    }
}
