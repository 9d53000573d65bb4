use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Session Args ---
    /// Initial interface language (en, hi)
    #[arg(long, env = "SAKSHAM_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Simulated thinking time before the assistant answers, in milliseconds
    #[arg(long, env = "RESPONSE_DELAY_MS", default_value = "1000")]
    pub response_delay_ms: u64,

    /// Replace the built-in intent table with this JSON file (reloaded when it changes)
    #[arg(long, env = "INTENTS_PATH")]
    pub intents_path: Option<String>,

    // --- Voice Output Args ---
    /// Start with spoken replies switched off
    #[arg(long, env = "SAKSHAM_NO_VOICE", default_value = "false")]
    pub no_voice: bool,

    /// Speech synthesis backend (espeak, none)
    #[arg(long, env = "TTS_BACKEND", default_value = "espeak")]
    pub tts_backend: String,

    /// Executable used by the espeak backend
    #[arg(long, env = "TTS_COMMAND", default_value = "espeak-ng")]
    pub tts_command: String,

    /// Utterance rate, 1.0 being the synthesizer's normal speed
    #[arg(long, env = "SPEECH_RATE", default_value = "0.8")]
    pub speech_rate: f32,

    /// Utterance pitch, 1.0 being the synthesizer's normal pitch
    #[arg(long, env = "SPEECH_PITCH", default_value = "1.1")]
    pub speech_pitch: f32,

    // --- Voice Input Args ---
    /// Shell command printing one transcript to stdout; `{lang}` is replaced by
    /// the language tag (en-US, hi-IN). Voice input is unsupported when unset.
    #[arg(long, env = "STT_COMMAND")]
    pub stt_command: Option<String>,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["saksham"]);
        assert_eq!(args.language, "en");
        assert_eq!(args.response_delay_ms, 1000);
        assert_eq!(args.tts_backend, "espeak");
        assert!(!args.no_voice);
        assert!(args.stt_command.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "saksham",
            "--language",
            "hi",
            "--no-voice",
            "--response-delay-ms",
            "0",
            "--stt-command",
            "arecord -d 4 | whisper --lang {lang}",
        ]);
        assert_eq!(args.language, "hi");
        assert!(args.no_voice);
        assert_eq!(args.response_delay_ms, 0);
        assert!(args.stt_command.unwrap().contains("{lang}"));
    }
}
