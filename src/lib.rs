pub mod agent;
pub mod analytics;
pub mod app;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod console;
pub mod models;
pub mod registration;
pub mod speech;

use agent::Saksham;
use app::AppState;
use chat::{ ChatController, ChatSettings };
use cli::Args;
use config::Content;
use console::Console;
use log::info;
use models::language::Language;
use speech::{ SpeechBackend, SpeechConfig };
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let language: Language = args.language.parse()?;
    let backend: SpeechBackend = args.tts_backend.parse()?;

    info!("--- Core Configuration ---");
    info!("Language: {}", language);
    info!("Response Delay: {}ms", args.response_delay_ms);
    info!("Intents Path: {}", args.intents_path.as_deref().unwrap_or("(built-in)"));
    info!("Voice Output: {}", !args.no_voice);
    info!("TTS Backend: {:?}", backend);
    info!("TTS Command: {}", args.tts_command);
    info!("Speech Rate: {}", args.speech_rate);
    info!("Speech Pitch: {}", args.speech_pitch);
    info!("STT Command: {}", args.stt_command.as_deref().unwrap_or("(unsupported)"));
    info!("-------------------------");

    let content = Content::builtin()?;
    let agent = match &args.intents_path {
        Some(path) => Saksham::from_file(path)?,
        None => Saksham::builtin()?,
    };

    let speech_config = SpeechConfig {
        backend,
        tts_command: args.tts_command.clone(),
        stt_command: args.stt_command.clone(),
    };
    let synthesizer = speech::new_synthesizer(&speech_config);
    let recognizer = speech::new_recognizer(&speech_config);
    info!("Speech synthesis available: {}", synthesizer.is_available());
    info!("Speech recognition available: {}", recognizer.is_available());

    let settings = ChatSettings {
        response_delay: Duration::from_millis(args.response_delay_ms),
        voice_enabled: !args.no_voice,
        speech_rate: args.speech_rate,
        speech_pitch: args.speech_pitch,
    };
    let (chat, events) = ChatController::new(
        agent,
        Arc::clone(&content),
        synthesizer,
        recognizer,
        settings,
        language
    );

    let console = Console::new(content, AppState::new(language), chat, std::io::stdout());
    console.run(events).await?;

    Ok(())
}
