use std::sync::Arc;
use std::time::Duration;

use saksham::agent::Saksham;
use saksham::app::{ AppEvent, AppState, View };
use saksham::chat::{ ChatController, ChatSettings };
use saksham::config::Content;
use saksham::models::chat::Sender;
use saksham::models::events::{ ChatEvent, ChatUpdate };
use saksham::models::language::Language;
use saksham::models::registration::RegistrationData;
use saksham::registration::{ validate, ValidationError };
use saksham::speech::NoSpeech;

#[test]
fn builtin_content_is_consistent() {
    let content = Content::builtin().unwrap();
    assert_eq!(content.catalog.len(), 24);
    assert_eq!(content.directory.len(), 13);
    for id in content.catalog.category_ids() {
        assert!(content.catalog.category_title(&content.i18n, id, Language::Hi).is_some());
    }
}

#[test]
fn intent_matching_end_to_end() {
    let agent = Saksham::builtin().unwrap();
    assert_eq!(agent.find_best_match("hello there", Language::En).id, "greeting");
    assert_eq!(agent.find_best_match("what documents do I need", Language::En).id, "documents");
    assert!(agent.find_best_match("", Language::Hi).is_fallback());

    let reply = agent.respond("am I eligible", Language::En);
    assert_eq!(reply.intent_id, "eligibility_check");
    assert!(!reply.follow_up.is_empty());
}

#[test]
fn scheme_lookup_with_generic_fallback() {
    let content = Content::builtin().unwrap();
    assert_eq!(content.directory.lookup("pm-kisan", Language::En).title, "PM-KISAN Scheme");

    let unknown = content.directory.lookup("pmay-urban", Language::Hi);
    assert_eq!(unknown.id, "pmay-urban");
    assert_eq!(unknown, content.directory.lookup("pmay-urban", Language::Hi));
}

#[test]
fn registration_rules_and_navigation() {
    let content = Content::builtin().unwrap();
    let mut data = RegistrationData {
        name: String::new(),
        mobile: "9876543210".into(),
        aadhar: "123412341234".into(),
        address: "Ward 4".into(),
        ..Default::default()
    };
    assert_eq!(validate(&data), Err(ValidationError::Required));
    data.name = "Ravi".into();
    data.mobile = "98765".into();
    assert_eq!(validate(&data), Err(ValidationError::InvalidMobile));
    data.mobile = "9876543210".into();

    let mut state = AppState::new(Language::En);
    state.handle(AppEvent::SubmitRegistration(data), &content.i18n);
    assert_eq!(state.view, View::Homepage);
    state.handle(AppEvent::SelectScheme("ayushman".into()), &content.i18n);
    assert_eq!(state.view, View::SchemeDetail { scheme_id: "ayushman".into() });
}

#[tokio::test]
async fn one_chat_turn() {
    let content = Content::builtin().unwrap();
    let settings = ChatSettings {
        response_delay: Duration::ZERO,
        ..ChatSettings::default()
    };
    let (mut chat, mut events) = ChatController::new(
        Saksham::builtin().unwrap(),
        Arc::clone(&content),
        Arc::new(NoSpeech),
        Arc::new(NoSpeech),
        settings,
        Language::Hi
    );

    chat.handle(ChatEvent::Open);
    chat.handle(ChatEvent::Chat { content: "दस्तावेज़".into(), is_voice: false });
    let due = events.recv().await.unwrap();
    let updates = chat.handle(due);

    let bot = chat.conversation().messages().last().unwrap();
    assert_eq!(bot.sender, Sender::Bot);
    assert!(updates.contains(&ChatUpdate::Message { message: bot.clone() }));
    // no synthesizer, so nothing is spoken
    assert!(!chat.state().speaking);
}
