use std::fmt::Write;

use crate::catalog::SchemeCatalog;
use crate::config::i18n::{ I18n, RegistrationText, Translations };
use crate::models::chat::{ Message, Sender };
use crate::models::events::{ Notice, NoticeLevel, VoiceState };
use crate::models::language::Language;
use crate::models::registration::RegistrationData;
use crate::models::scheme::{ SchemeDetail, SchemeSummary };
use crate::registration::Field;

use super::commands::COMMANDS;

pub fn help() -> String {
    let mut out = String::from("Commands:\n");
    for (name, hint, about) in COMMANDS.iter() {
        let usage = if hint.is_empty() { format!("/{}", name) } else { format!("/{} {}", name, hint) };
        let _ = writeln!(out, "  {:<18} {}", usage, about);
    }
    out.push_str("Anything else is sent to the assistant while it is open.");
    out
}

pub fn notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Info => "*",
        NoticeLevel::Error => "!",
    };
    match &notice.description {
        Some(description) => format!("{} {} - {}", marker, notice.title, description),
        None => format!("{} {}", marker, notice.title),
    }
}

pub fn message(message: &Message, t: &Translations) -> String {
    match message.sender {
        Sender::Bot => format!("[{}] {}: {}", message.time_label(), t.chatbot.name, message.content),
        Sender::User if message.is_voice =>
            format!("[{}] > {} ({})", message.time_label(), message.content, t.chatbot.voice_badge),
        Sender::User => format!("[{}] > {}", message.time_label(), message.content),
    }
}

pub fn thinking(t: &Translations) -> String {
    format!("... {}", t.chatbot.thinking)
}

pub fn suggestions(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let numbered: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect();
    Some(format!("  /ask {}", numbered.join(" | ")))
}

/// Describes what changed between two voice states, if anything worth showing.
pub fn voice_state(previous: VoiceState, current: VoiceState, t: &Translations) -> Option<String> {
    let a11y = &t.accessibility;
    if previous.voice_enabled != current.voice_enabled {
        let text = if current.voice_enabled { &a11y.voice_on } else { &a11y.voice_off };
        return Some(format!("* {}", text));
    }
    if current.listening && !previous.listening {
        return Some(format!("(( {} ))", a11y.listening));
    }
    if current.speaking && !previous.speaking {
        return Some(format!("(( {} ))", a11y.speaking));
    }
    None
}

pub fn registration_intro(t: &Translations) -> String {
    let text = &t.registration;
    format!(
        "== {} ==\n{}\n{}\n\n-- {} --",
        text.title,
        text.subtitle,
        text.voice_help,
        text.personal_info
    )
}

pub fn field_prompt(field: Field, text: &RegistrationText, current: &str) -> String {
    let mut out = String::from(field.label(text));
    if field.is_required() {
        out.push_str(" *");
    }
    let _ = write!(out, " ({})", field.placeholder(text));
    if let Some(options) = field.options(text) {
        for (i, (value, label)) in options.iter().enumerate() {
            let _ = write!(out, "\n  {:>2}. {}", i + 1, label);
            if value == current {
                out.push_str(" <");
            }
        }
    } else if !current.is_empty() {
        let _ = write!(out, " [{}]", current);
    }
    out
}

pub fn profile(data: &RegistrationData, text: &RegistrationText) -> String {
    let mut out = format!("-- {} --", text.personal_info);
    for field in Field::ORDER {
        let value = field.value(data);
        if value.is_empty() {
            continue;
        }
        let shown = field
            .options(text)
            .and_then(|options| options.into_iter().find(|(v, _)| v == value))
            .map(|(_, label)| label)
            .unwrap_or_else(|| value.to_string());
        let _ = write!(out, "\n  {}: {}", field.label(text), shown);
    }
    out
}

pub fn homepage(
    i18n: &I18n,
    catalog: &SchemeCatalog,
    language: Language,
    schemes: &[SchemeSummary],
    selected_category: Option<&str>
) -> String {
    let t = i18n.t(language);
    let home = &t.homepage;
    let mut out = format!(
        "== {} ==   [{}: {} /lang]\n{}\n{}\n",
        home.portal_name,
        t.common.language,
        language.switch_label(),
        home.welcome,
        home.subtitle
    );

    let _ = writeln!(out, "\n-- {} --", home.find_schemes);
    for id in catalog.category_ids() {
        let title = catalog.category_title(i18n, id, language).unwrap_or(id);
        let marker = if selected_category == Some(id) { ">" } else { " " };
        let _ = writeln!(out, " {} {} ({}, {})", marker, title, id, catalog.schemes_in(id, language).len());
    }

    out.push('\n');
    if schemes.is_empty() {
        let _ = writeln!(out, "  {}", home.no_results);
    }
    for (i, scheme) in schemes.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {} [{}]", i + 1, scheme.title, scheme.id);
        let _ = writeln!(out, "     {}", scheme.description);
        let _ = writeln!(out, "     {} {}", home.eligibility_label, scheme.eligibility);
        let _ = writeln!(out, "     {} {}", home.benefits_label, scheme.benefits);
    }

    let _ = writeln!(out, "\n-- {} --", home.how_it_works);
    for (i, step) in home.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}: {}", i + 1, step.title, step.description);
    }
    out.trim_end().to_string()
}

fn section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, "\n\n-- {} --", title);
    for item in items {
        let _ = write!(out, "\n  - {}", item);
    }
}

pub fn detail(scheme: &SchemeDetail, language: Language, t: &Translations) -> String {
    let labels = &t.detail;
    let mut out = format!(
        "== {} ==  [{}]\n{}\n{}",
        scheme.title,
        scheme.status.label(language),
        scheme.ministry,
        scheme.description
    );

    let _ = write!(out, "\n\n  {}: {}", labels.benefit, scheme.benefit_amount);
    if let Some(total) = &scheme.total_beneficiaries {
        let _ = write!(out, "\n  {}: {}", labels.beneficiaries, total);
    }
    let _ = write!(out, "\n  {}: {}", labels.coverage, scheme.coverage);
    let _ = write!(out, "\n  {}: {}", labels.launch_date, scheme.launch_date);
    if let Some(last) = &scheme.last_date {
        let _ = write!(out, "\n  {}: {}", labels.last_date, last);
    }

    section(&mut out, &labels.objectives, &scheme.objectives);

    let eligibility = &scheme.eligibility;
    let _ = write!(out, "\n\n-- {} --\n  {}", labels.eligibility_criteria, labels.who_can_apply);
    for criterion in &eligibility.criteria {
        let _ = write!(out, "\n  - {}", criterion);
    }
    if !eligibility.categories.is_empty() {
        let _ = write!(out, "\n  {} {}", labels.eligible_categories, eligibility.categories.join(", "));
    }
    if let Some(age) = &eligibility.age_limit {
        let _ = write!(out, "\n  {} {}", labels.age_limit, age);
    }
    if let Some(income) = &eligibility.income_limit {
        let _ = write!(out, "\n  {} {}", labels.income_limit, income);
    }

    section(&mut out, &labels.required_documents, &scheme.documents);

    let process = &scheme.application_process;
    let _ = write!(out, "\n\n-- {} --", labels.how_to_apply);
    for (i, step) in process.steps.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, step);
    }
    if let Some(url) = &process.online_url {
        let _ = write!(out, "\n  {}: {}", labels.apply_online, url);
    }
    if let Some(offline) = &process.offline_process {
        let _ = write!(out, "\n  {}: {}", labels.offline, offline);
    }

    section(&mut out, &labels.key_features, &scheme.key_features);
    section(&mut out, &labels.benefits, &scheme.benefits);

    if !scheme.faqs.is_empty() {
        let _ = write!(out, "\n\n-- {} --", labels.faqs);
        for faq in &scheme.faqs {
            let _ = write!(out, "\n  Q: {}\n  A: {}", faq.question, faq.answer);
        }
    }

    let _ = write!(
        out,
        "\n\n-- {} --\n  {} {}\n  {}: {}\n\n  /apply  {}   /back  {}",
        labels.help_support,
        labels.helpline,
        scheme.helpline,
        labels.official_website,
        scheme.official_website,
        t.common.apply,
        t.common.back
    );
    out
}
