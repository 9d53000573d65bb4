pub mod chat;
pub mod events;
pub mod language;
pub mod registration;
pub mod scheme;
