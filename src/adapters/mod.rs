//! Infrastructure adapters. Implement ports.
//!
//! Telegram Bot API (outbound), operator console (inbound). Map errors to DomainError.

pub mod telegram;
pub mod ui;
