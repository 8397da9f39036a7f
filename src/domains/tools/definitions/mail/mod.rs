//! Mail tools.
//!
//! Outbound email over the configured SMTP relay.

mod send;

pub use send::{MailSendParams, MailSendTool};
