//! Roster Mail - membership reports delivered through the local sendmail.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod sender;
pub mod templates;

pub use error::{MailError, Result};
pub use sender::{body_hash, build_message, send_plaintext_email};
pub use templates::{EmailTemplate, MembershipReport};
