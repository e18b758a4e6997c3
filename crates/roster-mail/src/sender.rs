use crate::error::{MailError, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Message, SendmailTransport, Transport};
use sha2::{Digest, Sha256};
use std::path::Path;

fn parse_mailbox(role: &'static str, address: &str) -> Result<Mailbox> {
    address.parse().map_err(|source| MailError::Address {
        role,
        address: address.to_string(),
        source,
    })
}

/// Builds a plaintext message.
pub fn build_message(recipient: &str, subject: &str, body: &str, sender: &str) -> Result<Message> {
    let msg = Message::builder()
        .from(parse_mailbox("sender", sender)?)
        .to(parse_mailbox("recipient", recipient)?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;
    Ok(msg)
}

/// Pipes a plaintext message to the sendmail binary at `sendmail_path`.
pub fn send_plaintext_email(
    recipient: &str,
    subject: &str,
    body: &str,
    sender: &str,
    sendmail_path: &Path,
) -> Result<()> {
    let msg = build_message(recipient, subject, body, sender)?;

    tracing::info!(
        recipient,
        subject,
        body_sha256 = %body_hash(body),
        sendmail = %sendmail_path.display(),
        "Sending report"
    );

    SendmailTransport::new_with_command(sendmail_path.as_os_str()).send(&msg)?;
    Ok(())
}

/// Returns SHA-256 hex of email body (for logging, never log the body itself).
pub fn body_hash(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}
