//! Delivering converted books by email.
//!
//! Kindle-style inboxes import any supported attachment sent to the
//! device address. The subject `convert` asks the service to convert the
//! document into its native format.

use std::future::Future;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use crate::config::SmtpConfig;
use crate::{KindlerError, Result};

/// Subject line of every delivery.
pub const SUBJECT: &str = "convert";

/// MIME type of the attached book.
pub const EPUB_CONTENT_TYPE: &str = "application/epub+zip";

/// Something that can deliver a converted book to the reading device.
pub trait Mailer: Send + Sync {
    /// Sends the file at `attachment` to the configured recipient.
    fn send(&self, attachment: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Sends mail through an SMTP submission server using STARTTLS.
pub struct SmtpMailer {
    from: Mailbox,
    to: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds the mailer from configuration.
    ///
    /// Addresses are validated here so that a bad configuration fails at
    /// startup. No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from = Mailbox::new(Some(config.sender_name.clone()), config.sender.parse::<Address>()?);
        let to = Mailbox::new(None, config.recipient.parse::<Address>()?);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.sender.clone(), config.password.clone()))
            .build();

        Ok(Self { from, to, transport })
    }

    /// Builds the outbound message with `attachment` as its only part.
    pub fn compose(&self, attachment: &Path) -> Result<Message> {
        compose_message(&self.from, &self.to, attachment)
    }
}

/// Builds a `convert` message from `from` to `to` carrying the file at `attachment`.
pub fn compose_message(from: &Mailbox, to: &Mailbox, attachment: &Path) -> Result<Message> {
    let file_name = attachment
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let body = std::fs::read(attachment)?;

    let part = Attachment::new(file_name).body(body, ContentType::parse(EPUB_CONTENT_TYPE)?);

    let message = Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(SUBJECT)
        .multipart(MultiPart::mixed().singlepart(part))?;

    Ok(message)
}

impl Mailer for SmtpMailer {
    async fn send(&self, attachment: &Path) -> Result<()> {
        let message = self.compose(attachment)?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!("Sent {} to {}", attachment.display(), self.to);
                Ok(())
            }
            Err(e) => {
                error!("An error occurred while sending the email: {e}");
                Err(KindlerError::Smtp(e))
            }
        }
    }
}
