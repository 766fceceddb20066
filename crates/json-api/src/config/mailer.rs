//! Mailer Config

use clap::Args;

/// Mail delivery and outbox dispatch settings.
#[derive(Debug, Args)]
pub struct MailerConfig {
    /// HTTP mail delivery endpoint; mail is logged and skipped when unset
    #[arg(long, env = "MAILER_ENDPOINT")]
    pub mailer_endpoint: Option<String>,

    /// Sender address for outgoing mail
    #[arg(
        long,
        env = "MAILER_FROM",
        default_value = "dailybrew <noreply@dailybrew.example>"
    )]
    pub mailer_from: String,

    /// Seconds between outbox dispatch polls
    #[arg(long, env = "OUTBOX_POLL_SECONDS", default_value = "10")]
    pub outbox_poll_seconds: u64,
}
