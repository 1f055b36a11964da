// src/notify/mod.rs
pub mod email;
pub mod sms;

use anyhow::Result;

/// Email delivery channel. Failure is opaque to the engine beyond logging.
#[async_trait::async_trait]
pub trait EmailChannel: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body_html: &str) -> Result<()>;
}

/// SMS delivery channel, an independent failure domain from email.
#[async_trait::async_trait]
pub trait SmsChannel: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<()>;
}

pub use email::SmtpEmailChannel;
pub use sms::SmsGatewayChannel;
