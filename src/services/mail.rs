//! 邮件服务
//!
//! 配置了 SMTP 服务器时通过 lettre 发送，否则只记录日志。

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::config::EmailConfig;
use crate::error::{AppError, Result};

/// 待发送邮件
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    /// 构建 lettre 消息
    pub fn to_message(&self) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.parse::<Mailbox>()?)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN);

        for addr in &self.to {
            builder = builder.to(addr.parse::<Mailbox>()?);
        }
        for addr in &self.cc {
            builder = builder.cc(addr.parse::<Mailbox>()?);
        }
        for addr in &self.bcc {
            builder = builder.bcc(addr.parse::<Mailbox>()?);
        }

        Ok(builder.body(self.body.clone())?)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// SMTP 发送
pub struct SmtpMailer {
    config: EmailConfig,
    server: String,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig, server: String) -> Self {
        Self { config, server }
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let builder = if self.config.use_tls {
            SmtpTransport::starttls_relay(&self.server)?
        } else {
            SmtpTransport::builder_dangerous(&self.server)
        };

        let builder = builder.port(self.config.smtp_port);
        let builder = if self.config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
        };

        Ok(builder.build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = email.to_message()?;
        let transport = self.transport()?;

        // lettre 的同步传输在阻塞线程中执行
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| AppError::Internal(format!("mail task failed: {}", e)))??;

        tracing::info!(server = %self.server, to = ?email.to, subject = %email.subject, "Email sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// 仅记录日志的发送实现
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        // 确保地址格式与 SMTP 路径一致
        email.to_message()?;
        tracing::info!(
            from = %email.from,
            to = ?email.to,
            cc = ?email.cc,
            bcc = ?email.bcc,
            subject = %email.subject,
            "Email not sent: no SMTP server configured\n{}",
            email.body
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// 根据配置创建邮件发送实现
pub fn create_mailer(config: &EmailConfig) -> Box<dyn Mailer> {
    match &config.smtp_server {
        Some(server) if !server.is_empty() => {
            Box::new(SmtpMailer::new(config.clone(), server.clone()))
        }
        _ => Box::new(LogMailer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "miqa@example.com".into(),
            to: vec!["reviewer@example.com".into()],
            cc: vec!["lead@example.com".into()],
            bcc: vec![],
            subject: "Scan 0001 flagged".into(),
            body: "Motion artifact in T1.".into(),
        }
    }

    #[test]
    fn test_to_message_headers() {
        let formatted = String::from_utf8(email().to_message().unwrap().formatted()).unwrap();
        assert!(formatted.contains("To: reviewer@example.com"));
        assert!(formatted.contains("Cc: lead@example.com"));
        assert!(formatted.contains("Subject: Scan 0001 flagged"));
    }

    #[test]
    fn test_to_message_rejects_bad_address() {
        let mut bad = email();
        bad.to = vec!["not an address".into()];
        assert!(matches!(bad.to_message(), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_valid_email() {
        assert!(LogMailer.send(&email()).await.is_ok());
    }

    #[test]
    fn test_create_mailer_selects_backend() {
        let mut config = EmailConfig::default();
        assert_eq!(create_mailer(&config).name(), "log");

        config.smtp_server = Some("smtp.example.com".into());
        assert_eq!(create_mailer(&config).name(), "smtp");
    }
}
