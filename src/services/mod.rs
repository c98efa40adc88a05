//! 服务模块

pub mod cascade;
pub mod mail;

pub use mail::{LogMailer, Mailer, OutgoingEmail, SmtpMailer, create_mailer};
