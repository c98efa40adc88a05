//! 邮件 DTO

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EmailResponse {
    pub sent: bool,
}
