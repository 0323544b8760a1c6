use std::fmt::{self, Display};

use serde::Serialize;

use crate::utils::{env::ShopctlEnvKey, style::Style};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopctlErrorSuggestion {
    RunLogin,
    RunLoginOnceReachable,
    LoginFaster,
    CheckServerConnection,
    SetConfigHome,
    SubmitIssue,
    Adhoc(String),
}

impl Display for ShopctlErrorSuggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let login = Style::Command.paint("shopctl auth login");
        let suggestion = match self {
            ShopctlErrorSuggestion::RunLogin => format!("Run {login} to authenticate."),
            ShopctlErrorSuggestion::RunLoginOnceReachable => format!(
                "Your saved session was cleared. Once the auth service is reachable, run {login} again."
            ),
            ShopctlErrorSuggestion::LoginFaster => format!(
                "Run {login} again and approve the request in your browser before the code expires."
            ),
            ShopctlErrorSuggestion::CheckServerConnection => format!(
                "Check your network connection, or point shopctl at another server with {} or {}.",
                Style::Command.paint(ShopctlEnvKey::AuthUrl.to_string()),
                Style::Command.paint(ShopctlEnvKey::ApiUrl.to_string())
            ),
            ShopctlErrorSuggestion::SetConfigHome => format!(
                "Set {} to a directory shopctl can write to.",
                Style::Command.paint(ShopctlEnvKey::ConfigHome.to_string())
            ),
            ShopctlErrorSuggestion::SubmitIssue => {
                "This error was unexpected! Please submit an issue with any relevant details about what you were trying to do.".to_string()
            }
            ShopctlErrorSuggestion::Adhoc(msg) => msg.to_string(),
        };
        write!(formatter, "{suggestion}")
    }
}
