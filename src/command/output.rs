use std::io;

use calm_io::{stderrln, stdoutln};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Table};
use lockbox::{mask_token, CredentialOrigin, UserProfile};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::LogoutOutcome;
use crate::utils::{env::ShopctlEnvKey, style::Style};
use crate::ShopctlError;

/// ShopctlOutput defines all of the different types of data that are printed
/// to `stdout`. Every command returns `ShopctlResult<ShopctlOutput>`; how the
/// data is rendered is decided here, once for human readers and once as JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum ShopctlOutput {
    LoginSuccess {
        user: Option<UserProfile>,
        expires_at: DateTime<Utc>,
    },
    Logout(LogoutOutcome),
    WhoAmI {
        user: UserProfile,
        origin: CredentialOrigin,
    },
    AuthStatus(AuthStatus),
    Token(String),
    ConfigPath(Utf8PathBuf),
    ApiResponse {
        status: u16,
        body: Value,
    },
}

/// What `auth status` knows without touching the network
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthStatus {
    pub origin: CredentialOrigin,
    pub logged_in: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired: Option<bool>,
    pub access_token: Option<String>,
    pub user: Option<UserProfile>,
}

/// How results are rendered on stdout
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for FormatType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "plain" => Ok(FormatType::Human),
            "json" => Ok(FormatType::Json),
            other => Err(anyhow::anyhow!(
                "invalid value '{other}' for ${}: expected 'human' or 'json'",
                ShopctlEnvKey::Output
            )),
        }
    }
}

impl ShopctlOutput {
    /// The human-readable rendering, if this output has any
    pub fn get_stdout(&self) -> Option<String> {
        match self {
            ShopctlOutput::LoginSuccess { user, expires_at } => {
                let who = user
                    .as_ref()
                    .map(|user| format!(" as {}", Style::Heading.paint(&user.email)))
                    .unwrap_or_default();
                Some(format!(
                    "{}{who}. Access token valid until {expires_at}.",
                    Style::Success.paint("Logged in")
                ))
            }
            ShopctlOutput::Logout(outcome) => Some(
                match outcome {
                    LogoutOutcome::Revoked => "Logged out.",
                    LogoutOutcome::ClearedLocally => {
                        "Logged out locally. The session could not be revoked on the server."
                    }
                    LogoutOutcome::NotLoggedIn => "Not logged in; nothing to do.",
                }
                .to_string(),
            ),
            ShopctlOutput::WhoAmI { user, origin } => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.add_row(vec!["Email", user.email.as_str()]);
                table.add_row(vec!["Name", user.name.as_str()]);
                table.add_row(vec!["Role", user.role.as_str()]);
                table.add_row(vec!["User ID", user.id.as_str()]);
                table.add_row(vec!["Credentials".to_string(), describe_origin(origin)]);
                Some(table.to_string())
            }
            ShopctlOutput::AuthStatus(status) => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.add_row(vec!["Credentials".to_string(), describe_origin(&status.origin)]);
                let state = match (status.logged_in, status.expired) {
                    (false, _) => Style::Failure.paint("not logged in"),
                    (true, Some(true)) => Style::Pending.paint("expired, will refresh on next use"),
                    (true, _) => Style::Success.paint("logged in"),
                };
                table.add_row(vec!["Status".to_string(), state]);
                if let Some(expires_at) = status.expires_at {
                    table.add_row(vec!["Expires".to_string(), expires_at.to_string()]);
                }
                if let Some(token) = &status.access_token {
                    table.add_row(vec!["Access token".to_string(), mask_token(token)]);
                }
                if let Some(user) = &status.user {
                    table.add_row(vec!["User".to_string(), user.email.clone()]);
                }
                Some(table.to_string())
            }
            ShopctlOutput::Token(token) => Some(token.clone()),
            ShopctlOutput::ConfigPath(path) => Some(path.to_string()),
            ShopctlOutput::ApiResponse { body, .. } => Some(match body {
                Value::String(text) => text.clone(),
                body => serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()),
            }),
        }
    }

    /// The `data` member of the JSON rendering
    pub fn get_json(&self) -> Value {
        match self {
            ShopctlOutput::LoginSuccess { user, expires_at } => {
                json!({ "user": user, "expires_at": expires_at })
            }
            ShopctlOutput::Logout(outcome) => json!({
                "revoked": matches!(outcome, LogoutOutcome::Revoked),
                "was_logged_in": !matches!(outcome, LogoutOutcome::NotLoggedIn),
            }),
            ShopctlOutput::WhoAmI { user, origin } => json!({ "user": user, "origin": origin }),
            ShopctlOutput::AuthStatus(status) => {
                let mut status = status.clone();
                status.access_token = status.access_token.as_deref().map(mask_token);
                json!(status)
            }
            ShopctlOutput::Token(token) => json!({ "access_token": token }),
            ShopctlOutput::ConfigPath(path) => json!({ "path": path }),
            ShopctlOutput::ApiResponse { status, body } => json!({ "status": status, "body": body }),
        }
    }

    pub fn print(&self, format: FormatType) -> io::Result<()> {
        match format {
            FormatType::Human => {
                if let Some(stdout) = self.get_stdout() {
                    stdoutln!("{}", stdout)?;
                }
            }
            FormatType::Json => {
                stdoutln!("{}", JsonOutput::success(self))?;
            }
        }
        Ok(())
    }
}

fn describe_origin(origin: &CredentialOrigin) -> String {
    match origin {
        CredentialOrigin::EnvVar => format!("${}", Style::Command.paint(ShopctlEnvKey::Token.to_string())),
        CredentialOrigin::CredentialFile(path) => Style::Path.paint(path.as_str()),
    }
}

/// The JSON envelope every command prints with `--format json`
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    json_version: &'static str,
    data: Value,
    error: Value,
}

impl JsonOutput {
    fn success(output: &ShopctlOutput) -> JsonOutput {
        let mut data = output.get_json();
        if let Value::Object(map) = &mut data {
            map.insert("success".to_string(), Value::Bool(true));
        }
        JsonOutput {
            json_version: "1",
            data,
            error: Value::Null,
        }
    }

    pub fn failure(error: &ShopctlError) -> JsonOutput {
        JsonOutput {
            json_version: "1",
            data: json!({ "success": false }),
            error: json!(error),
        }
    }

    pub fn print(&self) -> io::Result<()> {
        stdoutln!("{}", self)
    }
}

impl std::fmt::Display for JsonOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", json!(self))
    }
}

/// Progress chatter for humans; kept off stdout so it never mixes with output
pub fn note(message: impl std::fmt::Display) {
    let _ = stderrln!("{}", message);
}
