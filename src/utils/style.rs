use console::style;

use crate::utils::env::ShopctlEnvKey;

pub enum Style {
    Link,    // URLs
    Command, // commands, env variable keys
    UserCode,
    Path,
    Pending,
    WarningPrefix, // "WARN:" text
    ErrorPrefix,   // "error:" and "error[code]:" text
    Heading,
    Success,
    Failure,
}

impl Style {
    pub fn paint<S: AsRef<str>>(&self, message: S) -> String {
        let message_ref = message.as_ref();

        if is_no_color_set() {
            return message_ref.to_string();
        }

        match &self {
            Style::Link => style(message_ref).cyan().underlined(),
            Style::Command => style(message_ref).yellow(),
            Style::UserCode => style(message_ref).green().bold(),
            Style::Pending => style(message_ref).yellow(),
            Style::WarningPrefix => style(message_ref).yellow(),
            Style::ErrorPrefix => style(message_ref).red().bold(),
            Style::Path | Style::Heading => style(message_ref).bold(),
            Style::Success => style(message_ref).green(),
            Style::Failure => style(message_ref).red(),
        }
        .to_string()
    }
}

pub fn is_no_color_set() -> bool {
    is_bool_env_var_set("NO_COLOR") || is_bool_env_var_set(&ShopctlEnvKey::NoColor.to_string())
}

fn is_bool_env_var_set(key: &str) -> bool {
    !matches!(
        std::env::var(key).as_deref(),
        Err(..) | Ok("") | Ok("0") | Ok("false") | Ok("False") | Ok("FALSE")
    )
}
