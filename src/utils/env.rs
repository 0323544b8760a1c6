use std::collections::HashMap;
use std::{env, fmt, io};

use heck::ToShoutySnakeCase;

/// ShopctlEnv allows us to mock environment variables while
/// running tests. That way tests can run in parallel and the
/// developer's own environment has no effect on them.
#[derive(Debug, Clone)]
pub struct ShopctlEnv {
    mock_store: Option<HashMap<String, String>>,
}

impl Default for ShopctlEnv {
    fn default() -> ShopctlEnv {
        ShopctlEnv::new()
    }
}

impl ShopctlEnv {
    /// creates a new environment variable store
    pub fn new() -> ShopctlEnv {
        let mock_store = if cfg!(test) {
            Some(HashMap::new())
        } else {
            None
        };

        ShopctlEnv { mock_store }
    }

    /// creates a store that only ever sees `vars`
    pub fn mocked<'a>(vars: impl IntoIterator<Item = (ShopctlEnvKey, &'a str)>) -> ShopctlEnv {
        let mock_store = vars
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ShopctlEnv {
            mock_store: Some(mock_store),
        }
    }

    /// returns the value of the environment variable if it exists
    pub fn get(&self, key: ShopctlEnvKey) -> io::Result<Option<String>> {
        let key_str = key.to_string();
        tracing::trace!("Checking for ${}", &key_str);
        let result = match &self.mock_store {
            Some(mock_store) => mock_store.get(&key_str).cloned(),
            None => match env::var(&key_str) {
                Ok(data) => Some(data),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("The value of the environment variable \"{key_str}\" is not valid Unicode."),
                    ))
                }
            },
        };

        match &result {
            Some(value) => tracing::debug!("read {}", Self::debug_value(key, value)),
            None => tracing::trace!("could not find ${}", &key_str),
        }

        Ok(result)
    }

    fn debug_value(key: ShopctlEnvKey, value: &str) -> String {
        let value = match key {
            ShopctlEnvKey::Token => lockbox::mask_token(value),
            _ => value.to_string(),
        };
        format!("environment variable ${key} = {value}")
    }

    /// sets a variable in the mock store; a no-op outside of tests
    pub fn insert(&mut self, key: ShopctlEnvKey, value: &str) {
        if let Some(mock_store) = &mut self.mock_store {
            tracing::debug!("writing {}", Self::debug_value(key, value));
            mock_store.insert(key.to_string(), value.to_string());
        }
    }
}

/// ShopctlEnvKey defines all of the environment variables
/// that are respected by shopctl. Each one is prefixed with `SHOPCTL_`
/// and the suffix is the variant name in SHOUTY_SNAKE_CASE.
/// For example, `ShopctlEnvKey::ConfigHome.to_string()` becomes `SHOPCTL_CONFIG_HOME`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShopctlEnvKey {
    ApiUrl,
    AuthUrl,
    ClientId,
    ConfigHome,
    NoColor,
    Output,
    Token,
}

impl fmt::Display for ShopctlEnvKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let dbg = format!("{self:?}").to_shouty_snake_case();
        write!(fmt, "SHOPCTL_{dbg}")
    }
}
