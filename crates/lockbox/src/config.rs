use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;

use crate::{Lockbox, LockboxProblem};

const CREDENTIALS_FILE: &str = "credentials.enc";

/// Config allows end users to override default settings
/// usually determined by lockbox. Library consumers map their
/// environment variable overrides onto it.
#[derive(Debug, Clone)]
pub struct Config {
    /// home is the path to the user's config directory
    pub home: Utf8PathBuf,

    /// override_token is a bearer token that takes precedence over
    /// anything stored on disk
    pub override_token: Option<String>,
}

impl Config {
    /// Creates a new instance of `Config`
    pub fn new(
        override_home: Option<&impl AsRef<Utf8Path>>,
        override_token: Option<String>,
    ) -> Result<Config, LockboxProblem> {
        let home = match override_home {
            Some(home) => {
                let home = home.as_ref();
                if home.exists() && !home.is_dir() {
                    return Err(LockboxProblem::InvalidOverrideConfigDir(home.to_string()));
                }
                home.to_path_buf()
            }
            None => {
                // Lin: /home/alice/.config/shopctl
                // Win: C:\Users\Alice\AppData\Roaming\Shopctl\shopctl\config
                // Mac: /Users/Alice/Library/Application Support/dev.Shopctl.shopctl
                let dir = ProjectDirs::from("dev", "Shopctl", "shopctl")
                    .ok_or(LockboxProblem::DefaultConfigDirNotFound)?
                    .config_dir()
                    .to_path_buf();
                Utf8PathBuf::try_from(dir)?
            }
        };

        Ok(Config {
            home,
            override_token: override_token.filter(|token| !token.trim().is_empty()),
        })
    }

    /// Location of the encrypted credential file
    pub fn credentials_path(&self) -> Utf8PathBuf {
        self.home.join(CREDENTIALS_FILE)
    }

    /// Opens the credential store that lives under this config's home
    pub fn lockbox(&self) -> Lockbox {
        Lockbox::at(self.credentials_path())
    }
}
