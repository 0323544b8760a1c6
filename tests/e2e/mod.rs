mod api;
mod auth;
mod config;

use assert_cmd::Command;
use assert_fs::TempDir;
use camino::Utf8PathBuf;
use shopctl::utils::env::ShopctlEnvKey;

pub(crate) struct Home {
    // removed on drop
    _dir: TempDir,
    pub(crate) path: Utf8PathBuf,
}

impl Home {
    pub(crate) fn new() -> Home {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        Home { _dir: dir, path }
    }

    pub(crate) fn config(&self) -> lockbox::Config {
        lockbox::Config::new(Some(&self.path), None).unwrap()
    }

    /// `shopctl` with a private home and no ambient credentials
    pub(crate) fn shopctl(&self) -> Command {
        let mut cmd = Command::cargo_bin("shopctl").unwrap();
        cmd.env_clear()
            .env(ShopctlEnvKey::ConfigHome.to_string(), self.path.as_str())
            .env(ShopctlEnvKey::AuthUrl.to_string(), "http://127.0.0.1:9")
            .env(ShopctlEnvKey::ApiUrl.to_string(), "http://127.0.0.1:9")
            .env("NO_COLOR", "1");
        cmd
    }
}
