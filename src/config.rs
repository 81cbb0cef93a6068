use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use config::{File, FileFormat};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::theme::ColorScheme;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,

    /// Scheme the showcase starts with
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: get_data_dir(),
            color_scheme: ColorScheme::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

pub const CONFIG_FILE: &str = "config.json5";

impl Config {
    /// Layers, lowest priority first: defaults, `config.json5` in the data
    /// directory, command line.
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = cli_source
            .as_ref()
            .and_then(|cli| cli.data_dir.clone())
            .map(PathBuf::from)
            .unwrap_or_else(get_data_dir);

        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("color_scheme", ColorScheme::default().to_string())?
            .add_source(
                File::from(data_dir.join(CONFIG_FILE))
                    .format(FileFormat::Json5)
                    .required(false),
            );

        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = env::var(format!("{}_DATA", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
    {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "yyang", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir_in;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    fn load(args: &[&str]) -> Config {
        let args = Cli::parse_from(args);
        Config::new(Some(ClapSource::new(&args))).expect("Failed to load config")
    }

    #[test]
    fn data_dir_from_cli() {
        let temp_data = tempdir_in(".").unwrap();
        let data_dir = temp_data.path().to_str().unwrap();

        let config = load(&["test-config", "--data-dir", data_dir]);
        assert_eq!(config.config.data_dir, temp_data.path());
        assert_eq!(config.config.color_scheme, ColorScheme::Light);
    }

    #[test]
    fn color_scheme_from_cli() {
        let temp_data = tempdir_in(".").unwrap();
        let data_dir = temp_data.path().to_str().unwrap();

        let config = load(&["test-config", "--data-dir", data_dir, "--color-scheme", "dark"]);
        assert_eq!(config.config.color_scheme, ColorScheme::Dark);
    }

    #[test]
    fn color_scheme_from_file() {
        let temp_data = tempdir_in(".").unwrap();
        fs::write(
            temp_data.path().join(CONFIG_FILE),
            "{ color_scheme: 'dark', // trailing comment\n}",
        )
        .unwrap();
        let data_dir = temp_data.path().to_str().unwrap();

        let config = load(&["test-config", "--data-dir", data_dir]);
        assert_eq!(config.config.color_scheme, ColorScheme::Dark);

        // the command line wins over the file
        let config = load(&["test-config", "--data-dir", data_dir, "--color-scheme", "light"]);
        assert_eq!(config.config.color_scheme, ColorScheme::Light);
    }

    #[test]
    fn broken_config_file() {
        let temp_data = tempdir_in(".").unwrap();
        fs::write(temp_data.path().join(CONFIG_FILE), "{ color_scheme: 'purple' }").unwrap();
        let args = Cli::parse_from(["test-config", "--data-dir", temp_data.path().to_str().unwrap()]);
        assert!(Config::new(Some(ClapSource::new(&args))).is_err());
    }

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir_in(".").unwrap();

        temp_env::with_vars(
            [(
                format!("{}_DATA", PROJECT_NAME.clone()).as_str(),
                Some(temp_data.path().to_str().unwrap()),
            )],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
                assert_eq!(config.config.color_scheme, ColorScheme::Light);
            },
        );
    }
}
