use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use crate::menu::Menu;
use crate::orders::DeliveryWindow;

const ENV_PREFIX: &str = "BIRYANI_";

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub delivery: DeliveryWindow,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct MenuConfig {
    /// Catalog file; the house specials are served when unset.
    pub path: Option<PathBuf>,
}

/// Settings that may be overridden from `BIRYANI_*` environment variables.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct EnvOverrides {
    pub menu_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    modules: HashMap<String, LogLevel>,
    timestamp_nanos: bool,
}

impl Config {
    pub fn apply(&mut self, overrides: EnvOverrides) {
        if let Some(path) = overrides.menu_path {
            debug!("Menu path from environment: {:?}", path);
            self.menu.path = Some(path);
        }
    }
}

impl MenuConfig {
    pub(crate) fn build(&self) -> Result<Menu> {
        debug!("Build menu from {:?}", self);
        match self.path {
            Some(ref path) => Menu::from_toml_file(path),
            None => Menu::house_specials(),
        }
    }
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env()
            .context("read environment overrides")
    }
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_config_serves_house_specials() {
        let config: Config = toml::from_str("").expect("parse config");
        assert_eq!(config.menu.path, None);
        assert_eq!(config.delivery, DeliveryWindow::default());

        let menu = config.menu.build().expect("menu");
        assert_eq!(menu.len(), 6);
    }

    #[test]
    fn reads_menu_path_and_delivery_window() {
        let config: Config = toml::from_str(
            r#"
            [menu]
            path = "/srv/biryani/menu.toml"

            [delivery]
            min_minutes = 20
            max_minutes = 35
            "#,
        )
        .expect("parse config");

        assert_eq!(config.menu.path, Some(PathBuf::from("/srv/biryani/menu.toml")));
        assert_eq!(config.delivery, DeliveryWindow::new(20, 35).expect("window"));
    }

    #[test]
    fn rejects_a_backwards_delivery_window() {
        let err = toml::from_str::<Config>(
            r#"
            [delivery]
            min_minutes = 60
            max_minutes = 5
            "#,
        )
        .expect_err("backwards window");
        assert!(err.to_string().contains("runs backwards"), "{}", err);
    }

    #[test]
    fn missing_menu_file_is_reported() {
        let config = MenuConfig {
            path: Some(PathBuf::from("/nonexistent/biryani/menu.toml")),
        };
        let err = config.build().expect_err("missing file");
        assert!(format!("{:#}", err).contains("read menu"), "{:#}", err);
    }

    #[test]
    fn environment_overrides_menu_path() {
        let vars = vec![(
            "BIRYANI_MENU_PATH".to_string(),
            "/tmp/menu.toml".to_string(),
        )];
        let overrides: EnvOverrides = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .expect("overrides");

        let mut config = Config::default();
        config.apply(overrides);

        assert_eq!(config.menu.path, Some(PathBuf::from("/tmp/menu.toml")));
    }

    #[test]
    fn no_overrides_leave_config_alone() {
        let overrides: EnvOverrides = envy::prefixed(ENV_PREFIX)
            .from_iter(Vec::<(String, String)>::new())
            .expect("overrides");
        assert_eq!(overrides, EnvOverrides::default());
    }

    #[test]
    fn logger_section_parses() {
        let logger: EnvLogger = toml::from_str(
            r#"
            level = "info"
            timestamp_nanos = true
            [modules]
            biryani = "debug"
            "#,
        )
        .expect("parse logger");
        assert!(logger.timestamp_nanos);
        assert_eq!(
            logger.modules.get("biryani").map(|l| l.to_filter()),
            Some(log::LevelFilter::Debug)
        );
    }
}
