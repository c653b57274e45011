//! Layered settings for the `tp` binary.
//!
//! Precedence, lowest to highest: built-in defaults, `textproc.toml` in the
//! working directory, `TEXTPROC_*` environment variables, command-line flags.

use crate::{
    context::{SingleCharGap, WordClass},
    format::OutputFormat,
};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "textproc.toml";
pub const ENV_PREFIX: &str = "TEXTPROC_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output format when `-f` is not given.
    pub format: OutputFormat,
    /// ANSI colors in console messages.
    pub color: bool,
    /// URL fetch timeout.
    pub timeout_secs: u64,
    pub word_class: WordClass,
    pub single_char_gap: SingleCharGap,
    /// `tracing` filter directive, e.g. `warn` or `textproc=debug`.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            color: true,
            timeout_secs: 5,
            word_class: WordClass::Unicode,
            single_char_gap: SingleCharGap::Space,
            log: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load from `textproc.toml` in the working directory and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(Path::new(CONFIG_FILE)).extract()
    }

    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load()?;
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                format = "txt"
                color = false
                word_class = "ascii"
                "#,
            )?;
            jail.set_env("TEXTPROC_COLOR", "true");
            jail.set_env("TEXTPROC_TIMEOUT_SECS", "10");

            let settings = Settings::load()?;
            assert_eq!(settings.format, OutputFormat::Txt);
            assert!(settings.color);
            assert_eq!(settings.timeout_secs, 10);
            assert_eq!(settings.word_class, WordClass::Ascii);
            assert_eq!(settings.single_char_gap, SingleCharGap::Space);
            Ok(())
        });
    }

    #[test]
    fn format_is_a_lenient_selector() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "format = \"TXT\"")?;
            assert_eq!(Settings::load()?.format, OutputFormat::Txt);

            jail.set_env("TEXTPROC_FORMAT", "xml");
            assert_eq!(Settings::load()?.format, OutputFormat::Csv);

            jail.set_env("TEXTPROC_FORMAT", "Txt");
            assert_eq!(Settings::load()?.format, OutputFormat::Txt);
            Ok(())
        });
    }

    #[test]
    fn invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "timeout_secs = \"soon\"")?;
            assert!(Settings::load().is_err());
            Ok(())
        });
    }
}
