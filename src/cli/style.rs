use crate::config::Settings;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Console colors. All methods return the text unchanged when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const PLAIN: Palette = Palette { enabled: false };
    pub const ANSI: Palette = Palette { enabled: true };

    /// Colors unless turned off in settings or by a non-empty `NO_COLOR`.
    pub fn from_settings(settings: &Settings) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(settings.color && !no_color)
    }

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn ok(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn fail(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn warn(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_passthrough() {
        assert_eq!(Palette::PLAIN.warn("careful"), "careful");
        assert_eq!(Palette::PLAIN.bold("A"), "A");
    }

    #[test]
    fn ansi_wraps_and_resets() {
        assert_eq!(Palette::ANSI.fail("no"), "\x1b[31mno\x1b[0m");
        assert!(Palette::ANSI.ok("done").ends_with(RESET));
    }

    #[test]
    fn settings_can_disable_colors() {
        let settings = Settings {
            color: false,
            ..Settings::default()
        };
        assert_eq!(Palette::from_settings(&settings), Palette::PLAIN);
    }
}
