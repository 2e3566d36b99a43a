//! ANSI styling for terminal output.
//!
//! Roles rather than hues, so commands agree on what a color means:
//! - `kind`: node kinds and rule names
//! - `text`: source text and literals
//! - `dim`: spans, fields, punctuation
//! - `ok` / `error`: verification outcome

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub kind: &'static str,
    pub text: &'static str,
    pub dim: &'static str,
    pub ok: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        kind: "\x1b[34m",
        text: "\x1b[32m",
        dim: "\x1b[2m",
        ok: "\x1b[1;32m",
        error: "\x1b[1;31m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        kind: "",
        text: "",
        dim: "",
        ok: "",
        error: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wrap `s` in `color` and a reset, or return it untouched when disabled.
    pub fn paint(&self, color: &str, s: &str) -> String {
        if color.is_empty() {
            s.to_owned()
        } else {
            format!("{color}{s}{}", self.reset)
        }
    }
}
