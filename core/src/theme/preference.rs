use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ThemeError;

/// The two themes the application can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 2] = [ThemePreference::Light, ThemePreference::Dark];

    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Map a "prefers dark" signal to a theme.
    pub fn from_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ThemeError::UnknownTheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok_eq};

    #[test]
    fn test_toggle_flips() {
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_whitespace() {
        assert_ok_eq!(" Dark ".parse::<ThemePreference>(), ThemePreference::Dark);
        assert_ok_eq!("LIGHT".parse::<ThemePreference>(), ThemePreference::Light);
        assert_err!("sepia".parse::<ThemePreference>());
        assert_err!("".parse::<ThemePreference>());
    }

    #[test]
    fn test_display_matches_parse() {
        for theme in ThemePreference::ALL {
            assert_ok_eq!(theme.to_string().parse::<ThemePreference>(), theme);
        }
    }

    #[test]
    fn test_from_dark() {
        assert!(ThemePreference::from_dark(true).is_dark());
        assert!(!ThemePreference::from_dark(false).is_dark());
    }
}
