//! Hotkey combination value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::KeyComboParseError;

/// Modifier keys in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Cmd,
    Ctrl,
    Alt,
    Shift,
}

impl Modifier {
    const ALL: [Modifier; 4] = [Self::Cmd, Self::Ctrl, Self::Alt, Self::Shift];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "cmd" | "super" | "meta" => Some(Self::Cmd),
            "ctrl" | "control" => Some(Self::Ctrl),
            "alt" | "option" | "opt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            _ => None,
        }
    }
}

/// A hotkey combination: one or more modifiers plus a key, written as
/// e.g. `"cmd+ctrl+alt+l"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    modifiers: Vec<Modifier>,
    key: char,
}

impl KeyCombo {
    /// Create a combo. Modifiers are deduplicated and stored in
    /// canonical order; the key is lowercased.
    pub fn new(modifiers: &[Modifier], key: char) -> Self {
        let modifiers = Modifier::ALL
            .into_iter()
            .filter(|m| modifiers.contains(m))
            .collect();
        Self {
            modifiers,
            key: key.to_ascii_lowercase(),
        }
    }

    /// The default capture hotkey (cmd+ctrl+alt+l)
    pub fn default_capture() -> Self {
        Self::new(&[Modifier::Cmd, Modifier::Ctrl, Modifier::Alt], 'l')
    }

    /// The modifier set, in canonical order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// The non-modifier key
    pub fn key(&self) -> char {
        self.key
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{}+", m.as_str())?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = KeyComboParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || KeyComboParseError {
            input: s.to_string(),
        };

        let mut modifiers = Vec::new();
        let mut key = None;

        for part in s.trim().to_ascii_lowercase().split('+') {
            let part = part.trim();
            if let Some(m) = Modifier::parse(part) {
                modifiers.push(m);
            } else {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => {
                        if key.replace(c).is_some() {
                            return Err(err());
                        }
                    }
                    _ => return Err(err()),
                }
            }
        }

        match key {
            Some(k) if !modifiers.is_empty() => Ok(Self::new(&modifiers, k)),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capture_combo() {
        let combo = KeyCombo::default_capture();
        assert_eq!(combo.to_string(), "cmd+ctrl+alt+l");
    }

    #[test]
    fn parse_display_round_trip() {
        let combo: KeyCombo = "cmd+ctrl+alt+l".parse().unwrap();
        assert_eq!(combo.to_string().parse::<KeyCombo>().unwrap(), combo);
    }

    #[test]
    fn parse_normalizes_order_and_case() {
        let a: KeyCombo = "ALT+CMD+ctrl+L".parse().unwrap();
        let b: KeyCombo = "cmd+ctrl+alt+l".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_accepts_modifier_aliases() {
        let a: KeyCombo = "super+control+option+l".parse().unwrap();
        assert_eq!(a, KeyCombo::default_capture());
    }

    #[test]
    fn parse_rejects_missing_key() {
        assert!("cmd+ctrl".parse::<KeyCombo>().is_err());
    }

    #[test]
    fn parse_rejects_bare_key() {
        assert!("l".parse::<KeyCombo>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_modifier() {
        assert!("hyper+l".parse::<KeyCombo>().is_err());
    }

    #[test]
    fn parse_rejects_two_keys() {
        assert!("ctrl+a+b".parse::<KeyCombo>().is_err());
    }

    #[test]
    fn duplicate_modifiers_are_deduplicated() {
        let combo: KeyCombo = "ctrl+ctrl+x".parse().unwrap();
        assert_eq!(combo.modifiers(), &[Modifier::Ctrl]);
    }
}
