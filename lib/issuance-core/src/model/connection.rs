use std::fmt;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::EnumString;

/// Connection state as reported by the issuing service.
///
/// Unknown values are kept verbatim so they can be logged and matched against
/// configured failure states.
#[derive(Clone, Debug, Eq, PartialEq, Hash, EnumString, SerializeDisplay, DeserializeFromStr)]
pub enum ConnectionStatus {
    #[strum(serialize = "not-yet-trusted")]
    NotYetTrusted,
    #[strum(serialize = "trusted")]
    Trusted,
    #[strum(default)]
    Other(String),
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotYetTrusted => "not-yet-trusted",
            Self::Trusted => "trusted",
            Self::Other(value) => value,
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
