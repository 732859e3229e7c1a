use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::EnumString;

/// Single claim of a credential offer. Order within an offer is preserved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CredentialAttribute {
    pub name: String,
    pub value: String,
}

impl CredentialAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Credential exchange state as reported by the issuing service.
#[derive(Clone, Debug, Eq, PartialEq, Hash, EnumString, SerializeDisplay, DeserializeFromStr)]
pub enum CredentialState {
    #[strum(serialize = "offer-sent")]
    OfferSent,
    #[strum(serialize = "request-received")]
    RequestReceived,
    #[strum(serialize = "credential-issued")]
    CredentialIssued,
    #[strum(serialize = "done")]
    Done,
    #[strum(serialize = "declined")]
    Declined,
    #[strum(serialize = "abandoned")]
    Abandoned,
    #[strum(default)]
    Other(String),
}

impl CredentialState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OfferSent => "offer-sent",
            Self::RequestReceived => "request-received",
            Self::CredentialIssued => "credential-issued",
            Self::Done => "done",
            Self::Declined => "declined",
            Self::Abandoned => "abandoned",
            Self::Other(value) => value,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for CredentialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
