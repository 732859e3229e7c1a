use serde::{Deserialize, Serialize};

use crate::macros::impls_for_string_newtype;

#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ConnectionId(String);

impls_for_string_newtype!(ConnectionId);
