//! Engine identity recorded alongside every run's artifacts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineIdentity {
    pub name: String,
    pub version: String,
}
