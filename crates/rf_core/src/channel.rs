//! Channel names and per-channel maps.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

const MAX_CHANNEL_NAME_LEN: usize = 64;

/// Non-empty, trimmed, at most 64 chars, no control characters.
/// Spaces are allowed ("Music Streaming").
fn is_channel_name(s: &str) -> bool {
    !s.is_empty()
        && s.trim() == s
        && s.chars().count() <= MAX_CHANNEL_NAME_LEN
        && !s.chars().any(char::is_control)
}

/// A media channel label (e.g. "CTV", "Music Streaming").
///
/// Ordered lexicographically; `Borrow<str>` lets `ChannelMap` lookups take `&str`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if is_channel_name(&s) { Ok(Self(s)) } else { Err(CoreError::InvalidChannelName) }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChannelName {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for ChannelName {
    fn borrow(&self) -> &str { &self.0 }
}

impl AsRef<str> for ChannelName {
    fn as_ref(&self) -> &str { &self.0 }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ChannelName {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        ChannelName::new(s.clone()).map_err(|_| {
            D::Error::invalid_value(
                serde::de::Unexpected::Str(&s),
                &"channel name: trimmed, 1..=64 chars, no control characters",
            )
        })
    }
}

/// Per-channel values in deterministic (name) order.
pub type ChannelMap<T> = BTreeMap<ChannelName, T>;

/// Build a `ChannelMap` from `(&str, value)` pairs, rejecting invalid names.
pub fn channel_map<T, I, S>(pairs: I) -> Result<ChannelMap<T>, CoreError>
where
    I: IntoIterator<Item = (S, T)>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| ChannelName::new(k.as_ref()).map(|name| (name, v)))
        .collect()
}
