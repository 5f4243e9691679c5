use crate::error::PolicyError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An operation a caller wants to perform on a resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Delete,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Read, Action::Write, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
        }
    }

    /// Single-letter code used in legacy `rwd` strings.
    pub fn code(self) -> char {
        match self {
            Action::Read => 'r',
            Action::Write => 'w',
            Action::Delete => 'd',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'r' => Some(Action::Read),
            'w' => Some(Action::Write),
            'd' => Some(Action::Delete),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Action::Read => 0b001,
            Action::Write => 0b010,
            Action::Delete => 0b100,
        }
    }
}

impl FromStr for Action {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" | "r" => Ok(Action::Read),
            "write" | "w" => Ok(Action::Write),
            "delete" | "d" => Ok(Action::Delete),
            _ => Err(PolicyError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size set of granted actions.
///
/// Serialized as its `rwd` letter code so stored permission records keep
/// their familiar shape.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b111)
    }

    /// Returns `true` if the action was not already present.
    pub fn insert(&mut self, action: Action) -> bool {
        let added = !self.contains(action);
        self.0 |= action.bit();
        added
    }

    /// Returns `true` if the action was present.
    pub fn remove(&mut self, action: Action) -> bool {
        let present = self.contains(action);
        self.0 &= !action.bit();
        present
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> {
        let set = *self;
        Action::ALL.into_iter().filter(move |a| set.contains(*a))
    }

    /// Parse a letter-code string such as `"rw"`.
    ///
    /// Every character must be one of `r`, `w`, `d`. Repeated letters are
    /// accepted; anything else is rejected instead of silently ignored.
    pub fn from_rwd(code: &str) -> Result<Self, PolicyError> {
        let mut set = Self::empty();
        for c in code.chars() {
            let action = Action::from_code(c).ok_or_else(|| PolicyError::InvalidAccessCode {
                code: code.to_string(),
                found: c,
            })?;
            set.insert(action);
        }
        Ok(set)
    }

    /// Canonical letter code, always in `r`, `w`, `d` order.
    pub fn to_rwd(&self) -> String {
        self.iter().map(Action::code).collect()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = Self::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for ActionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rwd())
    }
}

impl<'de> Deserialize<'de> for ActionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        ActionSet::from_rwd(&code).map_err(serde::de::Error::custom)
    }
}
