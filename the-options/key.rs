use std::fmt;

#[cfg(feature = "serde")]
use serde::{
  Deserialize,
  Serialize,
};

/// Default key type for option bags.
///
/// Keys are either strings or integers. Every integer width is normalized to
/// `i64`, so `1_i32` and `1_i64` name the same option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionKey {
  Int(i64),
  Str(String),
}

impl OptionKey {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Str(key) => Some(key),
      Self::Int(_) => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      Self::Int(key) => Some(*key),
      Self::Str(_) => None,
    }
  }
}

impl fmt::Display for OptionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int(key) => write!(f, "{key}"),
      Self::Str(key) => f.write_str(key),
    }
  }
}

impl From<&str> for OptionKey {
  fn from(key: &str) -> Self {
    Self::Str(key.to_owned())
  }
}

impl From<&String> for OptionKey {
  fn from(key: &String) -> Self {
    Self::Str(key.clone())
  }
}

impl From<String> for OptionKey {
  fn from(key: String) -> Self {
    Self::Str(key)
  }
}

impl From<i32> for OptionKey {
  fn from(key: i32) -> Self {
    Self::Int(key.into())
  }
}

impl From<u32> for OptionKey {
  fn from(key: u32) -> Self {
    Self::Int(key.into())
  }
}

impl From<i64> for OptionKey {
  fn from(key: i64) -> Self {
    Self::Int(key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn integer_widths_normalize_to_one_key() {
    assert_eq!(OptionKey::from(123_i32), OptionKey::from(123_i64));
    assert_eq!(OptionKey::from(123_u32), OptionKey::Int(123));
  }

  #[test]
  fn string_and_integer_keys_are_distinct() {
    assert_ne!(OptionKey::from("1"), OptionKey::from(1));
    assert_eq!(OptionKey::from("1").as_str(), Some("1"));
    assert_eq!(OptionKey::from(1).as_int(), Some(1));
  }

  #[test]
  fn display_is_the_raw_key() {
    assert_eq!(OptionKey::from("test_key").to_string(), "test_key");
    assert_eq!(OptionKey::from(-7).to_string(), "-7");
  }
}
