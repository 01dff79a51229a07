//! Option values and the type tags used to dispatch them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{
  Deserialize,
  Serialize,
};

/// A dynamically typed option payload.
///
/// The bag stores whatever variant the producer chose. Its type is only
/// checked when a dispatcher replays it through a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
  feature = "serde",
  serde(tag = "type", content = "data", rename_all = "snake_case")
)]
pub enum OptionValue {
  #[default]
  None,
  Bool(bool),
  Int32(i32),
  Uint32(u32),
  Int64(i64),
  Uint64(u64),
  String(String),
  Int32List(Vec<i32>),
  Uint32List(Vec<u32>),
  Int64List(Vec<i64>),
  Uint64List(Vec<u64>),
  StringList(Vec<String>),
}

/// Type tag declaring what a handler expects.
///
/// Every [`OptionValue`] variant has a tag of the same name. Two tags exist
/// only on the dispatch side: `TimestampRange`, which decodes an `Int64List`
/// into a `(begin, end)` pair, and `Any`, which accepts every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
  None,
  Bool,
  Int32,
  Uint32,
  Int64,
  Uint64,
  String,
  Int32List,
  Uint32List,
  Int64List,
  Uint64List,
  StringList,
  TimestampRange,
  Any,
}

impl ValueKind {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Bool => "bool",
      Self::Int32 => "int32",
      Self::Uint32 => "uint32",
      Self::Int64 => "int64",
      Self::Uint64 => "uint64",
      Self::String => "string",
      Self::Int32List => "int32_list",
      Self::Uint32List => "uint32_list",
      Self::Int64List => "int64_list",
      Self::Uint64List => "uint64_list",
      Self::StringList => "string_list",
      Self::TimestampRange => "timestamp_range",
      Self::Any => "any",
    }
  }

  /// Whether a handler declared with this tag can receive `value`.
  pub fn accepts(self, value: &OptionValue) -> bool {
    match self {
      Self::None | Self::Any => true,
      Self::TimestampRange => matches!(value, OptionValue::Int64List(_)),
      kind => value.kind() == kind,
    }
  }
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl OptionValue {
  pub fn kind(&self) -> ValueKind {
    match self {
      Self::None => ValueKind::None,
      Self::Bool(_) => ValueKind::Bool,
      Self::Int32(_) => ValueKind::Int32,
      Self::Uint32(_) => ValueKind::Uint32,
      Self::Int64(_) => ValueKind::Int64,
      Self::Uint64(_) => ValueKind::Uint64,
      Self::String(_) => ValueKind::String,
      Self::Int32List(_) => ValueKind::Int32List,
      Self::Uint32List(_) => ValueKind::Uint32List,
      Self::Int64List(_) => ValueKind::Int64List,
      Self::Uint64List(_) => ValueKind::Uint64List,
      Self::StringList(_) => ValueKind::StringList,
    }
  }

  pub fn is_none(&self) -> bool {
    matches!(self, Self::None)
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Bool(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(value) => Some(value),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Int64(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_u64(&self) -> Option<u64> {
    match self {
      Self::Uint64(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_i64_list(&self) -> Option<&[i64]> {
    match self {
      Self::Int64List(values) => Some(values),
      _ => None,
    }
  }
}

/// Decode a timestamp range from its stored integer list.
///
/// Index 0 is the beginning and index 1 the end; a missing bound is 0 and
/// anything past the second element is ignored.
pub fn timestamp_range(values: &[i64]) -> (i64, i64) {
  let begin = values.first().copied().unwrap_or_default();
  let end = values.get(1).copied().unwrap_or_default();
  (begin, end)
}

macro_rules! impl_from {
  ($( $ty:ty => $variant:ident ),* $(,)?) => {
    $(
      impl From<$ty> for OptionValue {
        fn from(value: $ty) -> Self {
          Self::$variant(value)
        }
      }
    )*
  };
}

impl_from! {
  bool => Bool,
  i32 => Int32,
  u32 => Uint32,
  i64 => Int64,
  u64 => Uint64,
  String => String,
  Vec<i32> => Int32List,
  Vec<u32> => Uint32List,
  Vec<i64> => Int64List,
  Vec<u64> => Uint64List,
  Vec<String> => StringList,
}

impl From<()> for OptionValue {
  fn from(_: ()) -> Self {
    Self::None
  }
}

impl From<&str> for OptionValue {
  fn from(value: &str) -> Self {
    Self::String(value.to_owned())
  }
}

impl From<Vec<&str>> for OptionValue {
  fn from(values: Vec<&str>) -> Self {
    Self::StringList(values.into_iter().map(str::to_owned).collect())
  }
}

impl From<&[i64]> for OptionValue {
  fn from(values: &[i64]) -> Self {
    Self::Int64List(values.to_vec())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamp_range_decodes_positionally() {
    assert_eq!(timestamp_range(&[100, 200]), (100, 200));
    assert_eq!(timestamp_range(&[100]), (100, 0));
    assert_eq!(timestamp_range(&[]), (0, 0));
    assert_eq!(timestamp_range(&[100, 200, 300]), (100, 200));
  }

  #[test]
  fn kinds_accept_matching_variants_only() {
    assert!(ValueKind::Int32.accepts(&OptionValue::Int32(1)));
    assert!(!ValueKind::Int32.accepts(&OptionValue::Int64(1)));
    assert!(!ValueKind::Uint64.accepts(&OptionValue::Int64(1)));
    assert!(ValueKind::TimestampRange.accepts(&OptionValue::Int64List(vec![])));
    assert!(!ValueKind::TimestampRange.accepts(&OptionValue::Uint64List(vec![])));
  }

  #[test]
  fn none_and_any_accept_everything() {
    let values = [
      OptionValue::None,
      OptionValue::Bool(true),
      OptionValue::from("abc"),
      OptionValue::from(vec![1_u64, 2]),
    ];
    for value in &values {
      assert!(ValueKind::None.accepts(value));
      assert!(ValueKind::Any.accepts(value));
    }
  }

  #[test]
  fn conversions_pick_the_matching_variant() {
    assert_eq!(OptionValue::from(()), OptionValue::None);
    assert_eq!(OptionValue::from("x").kind(), ValueKind::String);
    assert_eq!(OptionValue::from(vec!["a", "b"]).kind(), ValueKind::StringList);
    assert_eq!(OptionValue::from(7_u32).kind(), ValueKind::Uint32);
    assert_eq!(OptionValue::from(vec![1_i32]).kind(), ValueKind::Int32List);
  }

  #[cfg(feature = "serde")]
  #[test]
  fn serializes_with_type_tag() {
    let json = serde_json::to_value(OptionValue::from(vec![1_i64, 2])).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "int64_list", "data": [1, 2] }));

    let json = serde_json::to_value(OptionValue::None).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "none" }));

    let value: OptionValue =
      serde_json::from_value(serde_json::json!({ "type": "string", "data": "abc" })).unwrap();
    assert_eq!(value, OptionValue::from("abc"));
  }
}
