//! Typed handler slots and the macros that generate them.
//!
//! The list of supported handler types lives in `with_handler_types!`.
//! Everything that has one item per type (the handler enum, the `on_*`
//! registration methods of both dispatchers) is generated from it.

use crate::value::{
  OptionValue,
  ValueKind,
  timestamp_range,
};

/// Feed the handler type list to another macro.
///
/// Each entry is `name => Variant(args)`: `name` becomes the `on_<name>`
/// registration method, `Variant` the [`ValueKind`] and handler variant, and
/// `args` the callback signature.
macro_rules! with_handler_types {
  ($mac:ident ! ( $($prefix:tt)* )) => {
    $mac! {
      $($prefix)* ;
      none => None(),
      bool => Bool(bool),
      int32 => Int32(i32),
      uint32 => Uint32(u32),
      int64 => Int64(i64),
      uint64 => Uint64(u64),
      string => String(&str),
      int32_list => Int32List(&[i32]),
      uint32_list => Uint32List(&[u32]),
      int64_list => Int64List(&[i64]),
      uint64_list => Uint64List(&[u64]),
      string_list => StringList(&[String]),
      timestamp_range => TimestampRange(i64, i64),
      any => Any(&$crate::value::OptionValue),
    }
  };
}

macro_rules! define_handler_enum {
  (; $( $name:ident => $variant:ident ( $($arg:ty),* ) ),* $(,)?) => {
    /// A registered handler together with the type it expects.
    pub(crate) enum Handler<'h, E> {
      $(
        $variant(Box<dyn FnMut($($arg),*) -> Result<(), E> + 'h>),
      )*
    }

    impl<E> Handler<'_, E> {
      pub(crate) fn expects(&self) -> ValueKind {
        match self {
          $( Self::$variant(_) => ValueKind::$variant, )*
        }
      }
    }
  };
}

/// Generates one `on_<type>` registration method per handler type.
///
/// Expanded inside an impl block that provides
/// `fn register(&mut self, key: K, handler: Handler<'h, E>) -> &mut Self`.
macro_rules! registration_methods {
  (
    $lt:lifetime, $key:ident, $err:ident ;
    $( $name:ident => $variant:ident ( $($arg:ty),* ) ),* $(,)?
  ) => {
    ::paste::paste! {
      $(
        #[doc = "Register a `" $name "` handler for `key`, replacing any existing one."]
        pub fn [<on_ $name>]<F>(&mut self, key: impl Into<$key>, handler: F) -> &mut Self
        where
          F: FnMut($($arg),*) -> Result<(), $err> + $lt,
        {
          self.register(key.into(), $crate::handler::Handler::$variant(Box::new(handler)))
        }
      )*
    }
  };
}

with_handler_types!(define_handler_enum!());

impl<E> Handler<'_, E> {
  /// Coerce `value` to this handler's type and invoke it.
  ///
  /// Returns `None` without calling anything when the value has the wrong
  /// type.
  pub(crate) fn invoke(&mut self, value: &OptionValue) -> Option<Result<(), E>> {
    let result = match (self, value) {
      (Self::None(f), _) => f(),
      (Self::Any(f), value) => f(value),
      (Self::Bool(f), OptionValue::Bool(v)) => f(*v),
      (Self::Int32(f), OptionValue::Int32(v)) => f(*v),
      (Self::Uint32(f), OptionValue::Uint32(v)) => f(*v),
      (Self::Int64(f), OptionValue::Int64(v)) => f(*v),
      (Self::Uint64(f), OptionValue::Uint64(v)) => f(*v),
      (Self::String(f), OptionValue::String(v)) => f(v),
      (Self::Int32List(f), OptionValue::Int32List(v)) => f(v),
      (Self::Uint32List(f), OptionValue::Uint32List(v)) => f(v),
      (Self::Int64List(f), OptionValue::Int64List(v)) => f(v),
      (Self::Uint64List(f), OptionValue::Uint64List(v)) => f(v),
      (Self::StringList(f), OptionValue::StringList(v)) => f(v),
      (Self::TimestampRange(f), OptionValue::Int64List(v)) => {
        let (begin, end) = timestamp_range(v);
        f(begin, end)
      },
      _ => return None,
    };
    Some(result)
  }
}
