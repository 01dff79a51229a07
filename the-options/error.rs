use thiserror::Error;

use crate::value::ValueKind;

/// A stored value did not match the type its handler was registered with.
///
/// This is a programming error on the registering side, not a runtime
/// condition: [`OptionDispatcher::process`](crate::OptionDispatcher::process)
/// panics with it, while `try_process` hands it back for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("option {key} holds {found} but its handler expects {expected}")]
pub struct TypeMismatch {
  pub key:      String,
  pub expected: ValueKind,
  pub found:    ValueKind,
}

#[derive(Debug, Error)]
pub enum ProcessError<E> {
  #[error(transparent)]
  Mismatch(#[from] TypeMismatch),
  #[error("{0}")]
  Handler(E),
}

impl<E> ProcessError<E> {
  pub fn into_handler_error(self) -> Option<E> {
    match self {
      Self::Handler(err) => Some(err),
      Self::Mismatch(_) => None,
    }
  }
}
