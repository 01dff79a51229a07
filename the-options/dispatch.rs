//! Key-indexed dispatch of option bags through typed handlers.

use std::{
  collections::HashMap,
  fmt,
  hash::Hash,
};

use crate::{
  bag::OptionBag,
  error::{
    ProcessError,
    TypeMismatch,
  },
  handler::Handler,
  key::OptionKey,
  value::ValueKind,
};

/// Replays the options of a bag through handlers registered per key.
///
/// Each key maps to exactly one handler, and every handler declares the
/// value type it expects through the `on_*` method it was registered with.
/// [`process`](Self::process) walks the bag in insertion order, skips keys
/// without a handler and stops at the first handler error.
///
/// The dispatcher never holds on to a bag: it reads whatever the bag contains
/// at the time of each call.
pub struct OptionDispatcher<'h, K = OptionKey, E = anyhow::Error> {
  handlers: HashMap<K, Handler<'h, E>>,
}

impl<K, E> Default for OptionDispatcher<'_, K, E> {
  fn default() -> Self {
    Self {
      handlers: HashMap::new(),
    }
  }
}

impl<K: fmt::Debug, E> fmt::Debug for OptionDispatcher<'_, K, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
      .entries(
        self
          .handlers
          .iter()
          .map(|(key, handler)| (key, handler.expects())),
      )
      .finish()
  }
}

impl OptionDispatcher<'_> {
  pub fn new() -> Self {
    Self::default()
  }
}

impl<'h, K, E> OptionDispatcher<'h, K, E>
where
  K: Eq + Hash + fmt::Debug,
{
  with_handler_types!(registration_methods!('h, K, E));

  pub(crate) fn register(&mut self, key: K, handler: Handler<'h, E>) -> &mut Self {
    let expects = handler.expects();
    if let Some(previous) = self.handlers.get(&key) {
      tracing::trace!(
        ?key,
        previous = %previous.expects(),
        replacement = %expects,
        "replacing option handler"
      );
    }
    self.handlers.insert(key, handler);
    self
  }

  /// Drop the handler registered for `key`, returning whether there was one.
  pub fn remove(&mut self, key: impl Into<K>) -> bool {
    self.handlers.remove(&key.into()).is_some()
  }

  pub fn is_registered(&self, key: impl Into<K>) -> bool {
    self.handlers.contains_key(&key.into())
  }

  /// The type tag the handler for `key` was registered with.
  pub fn expected_kind(&self, key: impl Into<K>) -> Option<ValueKind> {
    self.handlers.get(&key.into()).map(Handler::expects)
  }

  pub fn len(&self) -> usize {
    self.handlers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.handlers.is_empty()
  }

  /// Replay `bag` through the registered handlers.
  ///
  /// Returns the first handler error unchanged; later options are not
  /// visited.
  ///
  /// # Panics
  ///
  /// Panics when an option's value does not have the type its handler was
  /// registered for. Use [`try_process`](Self::try_process) to get the
  /// mismatch back as an error instead.
  #[track_caller]
  pub fn process(&mut self, bag: &OptionBag<K>) -> Result<(), E> {
    match self.try_process(bag) {
      Ok(()) => Ok(()),
      Err(ProcessError::Handler(err)) => Err(err),
      Err(ProcessError::Mismatch(mismatch)) => {
        tracing::error!(
          key = %mismatch.key,
          expected = %mismatch.expected,
          found = %mismatch.found,
          "option handler registered for the wrong value type"
        );
        panic!("{mismatch}");
      },
    }
  }

  /// Like [`process`](Self::process), but reports type mismatches as
  /// [`ProcessError::Mismatch`] instead of panicking.
  pub fn try_process(&mut self, bag: &OptionBag<K>) -> Result<(), ProcessError<E>> {
    for entry in bag {
      let Some(handler) = self.handlers.get_mut(entry.key()) else {
        tracing::trace!(key = ?entry.key(), "no handler for option, skipping");
        continue;
      };

      tracing::trace!(key = ?entry.key(), kind = %handler.expects(), "dispatching option");
      match handler.invoke(entry.value()) {
        Some(result) => result.map_err(ProcessError::Handler)?,
        None => {
          return Err(ProcessError::Mismatch(TypeMismatch {
            key:      format!("{:?}", entry.key()),
            expected: handler.expects(),
            found:    entry.value().kind(),
          }));
        },
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reregistering_a_key_replaces_its_handler() {
    let mut dispatcher = OptionDispatcher::new();
    dispatcher
      .on_string("k", |_| Ok(()))
      .on_int64("k", |_| Ok(()));

    assert_eq!(dispatcher.len(), 1);
    assert_eq!(dispatcher.expected_kind("k"), Some(ValueKind::Int64));
  }

  #[test]
  fn remove_forgets_the_handler() {
    let mut dispatcher = OptionDispatcher::new();
    dispatcher.on_bool("flag", |_| Ok(()));

    assert!(dispatcher.is_registered("flag"));
    assert!(dispatcher.remove("flag"));
    assert!(!dispatcher.remove("flag"));
    assert!(dispatcher.is_empty());
  }

  #[test]
  fn debug_lists_expected_kinds() {
    let mut dispatcher = OptionDispatcher::new();
    dispatcher.on_timestamp_range("range", |_, _| Ok(()));

    assert_eq!(format!("{dispatcher:?}"), r#"{Str("range"): TimestampRange}"#);
  }

  #[test]
  fn mismatch_is_reported_without_calling_the_handler() {
    let bag = OptionBag::new().with_option("n", 1_i64);
    let mut called = false;
    let mut dispatcher = OptionDispatcher::new();
    dispatcher.on_uint64("n", |_| {
      called = true;
      Ok(())
    });

    let err = dispatcher.try_process(&bag).unwrap_err();
    drop(dispatcher);

    assert!(!called);
    match err {
      ProcessError::Mismatch(mismatch) => {
        assert_eq!(mismatch.expected, ValueKind::Uint64);
        assert_eq!(mismatch.found, ValueKind::Int64);
      },
      ProcessError::Handler(err) => panic!("unexpected handler error: {err}"),
    }
  }

  #[test]
  #[should_panic(expected = "expects uint64")]
  fn process_panics_on_mismatch() {
    let bag = OptionBag::new().with_option("n", 1_i64);
    let mut dispatcher = OptionDispatcher::new();
    dispatcher.on_uint64("n", |_| Ok(()));
    let _ = dispatcher.process(&bag);
  }
}
