//! Option bags and dispatchers for paged queries.

use std::{
  fmt,
  hash::Hash,
};

#[cfg(feature = "serde")]
use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  bag::{
    OptionBag,
    OptionEntry,
  },
  dispatch::OptionDispatcher,
  error::ProcessError,
  handler::Handler,
  key::OptionKey,
  query::{
    Pagination,
    Queryable,
  },
  value::OptionValue,
};

/// An option bag that also carries a page window.
///
/// `limit` and `offset` are passed to the data source as-is; no range is
/// enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
  feature = "serde",
  serde(bound(deserialize = "K: Deserialize<'de> + Eq + Hash + Clone"))
)]
pub struct PagedOptionBag<K = OptionKey> {
  limit:   i64,
  offset:  i64,
  options: OptionBag<K>,
}

impl<K> Default for PagedOptionBag<K> {
  fn default() -> Self {
    Self {
      limit:   0,
      offset:  0,
      options: OptionBag::default(),
    }
  }
}

impl PagedOptionBag {
  pub fn new() -> Self {
    Self::default()
  }
}

impl<K> PagedOptionBag<K> {
  pub fn from_bag(options: OptionBag<K>) -> Self {
    Self {
      limit: 0,
      offset: 0,
      options,
    }
  }

  pub fn limit(&self) -> i64 {
    self.limit
  }

  pub fn offset(&self) -> i64 {
    self.offset
  }

  pub fn set_limit(&mut self, limit: i64) -> &mut Self {
    self.limit = limit;
    self
  }

  pub fn set_offset(&mut self, offset: i64) -> &mut Self {
    self.offset = offset;
    self
  }

  pub fn with_limit(mut self, limit: i64) -> Self {
    self.limit = limit;
    self
  }

  pub fn with_offset(mut self, offset: i64) -> Self {
    self.offset = offset;
    self
  }

  pub fn options(&self) -> &OptionBag<K> {
    &self.options
  }

  pub fn into_options(self) -> OptionBag<K> {
    self.options
  }
}

impl<K> PagedOptionBag<K>
where
  K: Eq + Hash + Clone,
{
  pub fn set(&mut self, key: impl Into<K>, value: impl Into<OptionValue>) -> &mut Self {
    self.options.set(key, value);
    self
  }

  pub fn with_option(mut self, key: impl Into<K>, value: impl Into<OptionValue>) -> Self {
    self.options.set(key, value);
    self
  }

  pub fn get(&self, key: impl Into<K>) -> Option<&OptionEntry<K>> {
    self.options.get(key)
  }

  pub fn value(&self, key: impl Into<K>) -> Option<&OptionValue> {
    self.options.value(key)
  }

  /// See [`OptionBag::copy_from`].
  pub fn copy_from(
    &mut self,
    other: &impl AsRef<OptionBag<K>>,
    own_key: impl Into<K>,
    other_key: impl Into<K>,
  ) -> &mut Self {
    self.options.copy_from(other, own_key, other_key);
    self
  }
}

impl<K> AsRef<OptionBag<K>> for PagedOptionBag<K> {
  fn as_ref(&self) -> &OptionBag<K> {
    &self.options
  }
}

impl<K> From<OptionBag<K>> for PagedOptionBag<K> {
  fn from(options: OptionBag<K>) -> Self {
    Self::from_bag(options)
  }
}

/// An [`OptionDispatcher`] that finishes by querying a data source.
///
/// Both [`paginate`](Self::paginate) and [`query_only`](Self::query_only)
/// replay the bag's options first, so handlers can prepare whatever state
/// the data source reads, and only then fetch with the bag's limit and
/// offset.
pub struct PagedOptionDispatcher<'h, K = OptionKey, E = anyhow::Error> {
  dispatcher: OptionDispatcher<'h, K, E>,
}

impl<K, E> Default for PagedOptionDispatcher<'_, K, E> {
  fn default() -> Self {
    Self {
      dispatcher: OptionDispatcher::default(),
    }
  }
}

impl<K: fmt::Debug, E> fmt::Debug for PagedOptionDispatcher<'_, K, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PagedOptionDispatcher")
      .field("handlers", &self.dispatcher)
      .finish()
  }
}

impl PagedOptionDispatcher<'_> {
  pub fn new() -> Self {
    Self::default()
  }
}

impl<'h, K, E> From<OptionDispatcher<'h, K, E>> for PagedOptionDispatcher<'h, K, E> {
  fn from(dispatcher: OptionDispatcher<'h, K, E>) -> Self {
    Self { dispatcher }
  }
}

impl<'h, K, E> PagedOptionDispatcher<'h, K, E>
where
  K: Eq + Hash + fmt::Debug,
{
  with_handler_types!(registration_methods!('h, K, E));

  fn register(&mut self, key: K, handler: Handler<'h, E>) -> &mut Self {
    self.dispatcher.register(key, handler);
    self
  }

  pub fn dispatcher(&self) -> &OptionDispatcher<'h, K, E> {
    &self.dispatcher
  }

  pub fn dispatcher_mut(&mut self) -> &mut OptionDispatcher<'h, K, E> {
    &mut self.dispatcher
  }

  pub fn into_dispatcher(self) -> OptionDispatcher<'h, K, E> {
    self.dispatcher
  }

  /// Replay the bag's options. See [`OptionDispatcher::process`].
  #[track_caller]
  pub fn process(&mut self, bag: &PagedOptionBag<K>) -> Result<(), E> {
    self.dispatcher.process(bag.options())
  }

  pub fn try_process(&mut self, bag: &PagedOptionBag<K>) -> Result<(), ProcessError<E>> {
    self.dispatcher.try_process(bag.options())
  }

  /// Replay the options, then fetch a page and the total match count.
  ///
  /// The returned pagination echoes the bag's limit and offset and carries
  /// the total reported by `source`. If a handler fails, `source` is never
  /// called.
  ///
  /// # Panics
  ///
  /// Panics on a handler type mismatch, like [`OptionDispatcher::process`].
  #[track_caller]
  pub fn paginate<Ctx, Dest, Q>(
    &mut self,
    bag: &PagedOptionBag<K>,
    ctx: &Ctx,
    source: &mut Q,
    dest: &mut Dest,
  ) -> Result<Pagination, E>
  where
    Ctx: ?Sized,
    Dest: ?Sized,
    Q: Queryable<Ctx, Dest> + ?Sized,
    E: From<Q::Error>,
  {
    self.process(bag)?;

    let (limit, offset) = (bag.limit(), bag.offset());
    let total = source.hit(ctx, limit, offset, dest)?;
    tracing::debug!(limit, offset, total, "paginated query");
    Ok(Pagination::new(offset, limit, total))
  }

  /// Replay the options, then fetch a page without counting.
  ///
  /// # Panics
  ///
  /// Panics on a handler type mismatch, like [`OptionDispatcher::process`].
  #[track_caller]
  pub fn query_only<Ctx, Dest, Q>(
    &mut self,
    bag: &PagedOptionBag<K>,
    ctx: &Ctx,
    source: &mut Q,
    dest: &mut Dest,
  ) -> Result<(), E>
  where
    Ctx: ?Sized,
    Dest: ?Sized,
    Q: Queryable<Ctx, Dest> + ?Sized,
    E: From<Q::Error>,
  {
    self.process(bag)?;

    let (limit, offset) = (bag.limit(), bag.offset());
    source.query(ctx, limit, offset, dest)?;
    tracing::debug!(limit, offset, "query without count");
    Ok(())
  }
}
