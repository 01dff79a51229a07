//! The boundary to the storage layer that serves paged queries.

#[cfg(feature = "serde")]
use serde::{
  Deserialize,
  Serialize,
};

/// A data source that fills a destination with paged results.
///
/// `Ctx` is whatever the caller uses to carry deadlines or cancellation; the
/// dispatcher passes it through untouched. Implementations decide what
/// negative or zero limits and offsets mean.
pub trait Queryable<Ctx: ?Sized, Dest: ?Sized> {
  type Error;

  /// Fill `dest` with one page and return the total number of matches,
  /// ignoring `limit` and `offset`.
  fn hit(
    &mut self,
    ctx: &Ctx,
    limit: i64,
    offset: i64,
    dest: &mut Dest,
  ) -> Result<i64, Self::Error>;

  /// Fill `dest` with one page without counting.
  fn query(
    &mut self,
    ctx: &Ctx,
    limit: i64,
    offset: i64,
    dest: &mut Dest,
  ) -> Result<(), Self::Error>;
}

impl<Ctx, Dest, Q> Queryable<Ctx, Dest> for &mut Q
where
  Ctx: ?Sized,
  Dest: ?Sized,
  Q: Queryable<Ctx, Dest> + ?Sized,
{
  type Error = Q::Error;

  fn hit(
    &mut self,
    ctx: &Ctx,
    limit: i64,
    offset: i64,
    dest: &mut Dest,
  ) -> Result<i64, Self::Error> {
    (**self).hit(ctx, limit, offset, dest)
  }

  fn query(
    &mut self,
    ctx: &Ctx,
    limit: i64,
    offset: i64,
    dest: &mut Dest,
  ) -> Result<(), Self::Error> {
    (**self).query(ctx, limit, offset, dest)
  }
}

/// Where a page sits in the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pagination {
  offset: i64,
  limit:  i64,
  total:  i64,
}

impl Pagination {
  pub const fn new(offset: i64, limit: i64, total: i64) -> Self {
    Self {
      offset,
      limit,
      total,
    }
  }

  pub const fn offset(&self) -> i64 {
    self.offset
  }

  pub const fn limit(&self) -> i64 {
    self.limit
  }

  pub const fn total(&self) -> i64 {
    self.total
  }
}
