//! # the-options
//!
//! An ordered, typed option bag and a dispatcher that replays it through
//! handlers registered per key.
//!
//! ## Core Concepts
//!
//! - **Option bag**: ordered key/value store. Keys are unique; setting a key
//!   again replaces its value without moving it.
//! - **Values**: [`OptionValue`] is a closed set of scalar and list types.
//!   Nothing is checked when a value is stored.
//! - **Dispatcher**: maps each key to one typed handler. Processing walks the
//!   bag in insertion order, skips keys nobody registered for and stops at the
//!   first handler error.
//! - **Paged bag** (opt-in wrapper): adds `limit`/`offset` and hands them to a
//!   [`Queryable`] data source after dispatch.
//!
//! ## Basic Usage
//!
//! ```rust
//! use the_options::{
//!   OptionBag,
//!   OptionDispatcher,
//! };
//!
//! let mut bag = OptionBag::new();
//! bag
//!   .set("name", "abc")
//!   .set("created", vec![100_i64, 200])
//!   .set("ignored", true);
//!
//! let mut name = String::new();
//! let mut created = (0, 0);
//! let mut dispatcher = OptionDispatcher::new();
//! dispatcher
//!   .on_string("name", |value| {
//!     name = value.to_owned();
//!     Ok(())
//!   })
//!   .on_timestamp_range("created", |begin, end| {
//!     created = (begin, end);
//!     Ok(())
//!   });
//!
//! dispatcher.process(&bag).unwrap();
//! drop(dispatcher);
//!
//! assert_eq!(name, "abc");
//! assert_eq!(created, (100, 200));
//! ```
//!
//! ## Errors
//!
//! Handlers return `Result<(), E>`, where `E` defaults to [`anyhow::Error`].
//! The first error aborts processing and is returned unchanged.
//!
//! Registering a handler for the wrong value type is a bug rather than a
//! runtime condition, so [`OptionDispatcher::process`] panics on it.
//! [`OptionDispatcher::try_process`] reports it as
//! [`ProcessError::Mismatch`] instead.
//!
//! ## Pagination
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use the_options::{
//!   OptionKey,
//!   PagedOptionBag,
//!   PagedOptionDispatcher,
//!   Queryable,
//! };
//!
//! struct Numbers;
//!
//! impl Queryable<(), Vec<i64>> for Numbers {
//!   type Error = Infallible;
//!
//!   fn hit(
//!     &mut self,
//!     ctx: &(),
//!     limit: i64,
//!     offset: i64,
//!     dest: &mut Vec<i64>,
//!   ) -> Result<i64, Infallible> {
//!     self.query(ctx, limit, offset, dest)?;
//!     Ok(100)
//!   }
//!
//!   fn query(
//!     &mut self,
//!     _: &(),
//!     limit: i64,
//!     offset: i64,
//!     dest: &mut Vec<i64>,
//!   ) -> Result<(), Infallible> {
//!     dest.extend(offset..offset + limit);
//!     Ok(())
//!   }
//! }
//!
//! let bag = PagedOptionBag::new().with_limit(3).with_offset(10);
//! let mut dispatcher: PagedOptionDispatcher<'_, OptionKey, Infallible> =
//!   PagedOptionDispatcher::default();
//! let mut page = Vec::new();
//! let pagination = dispatcher.paginate(&bag, &(), &mut Numbers, &mut page).unwrap();
//!
//! assert_eq!(page, vec![10, 11, 12]);
//! assert_eq!(pagination.total(), 100);
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for bags, keys, values and
//!   [`Pagination`].

#[macro_use]
mod handler;

mod bag;
mod dispatch;
mod error;
mod key;
mod paged;
mod query;
mod value;

pub use bag::{
  OptionBag,
  OptionEntry,
};
pub use dispatch::OptionDispatcher;
pub use error::{
  ProcessError,
  TypeMismatch,
};
pub use key::OptionKey;
pub use paged::{
  PagedOptionBag,
  PagedOptionDispatcher,
};
pub use query::{
  Pagination,
  Queryable,
};
pub use value::{
  OptionValue,
  ValueKind,
  timestamp_range,
};
