//! Loading and mutating grid data.
//!
//! Grids never fetch on their own. The application hands a grid a
//! [`DataSource`]; [`Model::load`](crate::grid::Model::load) turns a query
//! into a [`Cmd`] whose result comes back as a [`RowsLoadedMsg`]. Every
//! request carries a tag, and the grid only accepts the result of the latest
//! request it issued, so a slow response to an old query can never overwrite
//! a newer one.
//!
//! Mutations go through a [`RecordMutator`]. A successful mutation emits an
//! [`InvalidateMsg`] that makes the grid re-run its last query.
//!
//! ```rust
//! use patient_grid::fetch::{BoxFuture, DataSource};
//! use patient_grid::FetchError;
//!
//! #[derive(Clone)]
//! struct Note(String);
//!
//! let source = |query: Option<String>| -> BoxFuture<Result<Vec<Note>, FetchError>> {
//!     Box::pin(async move { Ok(vec![Note(query.unwrap_or_default())]) })
//! };
//! let _ = source.fetch(Some("cardiology".into()));
//! ```

use crate::error::FetchError;
use bubbletea_rs::{Cmd, Msg};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed, sendable future.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Something that can produce the rows of a grid for a query.
///
/// The query is opaque to the grid (a patient id, a search term, a REST
/// path); `None` means "everything".
pub trait DataSource<R>: Send + Sync {
    fn fetch(&self, query: Option<String>) -> BoxFuture<Result<Vec<R>, FetchError>>;
}

impl<R, F> DataSource<R> for F
where
    F: Fn(Option<String>) -> BoxFuture<Result<Vec<R>, FetchError>> + Send + Sync,
{
    fn fetch(&self, query: Option<String>) -> BoxFuture<Result<Vec<R>, FetchError>> {
        self(query)
    }
}

/// Adapts a transport that returns JSON bodies into a typed data source.
///
/// A body of `null` decodes to no rows.
pub struct JsonDataSource<R, F> {
    transport: F,
    _rows: PhantomData<fn() -> R>,
}

impl<R, F> JsonDataSource<R, F>
where
    F: Fn(Option<String>) -> BoxFuture<Result<String, FetchError>> + Send + Sync,
{
    pub fn new(transport: F) -> Self {
        Self {
            transport,
            _rows: PhantomData,
        }
    }
}

impl<R, F> DataSource<R> for JsonDataSource<R, F>
where
    R: DeserializeOwned + Send + 'static,
    F: Fn(Option<String>) -> BoxFuture<Result<String, FetchError>> + Send + Sync,
{
    fn fetch(&self, query: Option<String>) -> BoxFuture<Result<Vec<R>, FetchError>> {
        let body = (self.transport)(query);
        Box::pin(async move { decode_rows(&body.await?) })
    }
}

/// Decodes a JSON array of rows; `null` is an empty collection.
pub fn decode_rows<R: DeserializeOwned>(body: &str) -> Result<Vec<R>, FetchError> {
    let rows: Option<Vec<R>> = serde_json::from_str(body)?;
    Ok(rows.unwrap_or_default())
}

/// A change to one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<R> {
    Create(R),
    Update(R),
    Delete(String),
}

/// Persists record changes.
pub trait RecordMutator<R>: Send + Sync {
    fn create(&self, record: R) -> BoxFuture<Result<(), FetchError>>;
    fn update(&self, record: R) -> BoxFuture<Result<(), FetchError>>;
    fn delete(&self, id: String) -> BoxFuture<Result<(), FetchError>>;

    fn apply(&self, mutation: Mutation<R>) -> BoxFuture<Result<(), FetchError>> {
        match mutation {
            Mutation::Create(record) => self.create(record),
            Mutation::Update(record) => self.update(record),
            Mutation::Delete(id) => self.delete(id),
        }
    }
}

/// Result of a load issued by the grid with id `grid_id`.
#[derive(Debug, Clone)]
pub struct RowsLoadedMsg<R> {
    pub grid_id: i64,
    pub tag: u64,
    pub result: Result<Vec<R>, FetchError>,
}

/// Tells the grid with id `grid_id` that its data is out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidateMsg {
    pub grid_id: i64,
}

/// A mutation issued through the grid with id `grid_id` failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFailedMsg {
    pub grid_id: i64,
    pub error: FetchError,
}

/// Tags requests so only the latest one is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: u64,
    in_flight: bool,
}

impl RequestTracker {
    /// Starts a new request and returns its tag. Any request still in flight
    /// becomes stale.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.in_flight = true;
        self.latest
    }

    /// Accepts the response tagged `tag` if it answers the latest request.
    pub fn accept(&mut self, tag: u64) -> bool {
        if tag != self.latest || !self.in_flight {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Runs `source.fetch(query)` and wraps the outcome in a [`RowsLoadedMsg`].
pub fn load_cmd<R: Send + 'static>(
    source: Arc<dyn DataSource<R>>,
    query: Option<String>,
    grid_id: i64,
    tag: u64,
) -> Cmd {
    Box::pin(async move {
        let result = source.fetch(query).await;
        Some(Box::new(RowsLoadedMsg {
            grid_id,
            tag,
            result,
        }) as Msg)
    })
}

/// Applies a mutation, then invalidates the grid on success.
pub fn mutate_cmd<R: Send + 'static>(
    mutator: Arc<dyn RecordMutator<R>>,
    mutation: Mutation<R>,
    grid_id: i64,
) -> Cmd {
    Box::pin(async move {
        match mutator.apply(mutation).await {
            Ok(()) => Some(Box::new(InvalidateMsg { grid_id }) as Msg),
            Err(error) => {
                tracing::warn!(grid_id, %error, "mutation failed");
                Some(Box::new(MutationFailedMsg { grid_id, error }) as Msg)
            }
        }
    })
}
