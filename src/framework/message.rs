//! # Table Messages
//!
//! Requests exchanged between a [`TableClient`](crate::framework::TableClient) and whatever
//! serves the table: the in-process [`TableActor`](crate::framework::TableActor) or a
//! [`MockTable`](crate::framework::mock::MockTable).

use crate::framework::error::RemoteError;
use crate::framework::row::TableRow;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the data service.
pub type Response<T> = oneshot::Sender<Result<T, RemoteError>>;

/// Selection parameters: an optional equality filter and the sort request.
///
/// List screens always ask for `order_index` ascending; insertion order is never assumed.
#[derive(Debug, Clone)]
pub struct Query<T: TableRow> {
    pub filter: Option<T::Filter>,
    pub order_by_index: bool,
}

impl<T: TableRow> Query<T> {
    /// Every row, ascending by `order_index`.
    pub fn ordered() -> Self {
        Self {
            filter: None,
            order_by_index: true,
        }
    }

    /// Rows matching `filter`, in store order.
    pub fn filtered(filter: T::Filter) -> Self {
        Self {
            filter: Some(filter),
            order_by_index: false,
        }
    }

    pub fn order_by_index(mut self) -> Self {
        self.order_by_index = true;
        self
    }
}

/// Row-oriented operations understood by a table.
///
/// - **Select**: rows matching the query, optionally sorted by `order_index`.
/// - **Get**: one row by id.
/// - **Insert**: a new row from [`TableRow::Insert`]; the store assigns the id.
/// - **Update**: replaces the row with the same id; responds with the canonical row.
/// - **Upsert**: inserts or replaces a row whose id the caller chose.
/// - **Delete**: removes a row by id.
#[derive(Debug)]
pub enum TableRequest<T: TableRow> {
    Select {
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Insert {
        params: T::Insert,
        respond_to: Response<T>,
    },
    Update {
        row: T,
        respond_to: Response<T>,
    },
    Upsert {
        row: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
