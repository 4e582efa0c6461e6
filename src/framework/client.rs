//! # Table Client
//!
//! The handle screens and pages use to reach the data service.

use crate::framework::error::RemoteError;
use crate::framework::message::{Query, TableRequest};
use crate::framework::row::TableRow;
use tokio::sync::{mpsc, oneshot};

/// ## TableClient
///
/// A type-safe, async handle on one table. It forwards row operations over a Tokio mpsc
/// channel and awaits each answer on a oneshot channel, so every call is exactly one round
/// trip with no retry.
///
/// * **Cloneable** – holds only a sender, so clones are cheap and can move into futures.
/// * **Backend-agnostic** – the receiving end can be a
///   [`TableActor`](crate::framework::TableActor) or a
///   [`MockTable`](crate::framework::mock::MockTable).
pub struct TableClient<T: TableRow> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: TableRow> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: TableRow> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, RemoteError>>) -> TableRequest<T>,
    ) -> Result<R, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| RemoteError::StoreClosed)?;
        response.await.map_err(|_| RemoteError::StoreDropped)?
    }

    pub async fn select(&self, query: Query<T>) -> Result<Vec<T>, RemoteError> {
        self.call(|respond_to| TableRequest::Select { query, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, RemoteError> {
        self.call(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn insert(&self, params: T::Insert) -> Result<T, RemoteError> {
        self.call(|respond_to| TableRequest::Insert { params, respond_to })
            .await
    }

    pub async fn update(&self, row: T) -> Result<T, RemoteError> {
        self.call(|respond_to| TableRequest::Update { row, respond_to })
            .await
    }

    pub async fn upsert(&self, row: T) -> Result<T, RemoteError> {
        self.call(|respond_to| TableRequest::Upsert { row, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), RemoteError> {
        self.call(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }
}
