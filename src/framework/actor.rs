//! # Table Actor
//!
//! The in-process stand-in for the remote data service. One `TableActor` owns one table and
//! processes its requests sequentially, so the rows need no locking. Writes from different
//! clients are applied in arrival order: last write wins at row granularity.

use crate::framework::client::TableClient;
use crate::framework::error::RemoteError;
use crate::framework::message::{Query, TableRequest};
use crate::framework::row::TableRow;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct Stored<T> {
    seq: u64,
    row: T,
}

/// The generic actor that owns the rows of one table.
///
/// # Implementation Details
///
/// Rows live in a `HashMap` keyed by id, each tagged with an insertion sequence number.
/// `select` with `order_by_index` sorts by `(order_index, seq)`, so rows sharing an
/// `order_index` come back in insertion order; without it rows come back by `seq` alone.
///
/// ## Operations
///
/// * **Insert**: assigns `<ID_PREFIX><n>`, builds the row with `T::from_insert`, runs
///   `on_insert`, stores it and responds with the canonical row.
/// * **Update**: runs `on_update` against the stored row, then replaces it.
/// * **Upsert**: `Update` when the id exists, otherwise `on_insert` and store under the given id.
/// * **Delete**: runs `on_delete`, then removes the row.
pub struct TableActor<T: TableRow> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: HashMap<T::Id, Stored<T>>,
    next_id: u64,
    next_seq: u64,
}

impl<T: TableRow> TableActor<T> {
    /// Creates a new `TableActor` and its associated `TableClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: HashMap::new(),
            next_id: 1,
            next_seq: 0,
        };
        (actor, TableClient::new(sender))
    }

    fn select(&self, query: &Query<T>) -> Vec<T> {
        let mut hits: Vec<&Stored<T>> = self
            .rows
            .values()
            .filter(|s| query.filter.as_ref().is_none_or(|f| s.row.matches(f)))
            .collect();
        if query.order_by_index {
            hits.sort_by_key(|s| (s.row.order_index(), s.seq));
        } else {
            hits.sort_by_key(|s| s.seq);
        }
        hits.into_iter().map(|s| s.row.clone()).collect()
    }

    fn store(&mut self, row: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(row.id().clone(), Stored { seq, row });
    }

    async fn replace(&mut self, row: T, context: &T::Context) -> Result<T, RemoteError> {
        let table = T::TABLE;
        let id = row.id().clone();
        let Some(current) = self.rows.get_mut(&id) else {
            warn!(table, %id, "Not found");
            return Err(RemoteError::NotFound(id.to_string()));
        };
        if let Err(e) = current.row.on_update(&row, context).await {
            warn!(table, %id, error = %e, "Update rejected");
            return Err(RemoteError::Rejected(Box::new(e)));
        }
        current.row = row;
        info!(table, %id, "Updated");
        Ok(current.row.clone())
    }

    async fn admit(&mut self, row: T, context: &T::Context) -> Result<T, RemoteError> {
        let table = T::TABLE;
        if let Err(e) = row.on_insert(context).await {
            warn!(table, id = %row.id(), error = %e, "Insert rejected");
            return Err(RemoteError::Rejected(Box::new(e)));
        }
        self.store(row.clone());
        info!(table, id = %row.id(), size = self.rows.len(), "Inserted");
        Ok(row)
    }

    /// Runs the actor's event loop until every client is dropped.
    ///
    /// The `context` is handed to every row hook; it usually carries clients of other
    /// tables that were created after this actor but before its loop started.
    pub async fn run(mut self, context: T::Context) {
        let table = T::TABLE;
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Select { query, respond_to } => {
                    let rows = self.select(&query);
                    debug!(table, ?query, count = rows.len(), "Select");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).map(|s| s.row.clone());
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Insert { params, respond_to } => {
                    debug!(table, ?params, "Insert");
                    let id = T::Id::from(format!("{}{}", T::ID_PREFIX, self.next_id));
                    self.next_id += 1;
                    let result = match T::from_insert(id, params) {
                        Ok(row) => self.admit(row, &context).await,
                        Err(e) => {
                            warn!(table, error = %e, "Insert failed");
                            Err(RemoteError::Rejected(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                TableRequest::Update { row, respond_to } => {
                    debug!(table, ?row, "Update");
                    let result = self.replace(row, &context).await;
                    let _ = respond_to.send(result);
                }
                TableRequest::Upsert { row, respond_to } => {
                    debug!(table, ?row, "Upsert");
                    let result = if self.rows.contains_key(row.id()) {
                        self.replace(row, &context).await
                    } else {
                        self.admit(row, &context).await
                    };
                    let _ = respond_to.send(result);
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let result = match self.rows.get(&id) {
                        Some(stored) => match stored.row.on_delete(&context).await {
                            Ok(()) => {
                                self.rows.remove(&id);
                                info!(table, %id, size = self.rows.len(), "Deleted");
                                Ok(())
                            }
                            Err(e) => {
                                warn!(table, %id, error = %e, "Delete rejected");
                                Err(RemoteError::Rejected(Box::new(e)))
                            }
                        },
                        None => {
                            warn!(table, %id, "Not found");
                            Err(RemoteError::NotFound(id.to_string()))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        body: String,
        order_index: i32,
        pinned: bool,
    }

    #[derive(Clone, Debug)]
    struct NoteInsert {
        body: String,
        order_index: i32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note rejected: {0}")]
    struct NoteError(String);

    #[async_trait]
    impl TableRow for Note {
        const TABLE: &'static str = "notes";
        const ID_PREFIX: &'static str = "n";
        type Id = String;
        type Insert = NoteInsert;
        type Filter = bool;
        type Context = ();
        type Error = NoteError;

        fn id(&self) -> &String {
            &self.id
        }

        fn order_index(&self) -> i32 {
            self.order_index
        }

        fn matches(&self, pinned: &bool) -> bool {
            self.pinned == *pinned
        }

        fn from_insert(id: String, params: NoteInsert) -> Result<Self, NoteError> {
            if params.body.is_empty() {
                return Err(NoteError("empty body".into()));
            }
            Ok(Self {
                id,
                body: params.body,
                order_index: params.order_index,
                pinned: false,
            })
        }

        async fn on_update(&self, next: &Note, _ctx: &()) -> Result<(), NoteError> {
            if next.body.is_empty() {
                return Err(NoteError("empty body".into()));
            }
            Ok(())
        }
    }

    fn note(body: &str, order_index: i32) -> NoteInsert {
        NoteInsert {
            body: body.into(),
            order_index,
        }
    }

    #[tokio::test]
    async fn test_table_full_lifecycle() {
        let (actor, client) = TableActor::<Note>::new(10);
        let handle = tokio::spawn(actor.run(()));

        let first = client.insert(note("first", 5)).await.unwrap();
        assert_eq!(first.id, "n1");
        let second = client.insert(note("second", 1)).await.unwrap();
        assert_eq!(second.id, "n2");

        let mut edited = first.clone();
        edited.pinned = true;
        let canonical = client.update(edited).await.unwrap();
        assert!(canonical.pinned);

        let pinned = client.select(Query::filtered(true)).await.unwrap();
        assert_eq!(pinned, vec![canonical.clone()]);

        client.delete("n1".to_string()).await.unwrap();
        assert!(client.get("n1".to_string()).await.unwrap().is_none());
        assert!(matches!(
            client.delete("n1".to_string()).await,
            Err(RemoteError::NotFound(_))
        ));

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_select_orders_by_index_then_insertion() {
        let (actor, client) = TableActor::<Note>::new(10);
        tokio::spawn(actor.run(()));

        client.insert(note("c", 3)).await.unwrap();
        client.insert(note("a", 1)).await.unwrap();
        client.insert(note("b", 3)).await.unwrap();
        client.insert(note("z", -2)).await.unwrap();

        let ordered = client.select(Query::ordered()).await.unwrap();
        let bodies: Vec<&str> = ordered.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, vec!["z", "a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_rejected_writes_leave_rows_untouched() {
        let (actor, client) = TableActor::<Note>::new(10);
        tokio::spawn(actor.run(()));

        assert!(matches!(
            client.insert(note("", 0)).await,
            Err(RemoteError::Rejected(_))
        ));

        let kept = client.insert(note("kept", 0)).await.unwrap();
        let mut broken = kept.clone();
        broken.body.clear();
        assert!(matches!(
            client.update(broken).await,
            Err(RemoteError::Rejected(_))
        ));
        assert_eq!(client.get(kept.id.clone()).await.unwrap(), Some(kept));
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_replaces() {
        let (actor, client) = TableActor::<Note>::new(10);
        tokio::spawn(actor.run(()));

        let row = Note {
            id: "chosen".into(),
            body: "v1".into(),
            order_index: 0,
            pinned: false,
        };
        client.upsert(row.clone()).await.unwrap();
        let replaced = client
            .upsert(Note {
                body: "v2".into(),
                ..row
            })
            .await
            .unwrap();
        assert_eq!(replaced.body, "v2");
        assert_eq!(client.select(Query::ordered()).await.unwrap().len(), 1);
    }
}
