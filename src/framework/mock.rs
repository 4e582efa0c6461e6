//! # Mock Tables & Testing Guide
//!
//! `MockTable<T>` hands out a real [`TableClient<T>`] whose requests are answered from a queue
//! of expectations instead of a [`TableActor`](crate::framework::TableActor). It also counts
//! every request it receives, which is how tests prove that a denied or invalid action issued
//! *zero* remote calls.
//!
//! ## When to use Mocks vs the Real Table
//!
//! | Feature | MockTable | TableActor |
//! |---------|-----------|------------|
//! | **State** | None (scripted responses) | Real rows |
//! | **Error Injection** | `return_err` | Needs a row hook that refuses |
//! | **Call counting** | `request_count()` | No |
//! | **Use Case** | Screen logic around the client | End-to-end flows |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut sections = MockTable::<Section>::new();
//! sections.expect_select().return_ok(vec![]);
//! let screen = AdminScreen::new(sections.client(), gate, None);
//! // ...
//! sections.verify();
//! ```
//!
//! For requests that must stay in flight while the test does something else, use
//! [`create_mock_table`] and answer them by hand with [`next_request`].

use crate::framework::client::TableClient;
use crate::framework::error::RemoteError;
use crate::framework::message::TableRequest;
use crate::framework::row::TableRow;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted answer for the next request.
enum Expectation<T: TableRow> {
    Select(Result<Vec<T>, RemoteError>),
    Get(Result<Option<T>, RemoteError>),
    Insert(Result<T, RemoteError>),
    Update(Result<T, RemoteError>),
    Upsert(Result<T, RemoteError>),
    Delete(Result<(), RemoteError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock table with expectation tracking for fluent testing.
pub struct MockTable<T: TableRow> {
    client: TableClient<T>,
    expectations: Queue<T>,
    requests: Arc<AtomicUsize>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: TableRow> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow> MockTable<T> {
    /// Creates a new mock table with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let requests = Arc::new(AtomicUsize::new(0));
        let mismatches = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let counter = requests.clone();
        let errors = mismatches.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (TableRequest::Select { respond_to, .. }, Some(Expectation::Select(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Upsert { respond_to, .. }, Some(Expectation::Upsert(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    // Dropping the responder surfaces as `StoreDropped` to the caller.
                    (request, _) => {
                        errors
                            .lock()
                            .unwrap()
                            .push(format!("unexpected request on {}: {:?}", T::TABLE, request));
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            requests,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    /// Number of requests received so far, expected or not.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, RemoteError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
            _result: PhantomData,
        }
    }

    pub fn expect_select(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::Select)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Insert)
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_upsert(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Upsert)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Delete)
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", *mismatches);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for one scripted response.
pub struct ExpectationBuilder<T: TableRow, R> {
    wrap: fn(Result<R, RemoteError>) -> Expectation<T>,
    expectations: Queue<T>,
    _result: PhantomData<R>,
}

impl<T: TableRow, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RemoteError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Requests stay pending until the test answers them, which lets a test hold several
/// operations in flight at once.
pub fn create_mock_table<T: TableRow>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

/// Waits for the next request.
pub async fn next_request<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<TableRequest<T>> {
    receiver.recv().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, SectionId};

    fn section(id: &str, order_index: i32) -> Section {
        Section {
            id: SectionId::from(id),
            title: format!("Section {id}"),
            description: None,
            order_index,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_mock_table_with_expectations() {
        let mut mock = MockTable::<Section>::new();
        mock.expect_select().return_ok(vec![section("s1", 1)]);
        mock.expect_delete().return_err(RemoteError::Unavailable("offline".into()));

        let client = mock.client();
        let rows = client.select(crate::framework::Query::ordered()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(client.delete(SectionId::from("s1")).await.is_err());

        assert_eq!(mock.request_count(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_dropped_and_recorded() {
        let mock = MockTable::<Section>::new();
        let result = mock.client().get(SectionId::from("s9")).await;
        assert!(matches!(result, Err(RemoteError::StoreDropped)));
        assert_eq!(mock.request_count(), 1);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_raw_channel_answers_by_hand() {
        let (client, mut receiver) = create_mock_table::<Section>(10);
        let pending = tokio::spawn(async move { client.get(SectionId::from("s1")).await });

        match next_request(&mut receiver).await {
            Some(TableRequest::Get { id, respond_to }) => {
                assert_eq!(id, SectionId::from("s1"));
                respond_to.send(Ok(Some(section("s1", 4)))).unwrap();
            }
            other => panic!("Expected Get request, got {other:?}"),
        }

        let row = pending.await.unwrap().unwrap().unwrap();
        assert_eq!(row.order_index, 4);
    }
}
