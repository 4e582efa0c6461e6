//! The `lessons` table and its admin form.
//!
//! Every lesson references a section. The table checks that reference through a
//! sections client handed to [`TableActor::run`] as its context.

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::Lesson;

/// Creates the lessons table actor and its client. Ids are `l1`, `l2`, …
pub fn new(buffer_size: usize) -> (TableActor<Lesson>, TableClient<Lesson>) {
    TableActor::new(buffer_size)
}
