//! The `sections` table and its admin form.

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::Section;

/// Creates the sections table actor and its client. Ids are `s1`, `s2`, …
pub fn new(buffer_size: usize) -> (TableActor<Section>, TableClient<Section>) {
    TableActor::new(buffer_size)
}
