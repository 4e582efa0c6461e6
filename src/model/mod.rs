//! Plain row and form types. The table behaviour lives in [`crate::section_table`],
//! [`crate::lesson_table`] and [`crate::account_tables`].

pub mod billing;
pub mod ids;
pub mod lesson;
pub mod section;
pub mod user;

pub use billing::*;
pub use ids::*;
pub use lesson::*;
pub use section::*;
pub use user::*;
