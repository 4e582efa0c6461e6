//! # AdminResource Trait
//!
//! A [`TableRow`] that can be managed from an admin screen. On top of the table contract it
//! describes the form: how a draft is validated into an insert payload, how a stored row is
//! turned back into a draft for editing, and how an edited draft becomes the full row that is
//! submitted as an update.

use crate::framework::TableRow;
use std::fmt::Debug;

/// Client-side validation failures. They block submission before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("A section must be selected")]
    MissingSection,
    #[error("Order index must be an integer, got {0:?}")]
    InvalidOrderIndex(String),
}

pub trait AdminResource: TableRow {
    /// Editable form state.
    type Draft: Clone + Debug + Default + PartialEq + Send + Sync;

    /// Whether a staged file may be uploaded and attached to the row.
    const ACCEPTS_ASSETS: bool = false;

    /// Validates a create form into the insert payload.
    fn validate_draft(draft: &Self::Draft) -> Result<Self::Insert, ValidationError>;

    /// Seeds the edit form from a stored row.
    fn draft_from_row(row: &Self) -> Self::Draft;

    /// Validates an edit form into the full row submitted as the update.
    fn apply_draft(row: &Self, draft: &Self::Draft) -> Result<Self, ValidationError>;

    /// Replaces the asset reference of an insert payload with an uploaded URL.
    fn attach_to_insert(_params: &mut Self::Insert, _url: String) {}

    /// Replaces the asset reference of an edited row with an uploaded URL.
    fn attach_to_row(&mut self, _url: String) {}
}

pub fn required_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(title.to_string())
}

pub fn parse_order_index(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidOrderIndex(raw.to_string()))
}

/// Blank optional text is stored as `None`.
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_must_not_be_blank() {
        assert_eq!(required_title("   "), Err(ValidationError::MissingTitle));
        assert_eq!(required_title(" Algebra ").unwrap(), "Algebra");
    }

    #[test]
    fn test_order_index_parses_integers_only() {
        assert_eq!(parse_order_index(" -4 "), Ok(-4));
        assert_eq!(
            parse_order_index("2.5"),
            Err(ValidationError::InvalidOrderIndex("2.5".into()))
        );
        assert!(parse_order_index("").is_err());
    }

    #[test]
    fn test_blank_optional_text_is_none() {
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text(" notes "), Some("notes".to_string()));
    }
}
