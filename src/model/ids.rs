use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Declares a string-backed identifier newtype per row type (`Section` gives `SectionId`).
macro_rules! row_id {
    ($($name:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Opaque identifier of a `", stringify!($name), "` row.")]
                #[derive(
                    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
                    Serialize, Deserialize,
                )]
                #[serde(transparent)]
                pub struct [<$name Id>](pub String);

                impl [<$name Id>] {
                    pub fn as_str(&self) -> &str {
                        &self.0
                    }
                }

                impl From<String> for [<$name Id>] {
                    fn from(id: String) -> Self {
                        Self(id)
                    }
                }

                impl From<&str> for [<$name Id>] {
                    fn from(id: &str) -> Self {
                        Self(id.to_string())
                    }
                }

                impl Display for [<$name Id>] {
                    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        f.write_str(&self.0)
                    }
                }
            )*
        }
    };
}

row_id!(Section, Lesson, User, Product, Price, Subscription);
