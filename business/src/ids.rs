//! Interned record identifiers.
//!
//! Identifiers are cloned into every row, event and closure, so they wrap `Ustr`
//! (copy, pointer-compare) instead of `String`.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use ustr::Ustr;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(Ustr);

        impl $name {
            pub fn new(id: &str) -> Self {
                Self(Ustr::from(id.trim()))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            pub fn is_blank(&self) -> bool {
                self.0.as_str().trim().is_empty()
            }
        }

        /// Decoded ids go through [`new`](Self::new), so they are trimmed like local ones.
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let id = String::deserialize(deserializer)?;
                Ok(Self::new(&id))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }
    };
}

record_id!(
    /// The parent business record whose line items are listed.
    ParentRecordId
);
record_id!(
    /// A single line item; the target of `deleteRow`.
    LineItemId
);
record_id!(
    /// The product a line item refers to; the target of `viewProduct`.
    ProductId
);
record_id!(
    /// The authenticated viewer.
    ViewerId
);
