//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BookingError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parses a non-blank identifier, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns `BookingError::Validation` if the input is empty or blank.
            pub fn parse(raw: &str) -> Result<Self, BookingError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(BookingError::Validation(
                        concat!($label, " must not be empty").to_owned(),
                    ));
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a customer in the customer directory.
    CustomerId,
    "userId"
);

string_id!(
    /// Identifier of a ticketed event in the inventory service.
    EventId,
    "eventId"
);
