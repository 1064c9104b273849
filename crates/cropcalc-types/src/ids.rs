//! Type-safe name wrappers around [`String`].
//!
//! Crops and items are identified by their display names, exactly as the
//! catalog authors them. Wrapping them keeps a crop name from being passed
//! where an item name is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_name {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create a new name from anything string-like.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Borrow the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(String::from(name))
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name! {
    /// Name of a crop in the catalog (e.g. `"Stickreed"`).
    CropName
}

define_name! {
    /// Identity of an item a crop can drop (e.g. `"Melon Slice"`).
    ItemId
}
