//! Identifier types for states and actions held in the action-value table.
//!
//! Both are thin string wrappers: the environment decides how a discretised
//! observation or a motor command is spelled, the table only needs stable
//! equality, hashing and ordering across save/load.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

string_identifier!(
    /// Discretised observation of the environment, e.g. `"bin_3"` or
    /// `"(0, 1, 0)"` for a tuple of sensor bins.
    ///
    /// ```
    /// use qlearn::identifiers::StateId;
    ///
    /// let state = StateId::new("(0, 1, 0)");
    /// assert_eq!(state.as_str(), "(0, 1, 0)");
    /// ```
    StateId
);

string_identifier!(
    /// One member of the fixed, ordered action set (e.g. `"left"`).
    ActionId
);

/// Build an ordered action list from anything string-like.
///
/// ```
/// use qlearn::identifiers::action_set;
///
/// let actions = action_set(["left", "forward", "right"]);
/// assert_eq!(actions.len(), 3);
/// assert_eq!(actions[1], "forward");
/// ```
pub fn action_set<I, S>(names: I) -> Vec<ActionId>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(ActionId::new).collect()
}
