//! Newtype IDs for type-safe entity references.
//!
//! Identifiers are opaque strings: the persistence collaborator owns their
//! format, and the dashboard only compares and displays them. Use the
//! `define_id!` macro to create wrappers that prevent mixing IDs from
//! different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `generate()` (UUID v4), and `as_str()`
/// - `Display`, `From<String>`, `From<&str>`, and `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use viralcopy_core::define_id;
/// define_id!(TeamId);
/// define_id!(CampaignId);
///
/// let team = TeamId::new("team-1");
/// let campaign = CampaignId::generate();
///
/// assert_eq!(team.as_str(), "team-1");
/// assert!(!campaign.as_str().is_empty());
/// // These are different types, so this won't compile:
/// // let _: TeamId = campaign;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4().to_string())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ProjectId);
define_id!(ClientId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new("user-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user-123\"");

        let parsed: UserId = serde_json::from_str("\"user-123\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display_matches_inner() {
        assert_eq!(ClientId::from("c1").to_string(), "c1");
    }
}
