//! Status enums for projects and clients.

use serde::{Deserialize, Serialize};

/// Error returned when a status name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct StatusParseError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Generates `as_str`, `label`, `ALL`, `Display` and `FromStr` for a
/// unit-only enum from one table of `Variant => ("wire", "Label")`.
macro_rules! status_enum {
    ($name:ident, $kind:literal, { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name (matches the serde representation).
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(StatusParseError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Lifecycle of a copy project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Generating,
    Completed,
}

status_enum!(ProjectStatus, "project status", {
    Draft => ("draft", "Draft"),
    Generating => ("generating", "Generating"),
    Completed => ("completed", "Completed"),
});

/// Account status of an agency client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Pending,
    Active,
    Inactive,
}

status_enum!(ClientStatus, "client status", {
    Pending => ("pending", "Pending"),
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
});

/// Subscription plan of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Professional,
    Enterprise,
}

status_enum!(Plan, "plan", {
    Free => ("free", "Free"),
    Starter => ("starter", "Starter"),
    Professional => ("professional", "Professional"),
    Enterprise => ("enterprise", "Enterprise"),
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for status in ProjectStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for plan in Plan::ALL {
            assert_eq!(plan.as_str().parse::<Plan>().unwrap(), *plan);
        }
    }

    #[test]
    fn test_parse_error_names_kind() {
        let err = "archived".parse::<ProjectStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid project status: archived");
    }

    #[test]
    fn test_labels() {
        assert_eq!(ClientStatus::Active.label(), "Active");
        assert_eq!(Plan::Enterprise.label(), "Enterprise");
    }
}
