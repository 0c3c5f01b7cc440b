//! The authenticated identity and its profile updates.

use serde::{Deserialize, Serialize};

use super::{Email, Role, UserId};

/// Reference to a display image for an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AvatarRef {
    /// Remote image (`http://` or `https://`).
    Url(String),
    /// Inline image as a `data:` URI.
    Embedded(String),
}

/// Errors that can occur when parsing an [`AvatarRef`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvatarRefError {
    /// Neither an http(s) URL nor a data URI.
    #[error("avatar must be an http(s) URL or a data: URI")]
    UnsupportedScheme,
    /// Data URI that does not carry an image.
    #[error("embedded avatar must be an image")]
    NotAnImage,
}

impl AvatarRef {
    /// Parse an avatar reference from user input.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarRefError`] if the value is neither an http(s) URL nor an
    /// image data URI.
    pub fn parse(value: &str) -> Result<Self, AvatarRefError> {
        let value = value.trim();
        if let Some(rest) = value.strip_prefix("data:") {
            if !rest.starts_with("image/") {
                return Err(AvatarRefError::NotAnImage);
            }
            return Ok(Self::Embedded(value.to_string()));
        }
        if value.starts_with("https://") || value.starts_with("http://") {
            return Ok(Self::Url(value.to_string()));
        }
        Err(AvatarRefError::UnsupportedScheme)
    }

    /// Value suitable for an `<img src>` attribute.
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            Self::Url(v) | Self::Embedded(v) => v,
        }
    }
}

/// The authenticated user record.
///
/// This is the value held by the session store and written to durable storage,
/// so its serialized form must stay backwards compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque unique identifier.
    pub id: UserId,
    /// Login key; unique across identities.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Fixed at creation.
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<AvatarRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Identity {
    /// Returns `true` if this identity holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// First word of the display name, used in greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Up to two upper-cased initials, used when no avatar is set.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Merge a profile update into this identity.
    ///
    /// Only profile fields can change here. `id`, `email` and `role` are not
    /// reachable through a [`ProfileUpdate`].
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = update.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                self.name = name.to_string();
            }
        }
        if let Some(company) = &update.company {
            self.company = non_blank(company);
        }
        if let Some(phone) = &update.phone {
            self.phone = non_blank(phone);
        }
        if let Some(avatar) = &update.avatar_ref {
            self.avatar_ref = Some(avatar.clone());
        }
    }
}

/// Partial profile fields an identity may change about itself.
///
/// `None` leaves a field untouched. For `company` and `phone`, a blank string
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub avatar_ref: Option<AvatarRef>,
}

impl ProfileUpdate {
    /// Returns `true` if the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.company.is_none()
            && self.phone.is_none()
            && self.avatar_ref.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
