//! User records as exchanged with the remote API.

use serde::{Deserialize, Serialize};

/// A single user's stored profile data as known to this client.
///
/// Only the fields used for display, search, and editing are modelled;
/// anything else the server sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Stable, unique identifier assigned by the server.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Access gate, only changed through the dedicated block endpoint.
    #[serde(default)]
    pub is_blocked: bool,
    /// URL of the profile picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(
        default,
        rename = "pincode",
        alias = "postalCode",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(
        default,
        rename = "dob",
        alias = "dateOfBirth",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<String>,
    /// Creation timestamp, kept as the server formatted it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserRecord {
    /// Record with only an identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: None,
            mobile: None,
            email: None,
            is_blocked: false,
            profile_image: None,
            address: None,
            city: None,
            state: None,
            country: None,
            postal_code: None,
            gender: None,
            date_of_birth: None,
            created_at: None,
        }
    }

    /// Name to show in prompts and notifications, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }

    /// The four fields searched by the list filter, in match order.
    pub fn search_fields(&self) -> [Option<&str>; 4] {
        [
            self.full_name.as_deref(),
            self.mobile.as_deref(),
            self.email.as_deref(),
            Some(self.id.as_str()),
        ]
    }
}

/// Partial update payload.
///
/// `None` fields are omitted from the request body so the server keeps
/// their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, rename = "pincode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, rename = "dob", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl UserPatch {
    /// Build a patch holding only the fields of `proposed` that differ
    /// from `current`.
    ///
    /// Fields left `None` in `proposed` are treated as "not touched".
    pub fn between(current: &UserRecord, proposed: &UserPatch) -> Self {
        fn changed(current: &Option<String>, proposed: &Option<String>) -> Option<String> {
            match proposed {
                Some(value) if current.as_deref() != Some(value.as_str()) => Some(value.clone()),
                _ => None,
            }
        }

        Self {
            full_name: changed(&current.full_name, &proposed.full_name),
            mobile: changed(&current.mobile, &proposed.mobile),
            email: changed(&current.email, &proposed.email),
            address: changed(&current.address, &proposed.address),
            city: changed(&current.city, &proposed.city),
            state: changed(&current.state, &proposed.state),
            country: changed(&current.country, &proposed.country),
            postal_code: changed(&current.postal_code, &proposed.postal_code),
            gender: changed(&current.gender, &proposed.gender),
            date_of_birth: changed(&current.date_of_birth, &proposed.date_of_birth),
        }
    }

    /// Returns `true` when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Wire names of the fields present in this patch.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("fullName", &self.full_name),
            ("mobile", &self.mobile),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("country", &self.country),
            ("pincode", &self.postal_code),
            ("gender", &self.gender),
            ("dob", &self.date_of_birth),
        ];
        fields
            .into_iter()
            .filter(|(_, v)| v.is_some())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Body of `GET /api/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListEnvelope {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// Body of `GET /api/users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: UserRecord,
}

/// Body of `PATCH /api/users/{id}`: servers answer either with the bare
/// record or wrapped in `{ "user": ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpdatedUser {
    Wrapped(UserEnvelope),
    Bare(UserRecord),
}

impl UpdatedUser {
    pub fn into_record(self) -> UserRecord {
        match self {
            UpdatedUser::Wrapped(env) => env.user,
            UpdatedUser::Bare(user) => user,
        }
    }
}

/// Body of `PATCH /api/users/{id}/block`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    pub is_blocked: bool,
}
