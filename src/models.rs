//! API models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// ============ Response Envelope ============

/// Success envelope; every 2xx JSON body is `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Wrapped payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap a payload.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============ Field Definitions ============

/// Discriminant-only view of the eight field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Numeric input.
    Number,
    /// Email address input.
    Email,
    /// Dropdown over a fixed option list.
    Select,
    /// Radio group over a fixed option list.
    Radio,
    /// Single checkbox.
    Checkbox,
    /// Calendar date input.
    Date,
}

impl FieldKind {
    /// All kinds, in wire-name order.
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Text,
        FieldKind::Textarea,
        FieldKind::Number,
        FieldKind::Email,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::Date,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
        }
    }

    /// Parse a wire name; `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<FieldKind> {
        FieldKind::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Choice kinds carry an option list; everything else must not.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable choice of a `select` or `radio` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldOption {
    /// Text shown to the person filling the form.
    pub label: String,
    /// Value stored when the choice is picked.
    pub value: String,
}

/// Attributes shared by every field kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldBase {
    /// Prompt shown above the input.
    pub label: String,
    /// Key the submitted value is stored under.
    pub name: String,
    /// Whether the field must be filled before submitting.
    #[serde(default)]
    pub required: bool,
    /// Hint text shown inside an empty input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// One entry in a form's ordered field list.
///
/// Tagged by `type` on the wire. The choice kinds carry their option
/// list structurally, so a `select` or `radio` without options cannot
/// even be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldDef {
    /// Single-line text field.
    Text {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
    },
    /// Multi-line text field.
    Textarea {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
    },
    /// Numeric field.
    Number {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
    },
    /// Email field.
    Email {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
    },
    /// Dropdown field.
    Select {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
        /// Choices offered by the dropdown.
        options: Vec<FieldOption>,
    },
    /// Radio group field.
    Radio {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
        /// Choices offered by the group.
        options: Vec<FieldOption>,
    },
    /// Checkbox field.
    Checkbox {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
    },
    /// Date field.
    Date {
        /// Shared attributes.
        #[serde(flatten)]
        base: FieldBase,
    },
}

impl FieldDef {
    /// Kind discriminant.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldDef::Text { .. } => FieldKind::Text,
            FieldDef::Textarea { .. } => FieldKind::Textarea,
            FieldDef::Number { .. } => FieldKind::Number,
            FieldDef::Email { .. } => FieldKind::Email,
            FieldDef::Select { .. } => FieldKind::Select,
            FieldDef::Radio { .. } => FieldKind::Radio,
            FieldDef::Checkbox { .. } => FieldKind::Checkbox,
            FieldDef::Date { .. } => FieldKind::Date,
        }
    }

    /// Shared attributes, independent of kind.
    pub fn base(&self) -> &FieldBase {
        match self {
            FieldDef::Text { base }
            | FieldDef::Textarea { base }
            | FieldDef::Number { base }
            | FieldDef::Email { base }
            | FieldDef::Select { base, .. }
            | FieldDef::Radio { base, .. }
            | FieldDef::Checkbox { base }
            | FieldDef::Date { base } => base,
        }
    }

    /// Storage key for submitted values.
    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Option list, present only on choice kinds.
    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            FieldDef::Select { options, .. } | FieldDef::Radio { options, .. } => {
                Some(options.as_slice())
            }
            _ => None,
        }
    }
}

// ============ Forms ============

/// Lifecycle state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    /// Visible only to its owner.
    Draft,
    /// Reachable through the public endpoints.
    Published,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormStatus::Draft => "draft",
            FormStatus::Published => "published",
        })
    }
}

/// A form with its ordered field schema.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Form {
    /// Primary identifier.
    pub id: Uuid,
    /// Owning account; never serialized.
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    /// Display title.
    pub title: String,
    /// Public URL key, unique across all forms.
    pub slug: String,
    /// Ordered field definitions.
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldDef>,
    /// Lifecycle state.
    pub status: FormStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last mutation instant.
    pub updated_at: DateTime<Utc>,
}

/// A stored response to a published form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Submission {
    /// Primary identifier.
    pub id: Uuid,
    /// Form the submission belongs to.
    pub form_id: Uuid,
    /// Submitted values, stored verbatim.
    #[schema(value_type = Object)]
    pub data: Value,
    /// Arrival instant.
    pub created_at: DateTime<Utc>,
}

// ============ Requests ============

/// Deserialize any present value as `Some`, keeping an explicit `null`
/// distinguishable from an absent key. `Option<Value>` alone folds both
/// into `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Form creation payload.
///
/// Attributes stay raw JSON here; [`crate::schema`] turns them into
/// typed values or a full error map.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateFormRequest {
    /// Display title, required.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    /// Field definitions; defaults to an empty schema.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub fields: Option<Value>,
    /// Accepted and ignored; created forms always start as drafts.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Value>,
}

/// Partial form update payload; absent attributes are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFormRequest {
    /// Replacement title.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    /// Replacement field list, swapped wholesale.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub fields: Option<Value>,
    /// Replacement lifecycle state.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Value>,
}

/// Public submission payload.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubmitRequest {
    /// Submitted values keyed by field name.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

// ============ Validated Commands ============

/// Validated output of a create request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewForm {
    /// Display title.
    pub title: String,
    /// Typed field schema.
    pub fields: Vec<FieldDef>,
}

/// Validated output of an update request; `None` means untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement field schema.
    pub fields: Option<Vec<FieldDef>>,
    /// Replacement lifecycle state.
    pub status: Option<FormStatus>,
}
