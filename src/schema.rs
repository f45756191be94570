//! Payload validation for forms and submissions.
//!
//! Every rule over a payload runs before anything is accepted: failures
//! accumulate into a dotted-path error map ([`ValidationErrors`]) and the
//! payload is rejected whole. On success the raw JSON is gone, replaced by
//! typed values the rest of the service can trust.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::models::{
    CreateFormRequest, FieldBase, FieldDef, FieldKind, FieldOption, FormChanges, FormStatus,
    NewForm, SubmitRequest, UpdateFormRequest,
};

/// Upper bound shared by titles, labels, names and placeholders.
const MAX_TEXT_LEN: usize = 255;

/// Validate a form creation payload.
///
/// The title is mandatory; the field list defaults to an empty schema. A
/// `status` attribute is tolerated but ignored, every form starts as a
/// draft.
pub fn validate_create(payload: CreateFormRequest) -> Result<NewForm, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = match payload.title.as_ref() {
        None | Some(Value::Null) => {
            errors.add("title", "title is required");
            None
        }
        Some(value) => check_title(value, &mut errors),
    };
    let fields = match payload.fields.as_ref() {
        None => Some(Vec::new()),
        Some(value) => check_field_list(value, &mut errors),
    };

    match (title, fields) {
        (Some(title), Some(fields)) if errors.is_empty() => Ok(NewForm { title, fields }),
        _ => Err(errors),
    }
}

/// Validate a partial form update.
///
/// Absent attributes stay untouched; a present field list replaces the
/// stored schema wholesale.
pub fn validate_update(payload: UpdateFormRequest) -> Result<FormChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = payload
        .title
        .as_ref()
        .and_then(|value| check_title(value, &mut errors));
    let fields = payload
        .fields
        .as_ref()
        .and_then(|value| check_field_list(value, &mut errors));
    let status = payload
        .status
        .as_ref()
        .and_then(|value| check_status(value, &mut errors));

    if errors.is_empty() {
        Ok(FormChanges { title, fields, status })
    } else {
        Err(errors)
    }
}

/// Validate a raw field list into its typed form.
///
/// All definitions are checked before returning; any failure yields the
/// complete error map and no fields at all.
pub fn validate_fields(candidates: &[Value]) -> Result<Vec<FieldDef>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut fields = Vec::with_capacity(candidates.len());
    let mut seen = HashSet::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let Some(field) = check_field(index, candidate, &mut errors) else {
            continue;
        };
        if !seen.insert(field.name().to_string()) {
            errors.add(
                format!("fields.{index}.name"),
                format!("field name `{}` is used more than once", field.name()),
            );
        }
        fields.push(field);
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(errors)
    }
}

/// Validate a public submission payload, returning the verbatim data object.
pub fn validate_submission(payload: SubmitRequest) -> Result<Value, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    match payload.data {
        None | Some(Value::Null) => {
            errors.add("data", "data is required");
            Err(errors)
        }
        Some(Value::Object(map)) if map.is_empty() => {
            errors.add("data", "data is required");
            Err(errors)
        }
        Some(data @ Value::Object(_)) => Ok(data),
        Some(_) => {
            errors.add("data", "data must be an object");
            Err(errors)
        }
    }
}

fn check_title(value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    let Some(raw) = value.as_str() else {
        errors.add("title", "title must be a string");
        return None;
    };
    let title = raw.trim();
    if title.is_empty() {
        errors.add("title", "title is required");
        return None;
    }
    if title.chars().count() > MAX_TEXT_LEN {
        errors.add("title", "title must not be greater than 255 characters");
        return None;
    }
    Some(title.to_string())
}

fn check_status(value: &Value, errors: &mut ValidationErrors) -> Option<FormStatus> {
    let status = value.as_str().and_then(|raw| match raw {
        "draft" => Some(FormStatus::Draft),
        "published" => Some(FormStatus::Published),
        _ => None,
    });
    if status.is_none() {
        errors.add("status", "status must be one of: draft, published");
    }
    status
}

fn check_field_list(value: &Value, errors: &mut ValidationErrors) -> Option<Vec<FieldDef>> {
    let Some(list) = value.as_array() else {
        errors.add("fields", "fields must be an array");
        return None;
    };
    match validate_fields(list) {
        Ok(fields) => Some(fields),
        Err(inner) => {
            errors.merge(inner);
            None
        }
    }
}

fn check_field(index: usize, candidate: &Value, errors: &mut ValidationErrors) -> Option<FieldDef> {
    let Some(attrs) = candidate.as_object() else {
        errors.add(format!("fields.{index}"), "field definition must be an object");
        return None;
    };

    let kind = check_kind(index, attrs, errors);
    let label = check_text_attr(index, attrs, "label", errors);
    let name = check_text_attr(index, attrs, "name", errors);
    let required = check_required_flag(index, attrs, errors);
    let placeholder = check_placeholder(index, attrs, errors);
    let options = check_field_options(index, attrs, kind, errors);

    let (Some(kind), Some(label), Some(name)) = (kind, label, name) else {
        return None;
    };
    let base = FieldBase { label, name, required, placeholder };
    Some(match kind {
        FieldKind::Text => FieldDef::Text { base },
        FieldKind::Textarea => FieldDef::Textarea { base },
        FieldKind::Number => FieldDef::Number { base },
        FieldKind::Email => FieldDef::Email { base },
        FieldKind::Select => FieldDef::Select { base, options: options? },
        FieldKind::Radio => FieldDef::Radio { base, options: options? },
        FieldKind::Checkbox => FieldDef::Checkbox { base },
        FieldKind::Date => FieldDef::Date { base },
    })
}

fn check_kind(
    index: usize,
    attrs: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<FieldKind> {
    let path = format!("fields.{index}.type");
    match attrs.get("type") {
        None | Some(Value::Null) => {
            errors.add(path, "type is required");
            None
        }
        Some(value) => {
            let kind = value.as_str().and_then(FieldKind::parse);
            if kind.is_none() {
                errors.add(path, format!("type must be one of: {}", allowed_kinds()));
            }
            kind
        }
    }
}

fn allowed_kinds() -> String {
    FieldKind::ALL.map(|kind| kind.as_str()).join(", ")
}

fn check_text_attr(
    index: usize,
    attrs: &Map<String, Value>,
    attr: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let path = format!("fields.{index}.{attr}");
    let value = match attrs.get(attr) {
        None | Some(Value::Null) => {
            errors.add(path, format!("{attr} is required"));
            return None;
        }
        Some(value) => value,
    };
    let Some(raw) = value.as_str() else {
        errors.add(path, format!("{attr} must be a string"));
        return None;
    };
    let text = raw.trim();
    if text.is_empty() {
        errors.add(path, format!("{attr} is required"));
        return None;
    }
    if text.chars().count() > MAX_TEXT_LEN {
        errors.add(path, format!("{attr} must not be greater than 255 characters"));
        return None;
    }
    Some(text.to_string())
}

fn check_required_flag(
    index: usize,
    attrs: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> bool {
    match attrs.get("required") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            errors.add(format!("fields.{index}.required"), "required must be a boolean");
            false
        }
    }
}

fn check_placeholder(
    index: usize,
    attrs: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match attrs.get("placeholder") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => {
            let text = raw.trim();
            if text.is_empty() {
                None
            } else if text.chars().count() > MAX_TEXT_LEN {
                errors.add(
                    format!("fields.{index}.placeholder"),
                    "placeholder must not be greater than 255 characters",
                );
                None
            } else {
                Some(text.to_string())
            }
        }
        Some(_) => {
            errors.add(
                format!("fields.{index}.placeholder"),
                "placeholder must be a string",
            );
            None
        }
    }
}

/// Enforce the pairing between choice kinds and option lists. With an
/// unknown kind the requirement cannot be judged, so options are skipped
/// and only the `type` error stands.
fn check_field_options(
    index: usize,
    attrs: &Map<String, Value>,
    kind: Option<FieldKind>,
    errors: &mut ValidationErrors,
) -> Option<Vec<FieldOption>> {
    let kind = kind?;
    let path = format!("fields.{index}.options");
    match (kind.requires_options(), attrs.get("options")) {
        (true, None) | (true, Some(Value::Null)) => {
            errors.add(path, format!("options are required for {kind} fields"));
            None
        }
        (true, Some(value)) => check_options(index, kind, value, errors),
        (false, None) | (false, Some(Value::Null)) => None,
        (false, Some(_)) => {
            errors.add(path, format!("options are not allowed for {kind} fields"));
            None
        }
    }
}

fn check_options(
    index: usize,
    kind: FieldKind,
    value: &Value,
    errors: &mut ValidationErrors,
) -> Option<Vec<FieldOption>> {
    let path = format!("fields.{index}.options");
    let Some(list) = value.as_array() else {
        errors.add(path, "options must be an array");
        return None;
    };
    if list.is_empty() {
        errors.add(path, format!("options are required for {kind} fields"));
        return None;
    }

    let mut options = Vec::with_capacity(list.len());
    let mut valid = true;
    for (opt_index, entry) in list.iter().enumerate() {
        let Some(attrs) = entry.as_object() else {
            errors.add(
                format!("fields.{index}.options.{opt_index}"),
                "option must be an object",
            );
            valid = false;
            continue;
        };
        let label = check_option_attr(index, opt_index, attrs, "label", errors);
        let value = check_option_attr(index, opt_index, attrs, "value", errors);
        match (label, value) {
            (Some(label), Some(value)) => options.push(FieldOption { label, value }),
            _ => valid = false,
        }
    }
    valid.then_some(options)
}

fn check_option_attr(
    index: usize,
    opt_index: usize,
    attrs: &Map<String, Value>,
    attr: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let path = format!("fields.{index}.options.{opt_index}.{attr}");
    match attrs.get(attr) {
        None | Some(Value::Null) => {
            errors.add(path, format!("{attr} is required"));
            None
        }
        Some(Value::String(raw)) => {
            let text = raw.trim();
            if text.is_empty() {
                errors.add(path, format!("{attr} is required"));
                None
            } else {
                Some(text.to_string())
            }
        }
        Some(_) => {
            errors.add(path, format!("{attr} must be a string"));
            None
        }
    }
}
