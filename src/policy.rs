//! Ownership policy.
//!
//! Authorization decisions live here rather than inline in handlers, so
//! the rules read in one place and handlers only ask yes-or-no questions.

use uuid::Uuid;

use crate::models::Form;

/// Whether `account_id` may read the form through the management API.
pub fn can_view(account_id: Uuid, form: &Form) -> bool {
    form.owner_id == account_id
}

/// Whether `account_id` may change or delete the form, or read its
/// submissions.
pub fn can_mutate(account_id: Uuid, form: &Form) -> bool {
    form.owner_id == account_id
}
