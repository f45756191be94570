//! In-process form and submission store.
//!
//! Keeps the relational shape of the persistence boundary: a unique slug
//! index, owner scoping, and submissions that live and die with their
//! form. All tables sit behind one lock, so every operation is atomic
//! and readers never observe a half-applied mutation.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{FieldDef, Form, FormChanges, FormStatus, Submission};

/// Failures surfaced by the store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slug index already maps this key to another form.
    #[error("slug `{0}` is already taken")]
    SlugTaken(String),
}

#[derive(Default)]
struct Tables {
    forms: HashMap<Uuid, StoredForm>,
    /// Unique index: slug to form id.
    slugs: HashMap<String, Uuid>,
    /// Submissions per form, in arrival order.
    submissions: HashMap<Uuid, Vec<Submission>>,
    /// Monotonic insertion counter, used for recency ordering.
    seq: u64,
}

struct StoredForm {
    form: Form,
    seq: u64,
}

/// Thread-safe store shared across request handlers.
#[derive(Default)]
pub struct FormStore {
    tables: RwLock<Tables>,
}

impl FormStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new draft form owned by `owner_id`.
    pub fn create_form(
        &self,
        owner_id: Uuid,
        title: String,
        slug: String,
        fields: Vec<FieldDef>,
    ) -> Result<Form, StoreError> {
        let mut tables = self.tables.write();
        if tables.slugs.contains_key(&slug) {
            return Err(StoreError::SlugTaken(slug));
        }

        let now = Utc::now();
        let form = Form {
            id: Uuid::new_v4(),
            owner_id,
            title,
            slug: slug.clone(),
            fields,
            status: FormStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        tables.seq += 1;
        let seq = tables.seq;
        tables.slugs.insert(slug, form.id);
        tables.submissions.insert(form.id, Vec::new());
        tables.forms.insert(form.id, StoredForm { form: form.clone(), seq });
        Ok(form)
    }

    /// Look up a form by id.
    pub fn get_form(&self, id: Uuid) -> Option<Form> {
        self.tables.read().forms.get(&id).map(|stored| stored.form.clone())
    }

    /// Look up a form through the slug index.
    pub fn get_form_by_slug(&self, slug: &str) -> Option<Form> {
        let tables = self.tables.read();
        let id = tables.slugs.get(slug)?;
        tables.forms.get(id).map(|stored| stored.form.clone())
    }

    /// All forms owned by `owner_id`, most recently created first.
    pub fn get_forms_for_owner(&self, owner_id: Uuid) -> Vec<Form> {
        let tables = self.tables.read();
        let mut owned: Vec<&StoredForm> = tables
            .forms
            .values()
            .filter(|stored| stored.form.owner_id == owner_id)
            .collect();
        owned.sort_by(|a, b| b.seq.cmp(&a.seq));
        owned.into_iter().map(|stored| stored.form.clone()).collect()
    }

    /// Apply validated changes to a form; `None` if the form is gone.
    ///
    /// The slug never changes, even when the title does, so published
    /// links keep working.
    pub fn update_form(&self, id: Uuid, changes: FormChanges) -> Option<Form> {
        let mut tables = self.tables.write();
        let stored = tables.forms.get_mut(&id)?;
        if let Some(title) = changes.title {
            stored.form.title = title;
        }
        if let Some(fields) = changes.fields {
            stored.form.fields = fields;
        }
        if let Some(status) = changes.status {
            stored.form.status = status;
        }
        stored.form.updated_at = Utc::now();
        Some(stored.form.clone())
    }

    /// Remove a form together with its slug entry and submissions.
    pub fn delete_form(&self, id: Uuid) -> bool {
        let mut tables = self.tables.write();
        let Some(stored) = tables.forms.remove(&id) else {
            return false;
        };
        tables.slugs.remove(&stored.form.slug);
        tables.submissions.remove(&id);
        true
    }

    /// Append a submission to a form; `None` if the form is gone.
    pub fn create_submission(&self, form_id: Uuid, data: Value) -> Option<Submission> {
        let mut tables = self.tables.write();
        if !tables.forms.contains_key(&form_id) {
            return None;
        }
        let submission = Submission {
            id: Uuid::new_v4(),
            form_id,
            data,
            created_at: Utc::now(),
        };
        tables
            .submissions
            .entry(form_id)
            .or_default()
            .push(submission.clone());
        Some(submission)
    }

    /// Submissions for a form in arrival order, oldest first.
    pub fn get_submissions_for_form(&self, form_id: Uuid) -> Vec<Submission> {
        self.tables
            .read()
            .submissions
            .get(&form_id)
            .cloned()
            .unwrap_or_default()
    }
}
