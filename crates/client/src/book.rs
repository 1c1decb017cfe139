//! State behind the single contacts view: one list, one form.
//!
//! [`ContactBook`] holds the fetched list, the form draft, the id being
//! edited (if any) and the visible error. It issues at most one request per
//! user action and always replaces the list wholesale after a mutation.

use contact_book_core::{Contact, ContactField, ContactFields, ContactId, ContactInput};

use crate::api::ContactApi;

pub const FETCH_FAILED: &str = "Failed to fetch contacts";
pub const CREATE_FAILED: &str = "Failed to add contact";
pub const UPDATE_FAILED: &str = "Failed to update contact";
pub const DELETE_FAILED: &str = "Failed to delete contact";
pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this contact?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// The form's in-progress values. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl ContactDraft {
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    fn to_input(&self) -> ContactInput {
        ContactInput::new(&self.first_name, &self.last_name, &self.phone)
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone: contact.phone.clone(),
        }
    }
}

/// View state for the contacts list and form.
#[derive(Debug)]
pub struct ContactBook<A> {
    api: A,
    contacts: Vec<Contact>,
    draft: ContactDraft,
    editing: Option<ContactId>,
    error: Option<String>,
    loading: bool,
}

impl<A: ContactApi> ContactBook<A> {
    /// Create an empty view. Call [`Self::load`] to fetch the list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            draft: ContactDraft::default(),
            editing: None,
            error: None,
            loading: true,
        }
    }

    /// The most recently fetched list, newest id first.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Find a contact in the fetched list.
    #[must_use]
    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub const fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    /// The id being edited; `None` means the form creates a new contact.
    #[must_use]
    pub const fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    /// The visible error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a list fetch has not completed yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Replace the list with a fresh copy from the API.
    ///
    /// On failure the previous list is kept and the error is shown.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list().await {
            Ok(contacts) => self.contacts = contacts,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch contacts");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Edit one field of the draft.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Replace the whole draft.
    pub fn set_draft(&mut self, draft: ContactDraft) {
        self.draft = draft;
    }

    /// Load a contact into the form for in-place editing.
    pub fn begin_edit(&mut self, contact: &Contact) {
        self.draft = ContactDraft::from(contact);
        self.editing = Some(contact.id);
    }

    /// Clear the form and return to create mode.
    pub fn cancel(&mut self) {
        self.draft = ContactDraft::default();
        self.editing = None;
    }

    /// Submit the form: create, or update the contact being edited.
    ///
    /// Returns the written contact. On failure the error is shown and the
    /// form stays populated; nothing is retried.
    pub async fn submit(&mut self) -> Option<Contact> {
        self.error = None;

        let Ok(fields) = self.draft.to_input().validate() else {
            self.error = Some(FIELDS_REQUIRED.to_string());
            return None;
        };

        let written = match self.editing {
            Some(id) => self.write_update(id, &fields).await,
            None => self.write_create(&fields).await,
        }?;

        self.load().await;
        self.cancel();
        Some(written)
    }

    async fn write_create(&mut self, fields: &ContactFields) -> Option<Contact> {
        match self.api.create(fields).await {
            Ok(contact) => Some(contact),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to add contact");
                self.error = Some(CREATE_FAILED.to_string());
                None
            }
        }
    }

    async fn write_update(&mut self, id: ContactId, fields: &ContactFields) -> Option<Contact> {
        match self.api.update(id, fields).await {
            Ok(contact) => Some(contact),
            Err(e) => {
                tracing::warn!(contact_id = %id, error = %e, "Failed to update contact");
                self.error = Some(UPDATE_FAILED.to_string());
                None
            }
        }
    }

    /// Delete a contact after the user confirms.
    ///
    /// Returns `true` if the contact was deleted. Declining leaves every
    /// piece of state untouched.
    pub async fn delete(&mut self, id: ContactId, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }

        self.error = None;

        if let Err(e) = self.api.delete(id).await {
            tracing::warn!(contact_id = %id, error = %e, "Failed to delete contact");
            self.error = Some(DELETE_FAILED.to_string());
            return false;
        }

        self.load().await;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::error::ClientError;

    /// In-memory stand-in for the API with the server's semantics.
    #[derive(Default)]
    struct FakeApi {
        store: Mutex<FakeStore>,
    }

    #[derive(Default)]
    struct FakeStore {
        contacts: Vec<Contact>,
        last_id: i32,
        offline: bool,
        requests: usize,
    }

    impl FakeApi {
        fn with_contacts(names: &[(&str, &str, &str)]) -> Self {
            let api = Self::default();
            for (first, last, phone) in names {
                api.insert(first, last, phone);
            }
            api
        }

        fn insert(&self, first: &str, last: &str, phone: &str) -> Contact {
            let mut store = self.store.lock().unwrap();
            store.last_id += 1;
            let contact = Contact {
                id: ContactId::new(store.last_id),
                first_name: first.to_string(),
                last_name: last.to_string(),
                phone: phone.to_string(),
                created_at: Utc::now(),
            };
            store.contacts.push(contact.clone());
            contact
        }

        fn set_offline(&self, offline: bool) {
            self.store.lock().unwrap().offline = offline;
        }

        fn requests(&self) -> usize {
            self.store.lock().unwrap().requests
        }

        fn stored(&self) -> Vec<Contact> {
            self.store.lock().unwrap().contacts.clone()
        }

        fn begin(&self) -> Result<std::sync::MutexGuard<'_, FakeStore>, ClientError> {
            let mut store = self.store.lock().unwrap();
            store.requests += 1;
            if store.offline {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Internal server error".to_string(),
                });
            }
            Ok(store)
        }
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: "Contact not found".to_string(),
        }
    }

    impl ContactApi for FakeApi {
        async fn list(&self) -> Result<Vec<Contact>, ClientError> {
            let store = self.begin()?;
            let mut contacts = store.contacts.clone();
            contacts.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(contacts)
        }

        async fn get(&self, id: ContactId) -> Result<Contact, ClientError> {
            let store = self.begin()?;
            store
                .contacts
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(not_found)
        }

        async fn create(&self, fields: &ContactFields) -> Result<Contact, ClientError> {
            drop(self.begin()?);
            Ok(self.insert(fields.first_name(), fields.last_name(), fields.phone()))
        }

        async fn update(
            &self,
            id: ContactId,
            fields: &ContactFields,
        ) -> Result<Contact, ClientError> {
            let mut store = self.begin()?;
            let contact = store
                .contacts
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(not_found)?;
            contact.first_name = fields.first_name().to_string();
            contact.last_name = fields.last_name().to_string();
            contact.phone = fields.phone().to_string();
            Ok(contact.clone())
        }

        async fn delete(&self, id: ContactId) -> Result<String, ClientError> {
            let mut store = self.begin()?;
            let before = store.contacts.len();
            store.contacts.retain(|c| c.id != id);
            if store.contacts.len() == before {
                return Err(not_found());
            }
            Ok("Contact deleted successfully".to_string())
        }
    }

    fn fill(book: &mut ContactBook<FakeApi>, first: &str, last: &str, phone: &str) {
        book.set_field(ContactField::FirstName, first);
        book.set_field(ContactField::LastName, last);
        book.set_field(ContactField::Phone, phone);
    }

    #[tokio::test]
    async fn test_load_fetches_newest_first() {
        let api = FakeApi::with_contacts(&[("Ada", "Lovelace", "1"), ("Alan", "Turing", "2")]);
        let mut book = ContactBook::new(api);
        assert!(book.is_loading());

        book.load().await;

        assert!(!book.is_loading());
        assert!(book.error().is_none());
        let names: Vec<_> = book.contacts().iter().map(Contact::full_name).collect();
        assert_eq!(names, ["Alan Turing", "Ada Lovelace"]);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_list() {
        let api = FakeApi::with_contacts(&[("Ada", "Lovelace", "1")]);
        let mut book = ContactBook::new(api);
        book.load().await;

        book.api().set_offline(true);
        book.load().await;

        assert_eq!(book.error(), Some(FETCH_FAILED));
        assert_eq!(book.contacts().len(), 1);
        assert!(!book.is_loading());
    }

    #[tokio::test]
    async fn test_submit_creates_and_resets_form() {
        let mut book = ContactBook::new(FakeApi::default());
        book.load().await;
        fill(&mut book, "Jane", "Doe", "555-1212");

        let created = book.submit().await.unwrap();

        assert_eq!(created.first_name, "Jane");
        assert_eq!(book.contacts(), [created]);
        assert_eq!(book.draft(), &ContactDraft::default());
        assert!(book.editing().is_none());
        assert!(book.error().is_none());
    }

    #[tokio::test]
    async fn test_submit_with_empty_field_sends_nothing() {
        let mut book = ContactBook::new(FakeApi::default());
        book.load().await;
        let requests = book.api().requests();
        fill(&mut book, "Jane", "", "555-1212");

        assert!(book.submit().await.is_none());

        assert_eq!(book.error(), Some(FIELDS_REQUIRED));
        assert_eq!(book.api().requests(), requests);
        assert_eq!(book.draft().first_name, "Jane");
        assert!(book.api().stored().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form_populated() {
        let mut book = ContactBook::new(FakeApi::default());
        book.load().await;
        fill(&mut book, "Jane", "Doe", "555-1212");
        book.api().set_offline(true);

        assert!(book.submit().await.is_none());

        assert_eq!(book.error(), Some(CREATE_FAILED));
        assert_eq!(book.draft().last_name, "Doe");
    }

    #[tokio::test]
    async fn test_edit_updates_in_place() {
        let api = FakeApi::with_contacts(&[("Jane", "Doe", "555-1212")]);
        let mut book = ContactBook::new(api);
        book.load().await;

        let contact = book.contacts()[0].clone();
        book.begin_edit(&contact);
        assert_eq!(book.editing(), Some(contact.id));
        assert_eq!(book.draft().phone, "555-1212");

        book.set_field(ContactField::Phone, "555-9999");
        let updated = book.submit().await.unwrap();

        assert_eq!(updated.id, contact.id);
        assert_eq!(updated.created_at, contact.created_at);
        assert_eq!(book.contact(contact.id).unwrap().phone, "555-9999");
        assert!(book.editing().is_none());
        assert_eq!(book.api().stored().len(), 1);
    }

    #[tokio::test]
    async fn test_update_of_deleted_contact_shows_error() {
        let api = FakeApi::with_contacts(&[("Jane", "Doe", "555-1212")]);
        let mut book = ContactBook::new(api);
        book.load().await;

        let contact = book.contacts()[0].clone();
        book.begin_edit(&contact);
        book.api().store.lock().unwrap().contacts.clear();

        assert!(book.submit().await.is_none());
        assert_eq!(book.error(), Some(UPDATE_FAILED));
        assert_eq!(book.editing(), Some(contact.id));
    }

    #[tokio::test]
    async fn test_cancel_returns_to_create_mode() {
        let api = FakeApi::with_contacts(&[("Jane", "Doe", "555-1212")]);
        let mut book = ContactBook::new(api);
        book.load().await;

        let contact = book.contacts()[0].clone();
        book.begin_edit(&contact);
        book.cancel();

        assert!(book.editing().is_none());
        assert_eq!(book.draft(), &ContactDraft::default());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let api = FakeApi::with_contacts(&[("Jane", "Doe", "555-1212")]);
        let mut book = ContactBook::new(api);
        book.load().await;
        let id = book.contacts()[0].id;
        let requests = book.api().requests();

        let mut prompts = Vec::new();
        let deleted = book
            .delete(id, &mut |prompt: &str| {
                prompts.push(prompt.to_string());
                false
            })
            .await;

        assert!(!deleted);
        assert_eq!(prompts, [DELETE_PROMPT]);
        assert_eq!(book.api().requests(), requests);
        assert_eq!(book.contacts().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_refetches_list() {
        let api = FakeApi::with_contacts(&[("Jane", "Doe", "1"), ("John", "Roe", "2")]);
        let mut book = ContactBook::new(api);
        book.load().await;
        let id = book.contacts()[0].id;

        assert!(book.delete(id, &mut |_: &str| true).await);

        assert!(book.contact(id).is_none());
        assert_eq!(book.contacts().len(), 1);
        assert!(book.error().is_none());
    }

    #[tokio::test]
    async fn test_second_delete_shows_error() {
        let api = FakeApi::with_contacts(&[("Jane", "Doe", "1")]);
        let mut book = ContactBook::new(api);
        book.load().await;
        let id = book.contacts()[0].id;

        assert!(book.delete(id, &mut |_: &str| true).await);
        assert!(!book.delete(id, &mut |_: &str| true).await);
        assert_eq!(book.error(), Some(DELETE_FAILED));
    }

    #[tokio::test]
    async fn test_get_unknown_contact_is_not_found() {
        let api = FakeApi::default();
        let err = api.get(ContactId::new(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
