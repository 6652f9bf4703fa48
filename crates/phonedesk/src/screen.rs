//! The user form screen: three fields, four buttons, alert feedback.
//!
//! Every button press is one call to the document store. While a call is in
//! flight the screen is *loading* and further presses are ignored, the same
//! way a disabled button would ignore them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::Result;
use crate::form::{Invalid, PhoneRule, Submission, UserForm};
use crate::record::{UserPatch, UserRecord};
use crate::store::DocumentStore;

/// Alert shown after a successful insert.
pub const USER_ADDED: &str = "User Added successfully";
/// Alert shown when an insert fails in the store.
pub const INSERT_FAILED: &str = "Something went wrong";
/// Alert shown after a successful update.
pub const USER_UPDATED: &str = "User updated successfully";
/// Alert shown when an update fails in the store.
pub const UPDATE_FAILED: &str = "Update failed";
/// Alert shown after a successful delete.
pub const USER_DELETED: &str = "User deleted successfully";
/// Alert shown when a delete fails in the store.
pub const DELETE_FAILED: &str = "Failed to delete user";
/// Alert shown when a view fails in the store.
pub const FETCH_FAILED: &str = "Failed to fetch user";
/// Alert shown when no record has the phone number.
pub const USER_NOT_FOUND: &str = "User not found";

/// Field the update handler searches on.
const PHONE_FIELD: &str = "phone";

/// Whether an alert reports success or a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The operation succeeded.
    Info,
    /// Validation failed, nothing was found, or the store failed.
    Error,
}

/// A message shown to the user after a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Success or problem.
    pub kind: AlertKind,
    /// Text shown to the user.
    pub message: String,
}

impl Alert {
    /// Create a success alert.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    /// Create a problem alert.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    /// Check if this alert reports a problem.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<Invalid> for Alert {
    fn from(invalid: Invalid) -> Self {
        Self::error(invalid.to_string())
    }
}

/// The four buttons on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Write the form as a new record.
    Insert,
    /// Change the name and age of an existing record.
    Update,
    /// Remove the record with the form's phone number.
    Delete,
    /// Load the record with the form's phone number.
    View,
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::View => write!(f, "view"),
        }
    }
}

/// Clears the loading flag when dropped, on every exit path.
struct Loading<'a>(&'a AtomicBool);

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The user form screen.
///
/// Shareable between tasks; the form fields sit behind a mutex that is
/// never held across a store call.
#[derive(Debug)]
pub struct Screen {
    store: Arc<dyn DocumentStore>,
    collection: String,
    phone_rule: PhoneRule,
    form: Mutex<UserForm>,
    loading: AtomicBool,
}

impl Screen {
    /// Create a screen writing to `collection` in `store`.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        phone_rule: PhoneRule,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            phone_rule,
            form: Mutex::new(UserForm::default()),
            loading: AtomicBool::new(false),
        }
    }

    /// Create a screen using the collection and phone rule from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured phone pattern is not a valid regex.
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &Config) -> Result<Self> {
        let phone_rule = PhoneRule::new(&config.form.phone_pattern)?;
        Ok(Self::new(store, config.store.collection.clone(), phone_rule))
    }

    /// Snapshot of the form fields.
    #[must_use]
    pub fn form(&self) -> UserForm {
        self.lock_form().clone()
    }

    /// Replace all three form fields.
    pub fn set_form(&self, form: UserForm) {
        *self.lock_form() = form;
    }

    /// Set the name field.
    pub fn set_name(&self, name: impl Into<String>) {
        self.lock_form().name = name.into();
    }

    /// Set the phone field.
    pub fn set_phone(&self, phone: impl Into<String>) {
        self.lock_form().phone = phone.into();
    }

    /// Set the age field.
    pub fn set_age(&self, age: impl Into<String>) {
        self.lock_form().age = age.into();
    }

    /// Clear all form fields.
    pub fn clear_form(&self) {
        self.lock_form().clear();
    }

    /// Whether a button press is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Label of the insert button.
    #[must_use]
    pub fn insert_label(&self) -> &'static str {
        if self.is_loading() {
            "Saving..."
        } else {
            "Insert"
        }
    }

    /// Press a button.
    ///
    /// Returns the alert to show, or `None` when there is nothing to show:
    /// the press was ignored while loading, or a view succeeded.
    pub async fn press(&self, button: Button) -> Option<Alert> {
        match button {
            Button::Insert => self.insert().await,
            Button::Update => self.update().await,
            Button::Delete => self.delete().await,
            Button::View => self.view().await,
        }
    }

    /// Press **Insert**: validate and write the form as a new record.
    ///
    /// Any existing record with the same phone number is replaced. The form
    /// is cleared on success.
    pub async fn insert(&self) -> Option<Alert> {
        let _loading = self.begin()?;
        let submission = match self.form().validate_for_insert(&self.phone_rule) {
            Ok(submission) => submission,
            Err(invalid) => return Some(invalid.into()),
        };

        let record = UserRecord::new(submission.name, submission.phone, submission.age);
        match self.write_record(&record).await {
            Ok(()) => {
                info!("Added user {}", record.phone);
                self.clear_form();
                Some(Alert::info(USER_ADDED))
            }
            Err(e) => {
                error!("Error adding document {}: {}", record.phone, e);
                Some(Alert::error(INSERT_FAILED))
            }
        }
    }

    /// Press **Update**: change the name and age of the record with the
    /// form's phone number.
    ///
    /// The form is kept as typed.
    pub async fn update(&self) -> Option<Alert> {
        let _loading = self.begin()?;
        let submission = match self.form().validate_for_update(&self.phone_rule) {
            Ok(submission) => submission,
            Err(invalid) => return Some(invalid.into()),
        };

        match self.update_by_phone(&submission).await {
            Ok(true) => {
                info!("Updated user {}", submission.phone);
                Some(Alert::info(USER_UPDATED))
            }
            Ok(false) => Some(Alert::error(USER_NOT_FOUND)),
            Err(e) => {
                error!("Update of {} failed: {}", submission.phone, e);
                Some(Alert::error(UPDATE_FAILED))
            }
        }
    }

    /// Press **Delete**: remove the record with the form's phone number.
    ///
    /// Succeeds whether or not the record existed. The form is cleared on
    /// success.
    pub async fn delete(&self) -> Option<Alert> {
        let _loading = self.begin()?;
        let phone = match self.form().require_phone() {
            Ok(phone) => phone.to_string(),
            Err(invalid) => return Some(invalid.into()),
        };

        match self.store.delete(&self.collection, &phone).await {
            Ok(existed) => {
                if existed {
                    info!("Deleted user {}", phone);
                } else {
                    debug!("Delete of {} matched no record", phone);
                }
                self.clear_form();
                Some(Alert::info(USER_DELETED))
            }
            Err(e) => {
                error!("Delete of {} failed: {}", phone, e);
                Some(Alert::error(DELETE_FAILED))
            }
        }
    }

    /// Press **View**: load the record with the form's phone number into the
    /// form.
    ///
    /// Shows no alert when the record is found.
    pub async fn view(&self) -> Option<Alert> {
        let _loading = self.begin()?;
        let phone = match self.form().require_phone() {
            Ok(phone) => phone.to_string(),
            Err(invalid) => return Some(invalid.into()),
        };

        match self.read_record(&phone).await {
            Ok(Some(record)) => {
                debug!("Loaded user {}", phone);
                self.lock_form().fill_from(&record);
                None
            }
            Ok(None) => Some(Alert::error(USER_NOT_FOUND)),
            Err(e) => {
                error!("View of {} failed: {}", phone, e);
                Some(Alert::error(FETCH_FAILED))
            }
        }
    }

    /// Enter the loading state, or `None` if a press is already in flight.
    fn begin(&self) -> Option<Loading<'_>> {
        if self.loading.swap(true, Ordering::SeqCst) {
            debug!("Ignoring button press while loading");
            None
        } else {
            Some(Loading(&self.loading))
        }
    }

    fn lock_form(&self) -> std::sync::MutexGuard<'_, UserForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn write_record(&self, record: &UserRecord) -> Result<()> {
        let document = record.to_document()?;
        self.store
            .set(&self.collection, record.key(), document)
            .await
    }

    async fn read_record(&self, phone: &str) -> Result<Option<UserRecord>> {
        self.store
            .get(&self.collection, phone)
            .await?
            .map(|document| UserRecord::from_document(phone, document))
            .transpose()
    }

    /// Returns `false` when no record carries the phone number.
    async fn update_by_phone(&self, submission: &Submission) -> Result<bool> {
        let matches = self
            .store
            .find_eq(
                &self.collection,
                PHONE_FIELD,
                &Value::String(submission.phone.clone()),
            )
            .await?;
        let Some((key, _)) = matches.into_iter().next() else {
            return Ok(false);
        };

        let patch = UserPatch::new(submission.name.clone(), submission.age).to_document()?;
        match self.store.update(&self.collection, &key, patch).await {
            Ok(()) => Ok(true),
            // Deleted between the lookup and the write
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PHONE_PATTERN;
    use crate::error::Error;
    use crate::store::{Document, MemoryStore};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    const PHONE: &str = "5551234567";

    fn screen_with(store: Arc<dyn DocumentStore>) -> Screen {
        Screen::new(
            store,
            "users",
            PhoneRule::new(DEFAULT_PHONE_PATTERN).unwrap(),
        )
    }

    fn memory_screen() -> (Arc<MemoryStore>, Screen) {
        let store = Arc::new(MemoryStore::new());
        let screen = screen_with(store.clone());
        (store, screen)
    }

    async fn stored(store: &MemoryStore, phone: &str) -> Option<UserRecord> {
        store
            .get("users", phone)
            .await
            .unwrap()
            .map(|doc| UserRecord::from_document(phone, doc).unwrap())
    }

    /// A store whose every call fails.
    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn set(&self, _: &str, _: &str, _: Document) -> Result<()> {
            Err(Error::internal("unavailable"))
        }

        async fn get(&self, _: &str, _: &str) -> Result<Option<Document>> {
            Err(Error::internal("unavailable"))
        }

        async fn update(&self, _: &str, _: &str, _: Document) -> Result<()> {
            Err(Error::internal("unavailable"))
        }

        async fn delete(&self, _: &str, _: &str) -> Result<bool> {
            Err(Error::internal("unavailable"))
        }

        async fn find_eq(&self, _: &str, _: &str, _: &Value) -> Result<Vec<(String, Document)>> {
            Err(Error::internal("unavailable"))
        }
    }

    /// A memory store whose `set` waits until the test opens the gate.
    #[derive(Debug, Default)]
    struct GatedStore {
        inner: MemoryStore,
        entered: Notify,
        gate: Notify,
    }

    #[async_trait]
    impl DocumentStore for GatedStore {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn set(&self, collection: &str, key: &str, document: Document) -> Result<()> {
            self.entered.notify_one();
            self.gate.notified().await;
            self.inner.set(collection, key, document).await
        }

        async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>> {
            self.inner.get(collection, key).await
        }

        async fn update(&self, collection: &str, key: &str, fields: Document) -> Result<()> {
            self.inner.update(collection, key, fields).await
        }

        async fn delete(&self, collection: &str, key: &str) -> Result<bool> {
            self.inner.delete(collection, key).await
        }

        async fn find_eq(
            &self,
            collection: &str,
            field: &str,
            value: &Value,
        ) -> Result<Vec<(String, Document)>> {
            self.inner.find_eq(collection, field, value).await
        }
    }

    /// A memory store whose lookups succeed but whose `update` fails.
    #[derive(Debug, Default)]
    struct RejectingUpdateStore {
        inner: MemoryStore,
        /// Report the record as gone instead of failing outright.
        vanished: bool,
    }

    #[async_trait]
    impl DocumentStore for RejectingUpdateStore {
        fn name(&self) -> &'static str {
            "rejecting-update"
        }

        async fn set(&self, collection: &str, key: &str, document: Document) -> Result<()> {
            self.inner.set(collection, key, document).await
        }

        async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>> {
            self.inner.get(collection, key).await
        }

        async fn update(&self, collection: &str, key: &str, _: Document) -> Result<()> {
            if self.vanished {
                Err(Error::not_found(collection, key))
            } else {
                Err(Error::internal("write rejected"))
            }
        }

        async fn delete(&self, collection: &str, key: &str) -> Result<bool> {
            self.inner.delete(collection, key).await
        }

        async fn find_eq(
            &self,
            collection: &str,
            field: &str,
            value: &Value,
        ) -> Result<Vec<(String, Document)>> {
            self.inner.find_eq(collection, field, value).await
        }
    }

    async fn rejecting_update_screen(vanished: bool) -> Screen {
        let store = RejectingUpdateStore {
            vanished,
            ..RejectingUpdateStore::default()
        };
        let record = UserRecord::new("Ada".to_string(), PHONE.to_string(), 36);
        store
            .set("users", PHONE, record.to_document().unwrap())
            .await
            .unwrap();

        let screen = screen_with(Arc::new(store));
        screen.set_form(UserForm::new("Ada L.", PHONE, "37"));
        screen
    }

    #[tokio::test]
    async fn test_insert_writes_record_and_clears_form() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));

        let alert = screen.insert().await.unwrap();

        assert_eq!(alert, Alert::info(USER_ADDED));
        assert!(screen.form().is_empty());
        let record = stored(&store, PHONE).await.unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.age, 36);
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_insert_validation_keeps_form() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "thirty"));

        let alert = screen.insert().await.unwrap();

        assert_eq!(alert, Alert::error("Age must be a number"));
        assert_eq!(screen.form(), UserForm::new("Ada", PHONE, "thirty"));
        assert_eq!(store.len("users").await, 0);
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_insert_missing_fields() {
        let (_, screen) = memory_screen();
        screen.set_name("Ada");

        let alert = screen.insert().await.unwrap();
        assert_eq!(alert.message, "All fields are required");
        assert!(alert.is_error());
    }

    #[tokio::test]
    async fn test_insert_replaces_existing_record() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        screen.insert().await;
        screen.set_form(UserForm::new("Grace", PHONE, "85"));
        screen.insert().await;

        assert_eq!(store.len("users").await, 1);
        assert_eq!(stored(&store, PHONE).await.unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn test_insert_store_failure() {
        crate::logging::init_test_logging();
        let screen = screen_with(Arc::new(FailingStore));
        screen.set_form(UserForm::new("Ada", PHONE, "36"));

        let alert = screen.insert().await.unwrap();

        assert_eq!(alert, Alert::error(INSERT_FAILED));
        // Form is kept so the user can retry
        assert_eq!(screen.form().name, "Ada");
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_update_changes_name_and_age_only() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        screen.insert().await;
        let created_at = stored(&store, PHONE).await.unwrap().created_at;

        screen.set_form(UserForm::new("Ada L.", PHONE, "37"));
        let alert = screen.update().await.unwrap();

        assert_eq!(alert, Alert::info(USER_UPDATED));
        let record = stored(&store, PHONE).await.unwrap();
        assert_eq!(record.name, "Ada L.");
        assert_eq!(record.age, 37);
        assert_eq!(record.phone, PHONE);
        assert_eq!(record.created_at, created_at);
        assert!(record.updated_at.is_some());
        // Update keeps the form as typed
        assert_eq!(screen.form(), UserForm::new("Ada L.", PHONE, "37"));
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));

        let alert = screen.update().await.unwrap();

        assert_eq!(alert, Alert::error(USER_NOT_FOUND));
        assert_eq!(store.len("users").await, 0);
    }

    #[tokio::test]
    async fn test_update_finds_record_by_phone_field() {
        let (store, screen) = memory_screen();
        let legacy = UserRecord::new("Ada".to_string(), PHONE.to_string(), 36);
        store
            .set("users", "legacy-id", legacy.to_document().unwrap())
            .await
            .unwrap();

        screen.set_form(UserForm::new("Ada L.", PHONE, "37"));
        let alert = screen.update().await.unwrap();

        assert_eq!(alert.message, USER_UPDATED);
        let doc = store.get("users", "legacy-id").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Ada L.");
    }

    #[tokio::test]
    async fn test_update_validation() {
        let (_, screen) = memory_screen();
        screen.set_form(UserForm::new("", PHONE, "36"));

        let alert = screen.update().await.unwrap();
        assert_eq!(alert.message, "All fields are required");
    }

    #[tokio::test]
    async fn test_update_store_failure() {
        let screen = screen_with(Arc::new(FailingStore));
        screen.set_form(UserForm::new("Ada", PHONE, "36"));

        assert_eq!(screen.update().await, Some(Alert::error(UPDATE_FAILED)));
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_update_write_failure_after_lookup() {
        crate::logging::init_test_logging();
        let screen = rejecting_update_screen(false).await;

        assert_eq!(screen.update().await, Some(Alert::error(UPDATE_FAILED)));
        assert_eq!(screen.form(), UserForm::new("Ada L.", PHONE, "37"));
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_update_record_removed_after_lookup() {
        let screen = rejecting_update_screen(true).await;

        assert_eq!(screen.update().await, Some(Alert::error(USER_NOT_FOUND)));
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_clears_form() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        screen.insert().await;

        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        let alert = screen.delete().await.unwrap();

        assert_eq!(alert, Alert::info(USER_DELETED));
        assert!(screen.form().is_empty());
        assert!(stored(&store, PHONE).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_record_still_succeeds() {
        let (_, screen) = memory_screen();
        screen.set_phone(PHONE);

        assert_eq!(screen.delete().await, Some(Alert::info(USER_DELETED)));
    }

    #[tokio::test]
    async fn test_delete_requires_phone() {
        let (_, screen) = memory_screen();
        screen.set_name("Ada");

        let alert = screen.delete().await.unwrap();
        assert_eq!(alert.message, "Phone number is required");
        assert_eq!(screen.form().name, "Ada");
    }

    #[tokio::test]
    async fn test_delete_store_failure() {
        let screen = screen_with(Arc::new(FailingStore));
        screen.set_phone(PHONE);

        assert_eq!(screen.delete().await, Some(Alert::error(DELETE_FAILED)));
        assert_eq!(screen.form().phone, PHONE);
    }

    #[tokio::test]
    async fn test_view_fills_form_without_alert() {
        let (_, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        screen.insert().await;

        screen.set_phone(PHONE);
        let alert = screen.view().await;

        assert!(alert.is_none());
        assert_eq!(screen.form(), UserForm::new("Ada", PHONE, "36"));
    }

    #[tokio::test]
    async fn test_view_not_found() {
        let (_, screen) = memory_screen();
        screen.set_phone(PHONE);

        assert_eq!(screen.view().await, Some(Alert::error(USER_NOT_FOUND)));
    }

    #[tokio::test]
    async fn test_view_requires_phone() {
        let (_, screen) = memory_screen();

        let alert = screen.view().await.unwrap();
        assert_eq!(alert.message, "Phone number is required");
    }

    #[tokio::test]
    async fn test_view_malformed_record() {
        let (store, screen) = memory_screen();
        let Value::Object(doc) = serde_json::json!({"name": "Ada", "phone": PHONE}) else {
            unreachable!()
        };
        store.set("users", PHONE, doc).await.unwrap();
        screen.set_phone(PHONE);

        assert_eq!(screen.view().await, Some(Alert::error(FETCH_FAILED)));
    }

    #[tokio::test]
    async fn test_view_store_failure() {
        let screen = screen_with(Arc::new(FailingStore));
        screen.set_phone(PHONE);

        assert_eq!(screen.view().await, Some(Alert::error(FETCH_FAILED)));
    }

    #[tokio::test]
    async fn test_presses_ignored_while_loading() {
        let store = Arc::new(GatedStore::default());
        let screen = Arc::new(screen_with(store.clone()));
        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        assert_eq!(screen.insert_label(), "Insert");

        let pressed = Arc::clone(&screen);
        let task = tokio::spawn(async move { pressed.insert().await });
        store.entered.notified().await;

        assert!(screen.is_loading());
        assert_eq!(screen.insert_label(), "Saving...");
        assert!(screen.insert().await.is_none());
        assert!(screen.update().await.is_none());
        assert!(screen.delete().await.is_none());
        assert!(screen.view().await.is_none());

        store.gate.notify_one();
        let alert = task.await.unwrap();

        assert_eq!(alert, Some(Alert::info(USER_ADDED)));
        assert!(!screen.is_loading());
        assert_eq!(screen.insert_label(), "Insert");
        assert_eq!(store.inner.len("users").await, 1);
    }

    #[tokio::test]
    async fn test_from_config_uses_collection() {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::default();
        config.store.collection = "people".to_string();

        let screen = Screen::from_config(store.clone(), &config).unwrap();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));
        screen.insert().await;

        assert_eq!(store.len("people").await, 1);
        assert_eq!(store.len("users").await, 0);
    }

    #[tokio::test]
    async fn test_press_dispatches() {
        let (store, screen) = memory_screen();
        screen.set_form(UserForm::new("Ada", PHONE, "36"));

        assert_eq!(
            screen.press(Button::Insert).await,
            Some(Alert::info(USER_ADDED))
        );
        screen.set_phone(PHONE);
        assert!(screen.press(Button::View).await.is_none());
        assert_eq!(
            screen.press(Button::Delete).await,
            Some(Alert::info(USER_DELETED))
        );
        assert_eq!(store.len("users").await, 0);
    }

    #[test]
    fn test_button_display() {
        assert_eq!(Button::Insert.to_string(), "insert");
        assert_eq!(Button::View.to_string(), "view");
    }

    #[test]
    fn test_alert_display() {
        assert_eq!(Alert::info(USER_ADDED).to_string(), "User Added successfully");
        assert!(!Alert::info("ok").is_error());
        assert!(Alert::error("bad").is_error());
    }
}
