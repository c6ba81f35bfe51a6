//! # API Facade
//!
//! [`TodozApi`] is the composition root and the single entry point for UI
//! clients. Constructing it is the one place a [`Store`] gets built, so there is
//! exactly one store per process without a global or a self-enforcing guard.
//!
//! ## Startup Order
//!
//! 1. Build the store and the dispatcher.
//! 2. Load persisted entries into the store.
//! 3. Subscribe the persistence adapter.
//!
//! Subscribing after the load keeps startup from writing back what it just read.
//! Presentation adapters are subscribed by the client through
//! [`TodozApi::subscribe`].
//!
//! ## Generic Over BlobBackend
//!
//! - Production: `TodozApi<FsBackend>`
//! - Testing: `TodozApi<MemBackend>`

use crate::backend::BlobBackend;
use crate::config::TodozConfig;
use crate::dispatch::{Command, Dispatcher, Outcome};
use crate::model::Entry;
use crate::notifier::Subscriber;
use crate::persistence::Persistence;
use crate::store::Store;
use std::rc::Rc;

pub struct TodozApi<B: BlobBackend + 'static> {
    store: Rc<Store>,
    dispatcher: Dispatcher,
    persistence: Rc<Persistence<B>>,
    config: TodozConfig,
}

impl<B: BlobBackend + 'static> TodozApi<B> {
    pub fn new(backend: B, config: TodozConfig) -> Self {
        let store = Rc::new(Store::new());
        let dispatcher = Dispatcher::new(Rc::clone(&store));
        let persistence = Rc::new(Persistence::new(backend, config.storage_key.clone()));

        persistence.load(&store);
        let subscriber: Rc<dyn Subscriber> = persistence.clone();
        store.subscribe(&subscriber);

        Self {
            store,
            dispatcher,
            persistence,
            config,
        }
    }

    pub fn store(&self) -> &Rc<Store> {
        &self.store
    }

    pub fn config(&self) -> &TodozConfig {
        &self.config
    }

    pub fn persistence(&self) -> &Persistence<B> {
        &self.persistence
    }

    pub fn items(&self) -> Vec<Entry> {
        self.store.items()
    }

    pub fn subscribe(&self, subscriber: &Rc<dyn Subscriber>) {
        self.store.subscribe(subscriber);
    }

    pub fn unsubscribe(&self, subscriber: &Rc<dyn Subscriber>) {
        self.store.unsubscribe(subscriber);
    }

    pub fn execute(&self, command: Command) -> Outcome {
        self.dispatcher.execute(command)
    }

    pub fn execute_named(&self, kind: &str, payload: &str) -> Outcome {
        self.dispatcher.execute_named(kind, payload)
    }

    /// Text-submission path: trims `raw` and, if anything is left, adds it.
    ///
    /// Returns `None` for blank input, in which case nothing is dispatched.
    pub fn submit(&self, raw: &str) -> Option<Outcome> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.execute(Command::Add(Entry::new(text))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mem::MemBackend;
    use crate::backend::mem::fixtures::BackendFixture;
    use crate::dispatch::CommandKind;
    use crate::error::Result;
    use crate::model::EntryRecord;
    use crate::persistence::STORAGE_KEY;
    use std::cell::RefCell;

    fn saved_texts(api: &TodozApi<MemBackend>) -> Option<Vec<String>> {
        let raw = api.persistence().backend().read(STORAGE_KEY).unwrap()?;
        let records: Vec<EntryRecord> = serde_json::from_str(&raw).unwrap();
        Some(records.into_iter().map(|r| r.text).collect())
    }

    #[test]
    fn test_startup_loads_without_writing_back() {
        let fixture = BackendFixture::new().with_raw(STORAGE_KEY, r#"[{"text":"Buy eggs"}]"#);
        let api = TodozApi::new(fixture.backend, TodozConfig::default());

        assert_eq!(api.items(), vec![Entry::new("Buy eggs")]);
        // Untouched: still the compact form written by the fixture.
        assert_eq!(
            api.persistence().backend().read(STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"text":"Buy eggs"}]"#)
        );
    }

    #[test]
    fn test_mutations_are_persisted() {
        let api = TodozApi::new(MemBackend::new(), TodozConfig::default());
        assert_eq!(saved_texts(&api), None);

        api.execute(Command::Add(Entry::new("a")));
        api.execute(Command::Add(Entry::new("b")));
        api.execute(Command::RemoveByText("a".into()));

        assert_eq!(saved_texts(&api), Some(vec!["b".to_string()]));
    }

    #[test]
    fn test_uses_configured_storage_key() {
        let config = TodozConfig {
            storage_key: "groceries".into(),
            ..Default::default()
        };
        let fixture = BackendFixture::new()
            .with_entries("groceries", &["milk"])
            .with_entries(STORAGE_KEY, &["ignored"]);
        let api = TodozApi::new(fixture.backend, config);

        assert_eq!(api.items(), vec![Entry::new("milk")]);
        assert_eq!(api.persistence().key(), "groceries");
    }

    #[test]
    fn test_configured_key_survives_reopen_on_disk() {
        use crate::backend::fs::FsBackend;
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let mut config = TodozConfig::default();
        assert!(config.set("storage-key", "lists/groceries").is_err());
        config.set("storage-key", "groceries").unwrap();

        let api = TodozApi::new(FsBackend::new(temp.path()), config.clone());
        assert_eq!(api.submit("milk"), Some(Outcome::Applied(true)));
        drop(api);

        let reopened = TodozApi::new(FsBackend::new(temp.path()), config);
        assert_eq!(reopened.items(), vec![Entry::new("milk")]);
    }

    #[test]
    fn test_submit_trims_and_skips_blank() {
        let api = TodozApi::new(MemBackend::new(), TodozConfig::default());

        assert_eq!(api.submit("   "), None);
        assert_eq!(api.submit(""), None);
        assert_eq!(api.submit("  Buy milk \n"), Some(Outcome::Applied(true)));
        assert_eq!(api.submit("Buy milk"), Some(Outcome::Applied(false)));
        assert_eq!(api.items(), vec![Entry::new("Buy milk")]);
    }

    #[test]
    fn test_presentation_subscriber_rerenders_on_change() {
        let api = TodozApi::new(MemBackend::new(), TodozConfig::default());
        let frames = Rc::new(RefCell::new(Vec::<Vec<String>>::new()));
        let sink = Rc::clone(&frames);
        let view: Rc<dyn Subscriber> = Rc::new(move |entries: &[Entry]| -> Result<()> {
            sink.borrow_mut()
                .push(entries.iter().map(|e| e.text().to_string()).collect());
            Ok(())
        });
        api.subscribe(&view);

        api.submit("a");
        api.submit("a");
        api.execute_named("remove-by-text", "missing");
        api.execute_named("remove-by-text", "a");

        assert_eq!(
            *frames.borrow(),
            vec![vec!["a".to_string()], Vec::<String>::new()]
        );

        api.unsubscribe(&view);
        api.submit("b");
        assert_eq!(frames.borrow().len(), 2);
    }

    #[test]
    fn test_reserved_and_unknown_commands() {
        let api = TodozApi::new(MemBackend::new(), TodozConfig::default());
        assert_eq!(
            api.execute(Command::Clear),
            Outcome::NotSupported(CommandKind::Clear)
        );
        assert_eq!(api.execute_named("rename", "x"), Outcome::Ignored);
        assert_eq!(saved_texts(&api), None);
    }
}
