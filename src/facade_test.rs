use std::io;
use std::sync::{Arc, Mutex};

use super::*;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Facade over memory stores, plus handles to those stores for fault injection.
fn facade() -> (BrowserStorage, Rc<MemoryStore>, Rc<MemoryStore>) {
    init_logging();
    let local = Rc::new(MemoryStore::new(StorageScope::Local));
    let session = Rc::new(MemoryStore::new(StorageScope::Session));
    let storage = BrowserStorage::new(
        Box::new(Rc::clone(&local)),
        Box::new(Rc::clone(&session)),
        &StorageConfig::default(),
    )
    .expect("scopes match");
    (storage, local, session)
}

#[test]
fn round_trip_in_both_scopes() {
    let (storage, _, _) = facade();
    for scope in StorageScope::ALL {
        assert!(storage.set_item(scope, "k", Some("v")));
        assert_eq!(storage.get_item(scope, "k"), Some("v".to_owned()));
        assert!(storage.contains_key(scope, "k"));
    }
}

#[test]
fn scopes_are_isolated() {
    let (storage, local, session) = facade();
    assert!(storage.set_item(StorageScope::Local, "only-local", Some("1")));
    assert_eq!(storage.get_item(StorageScope::Session, "only-local"), None);
    assert_eq!(local.length().expect("len"), 1);
    assert_eq!(session.length().expect("len"), 0);
}

#[test]
fn none_value_deletes_key() {
    let (storage, _, _) = facade();
    assert!(storage.set_item(StorageScope::Session, "k", Some("v")));
    assert!(storage.set_item(StorageScope::Session, "k", None));
    assert_eq!(storage.get_item(StorageScope::Session, "k"), None);
    assert!(!storage.contains_key(StorageScope::Session, "k"));
}

#[test]
fn none_value_on_absent_key_succeeds() {
    let (storage, _, _) = facade();
    assert!(storage.set_item(StorageScope::Local, "never-set", None));
}

#[test]
fn empty_string_is_a_value() {
    let (storage, _, _) = facade();
    assert!(storage.set_item(StorageScope::Local, "k", Some("")));
    assert_eq!(storage.get_item(StorageScope::Local, "k"), Some(String::new()));
    assert!(storage.contains_key(StorageScope::Local, "k"));
}

#[test]
fn remove_absent_key_succeeds_without_change() {
    let (storage, local, _) = facade();
    assert!(storage.set_item(StorageScope::Local, "kept", Some("v")));
    assert!(storage.remove_item(StorageScope::Local, "missing"));
    assert_eq!(local.length().expect("len"), 1);
    assert_eq!(storage.get_item(StorageScope::Local, "kept"), Some("v".to_owned()));
}

#[test]
fn remove_deletes_present_key() {
    let (storage, _, _) = facade();
    assert!(storage.set_item(StorageScope::Session, "k", Some("v")));
    assert!(storage.remove_item(StorageScope::Session, "k"));
    assert!(!storage.contains_key(StorageScope::Session, "k"));
}

#[test]
fn clear_only_touches_its_scope() {
    let (storage, _, _) = facade();
    assert!(storage.set_item(StorageScope::Local, "a", Some("1")));
    assert!(storage.set_item(StorageScope::Local, "b", Some("2")));
    assert!(storage.set_item(StorageScope::Session, "a", Some("s")));

    assert!(storage.clear(StorageScope::Local));

    assert_eq!(storage.try_len(StorageScope::Local), Ok(0));
    assert_eq!(storage.get_item(StorageScope::Session, "a"), Some("s".to_owned()));
}

#[test]
fn theme_scenario() {
    let (storage, _, _) = facade();
    assert!(storage.set_item(StorageScope::Local, "theme", Some("dark")));
    assert_eq!(storage.get_item(StorageScope::Local, "theme"), Some("dark".to_owned()));
    assert!(storage.clear(StorageScope::Local));
    assert_eq!(storage.get_item(StorageScope::Local, "theme"), None);
}

#[test]
fn unavailable_store_yields_sentinels() {
    let (storage, local, _) = facade();
    assert!(storage.set_item(StorageScope::Local, "k", Some("v")));
    local.set_available(false);

    assert!(!storage.set_item(StorageScope::Local, "k", Some("w")));
    assert!(!storage.set_item(StorageScope::Local, "k", None));
    assert_eq!(storage.get_item(StorageScope::Local, "k"), None);
    assert!(!storage.contains_key(StorageScope::Local, "k"));
    assert!(!storage.remove_item(StorageScope::Local, "k"));
    assert!(!storage.clear(StorageScope::Local));

    local.set_available(true);
    assert_eq!(storage.get_item(StorageScope::Local, "k"), Some("v".to_owned()));
}

#[test]
fn fault_in_one_scope_leaves_the_other_working() {
    let (storage, _, session) = facade();
    session.set_available(false);
    assert!(!storage.set_item(StorageScope::Session, "k", Some("v")));
    assert!(storage.set_item(StorageScope::Local, "k", Some("v")));
    assert!(storage.contains_key(StorageScope::Local, "k"));
}

#[test]
fn quota_exceeded_yields_false_and_keeps_old_value() {
    init_logging();
    let local = Rc::new(MemoryStore::with_quota(StorageScope::Local, 16));
    let storage = BrowserStorage::new(
        Box::new(Rc::clone(&local)),
        Box::new(MemoryStore::new(StorageScope::Session)),
        &StorageConfig::default(),
    )
    .expect("scopes match");
    assert!(storage.set_item(StorageScope::Local, "k", Some("v")));
    assert!(!storage.set_item(StorageScope::Local, "k", Some("much too long")));
    assert_eq!(storage.get_item(StorageScope::Local, "k"), Some("v".to_owned()));
}

#[test]
fn try_operations_expose_the_fault() {
    let (storage, _, session) = facade();
    session.set_available(false);
    let expected = StorageError::Unavailable { scope: StorageScope::Session };
    assert_eq!(storage.try_get_item(StorageScope::Session, "k"), Err(expected.clone()));
    assert_eq!(storage.try_contains_key(StorageScope::Session, "k"), Err(expected.clone()));
    assert_eq!(storage.try_set_item(StorageScope::Session, "k", Some("v")), Err(expected.clone()));
    assert_eq!(storage.try_remove_item(StorageScope::Session, "k"), Err(expected.clone()));
    assert_eq!(storage.try_clear(StorageScope::Session), Err(expected));
}

#[test]
fn in_memory_applies_config_quota() {
    init_logging();
    let config = StorageConfig {
        memory_quota_bytes: Some(4),
        log_values: false,
    };
    let storage = BrowserStorage::in_memory(&config);
    assert!(storage.set_item(StorageScope::Session, "a", Some("b")));
    assert!(!storage.set_item(StorageScope::Session, "abc", Some("def")));
}

#[test]
fn in_memory_without_quota_accepts_large_values() {
    let config = StorageConfig {
        memory_quota_bytes: None,
        log_values: true,
    };
    let storage = BrowserStorage::in_memory(&config);
    let big = "x".repeat(64 * 1024);
    assert!(storage.set_item(StorageScope::Local, "big", Some(&big)));
    assert_eq!(storage.get_item(StorageScope::Local, "big").map(|v| v.len()), Some(big.len()));
}

#[test]
fn named_resolves_host_locations() {
    let (storage, _, _) = facade();
    let storage = Rc::new(storage);
    let view = storage.named("sessionStorage").expect("known location");
    assert_eq!(view.location(), StorageScope::Session);
    assert!(storage.named("indexedDB").is_none());
}

#[test]
fn new_rejects_store_in_wrong_slot() {
    let config = StorageConfig::default();
    let swapped = BrowserStorage::new(
        Box::new(MemoryStore::new(StorageScope::Session)),
        Box::new(MemoryStore::new(StorageScope::Session)),
        &config,
    );
    assert_eq!(
        swapped.err(),
        Some(StorageError::ScopeMismatch {
            expected: StorageScope::Local,
            found: StorageScope::Session,
        })
    );

    let swapped = BrowserStorage::new(
        Box::new(MemoryStore::new(StorageScope::Local)),
        Box::new(MemoryStore::new(StorageScope::Local)),
        &config,
    );
    assert_eq!(
        swapped.err(),
        Some(StorageError::ScopeMismatch {
            expected: StorageScope::Session,
            found: StorageScope::Local,
        })
    );
}

#[test]
fn refused_scope_degrades_alone() {
    init_logging();
    let storage = BrowserStorage::lazy(&StorageConfig::default(), |scope| match scope {
        StorageScope::Local => Ok(MemoryStore::new(scope)),
        StorageScope::Session => Err(StorageError::Unavailable { scope }),
    });

    assert!(!storage.set_item(StorageScope::Session, "k", Some("v")));
    assert_eq!(storage.get_item(StorageScope::Session, "k"), None);
    assert!(!storage.contains_key(StorageScope::Session, "k"));
    assert!(!storage.remove_item(StorageScope::Session, "k"));
    assert!(!storage.clear(StorageScope::Session));

    assert!(storage.set_item(StorageScope::Local, "theme", Some("dark")));
    assert_eq!(storage.get_item(StorageScope::Local, "theme"), Some("dark".to_owned()));
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("lock").clone()).expect("utf8")
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber and return everything it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

fn failing_facade(config: &StorageConfig) -> BrowserStorage {
    let local = MemoryStore::new(StorageScope::Local);
    local.set_available(false);
    BrowserStorage::new(
        Box::new(local),
        Box::new(MemoryStore::new(StorageScope::Session)),
        config,
    )
    .expect("scopes match")
}

#[test]
fn set_fault_log_carries_op_scope_key_and_value() {
    let storage = failing_facade(&StorageConfig::default());
    let logs = capture_logs(|| {
        assert!(!storage.set_item(StorageScope::Local, "token", Some("secret")));
    });
    assert!(logs.contains("ERROR"), "{logs}");
    assert!(logs.contains("op=\"set_item\""), "{logs}");
    assert!(logs.contains("scope=localStorage"), "{logs}");
    assert!(logs.contains("key=\"token\""), "{logs}");
    assert!(logs.contains("value=\"secret\""), "{logs}");
    assert!(logs.contains("storage 'localStorage' is unavailable"), "{logs}");
}

#[test]
fn set_fault_log_hides_value_when_configured() {
    let config = StorageConfig {
        log_values: false,
        ..StorageConfig::default()
    };
    let storage = failing_facade(&config);
    let logs = capture_logs(|| {
        assert!(!storage.set_item(StorageScope::Local, "token", Some("secret")));
    });
    assert!(logs.contains("key=\"token\""), "{logs}");
    assert!(logs.contains("value_len=6"), "{logs}");
    assert!(!logs.contains("secret"), "{logs}");
}

#[test]
fn read_fault_logs_carry_op_scope_and_key() {
    let storage = failing_facade(&StorageConfig::default());
    let logs = capture_logs(|| {
        assert_eq!(storage.get_item(StorageScope::Local, "theme"), None);
        assert!(!storage.contains_key(StorageScope::Local, "theme"));
        assert!(!storage.remove_item(StorageScope::Local, "theme"));
        assert!(!storage.clear(StorageScope::Local));
    });
    for op in ["get_item", "contains_key", "remove_item", "clear"] {
        assert!(logs.contains(&format!("op=\"{op}\"")), "{op} missing:\n{logs}");
    }
    assert_eq!(logs.matches("key=\"theme\"").count(), 3, "{logs}");
    assert_eq!(logs.matches("scope=localStorage").count(), 4, "{logs}");
}

#[test]
fn successful_calls_log_nothing_at_error() {
    let (storage, _, _) = facade();
    let logs = capture_logs(|| {
        assert!(storage.set_item(StorageScope::Local, "k", Some("v")));
        assert!(storage.clear(StorageScope::Local));
    });
    assert!(!logs.contains("ERROR"), "{logs}");
}
