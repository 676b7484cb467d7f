#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use sleep_monitor::db::repositories::LocalRepository;
use sleep_monitor::db::repository::{DocumentRepository, RepositoryResult};
use sleep_monitor::models::RawDocument;
use tokio::sync::oneshot;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Every variable the configuration layer reads, cleared.
pub const CLEAN_ENV: &[(&str, Option<&str>)] = &[
    ("REPOSITORY_TYPE", None),
    ("LOCAL_SEED_PATH", None),
    ("FIRESTORE_PROJECT_ID", None),
    ("FIRESTORE_DATABASE", None),
    ("FIRESTORE_API_KEY", None),
    ("FIRESTORE_EMULATOR_HOST", None),
    ("FIRESTORE_PAGE_SIZE", None),
    ("TABLE_UTC_OFFSET_HOURS", None),
];

/// [`CLEAN_ENV`] with `changes` applied on top.
pub fn env_with(
    changes: &[(&'static str, Option<&'static str>)],
) -> Vec<(&'static str, Option<&'static str>)> {
    let mut env: Vec<_> = CLEAN_ENV
        .iter()
        .filter(|(key, _)| !changes.iter().any(|(k, _)| k == key))
        .copied()
        .collect();
    env.extend_from_slice(changes);
    env
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// 2024-01-01T01:00:00Z, 08:00:00 at UTC+7
pub const T0: i64 = 1704070800;

/// Two days of detections and durations.
///
/// On 2024-01-01 camera 1 (row 1, 5 s) and camera 2 (row 3, 0 s) capture at
/// the same second. 2023-12-31 has one row-4 detection.
pub fn sample_seed() -> Value {
    json!({
        "sleep": {
            "2024-01-01": {
                "a": {
                    "unix_timestamp": T0, "url_image": "https://img/a.jpg", "camera_id": 1,
                    "coords_rel": {"x1": 0.2, "y1": 0.1, "x2": 0.3, "y2": 0.2},
                    "total_duration": 5, "sleep_count": 2
                },
                "b": {
                    "unix_timestamp": T0, "url_image": "https://img/b.jpg", "camera_id": 2,
                    "coords_rel": {"y1": 0.6}, "total_duration": 0, "sleep_count": 1
                }
            },
            "2023-12-31": {
                "c": {
                    "unix_timestamp": T0 - 86400 + 600, "url_image": "https://img/c.jpg",
                    "camera_id": 1, "coords_rel": {"y1": 0.9}, "total_duration": 30,
                    "sleep_count": 3
                }
            }
        },
        "duration": {
            "2024-01-01": {
                "s1": {"duration": 5}, "s2": {"duration": 10}, "s3": {"duration": 11},
                "s4": {"duration": 25}, "s5": {"duration": 60}
            },
            "2023-12-31": {
                "s6": {"duration": 45}
            }
        }
    })
}

pub fn sample_repository() -> LocalRepository {
    LocalRepository::from_seed_value(sample_seed()).expect("sample seed is valid")
}

/// Repository whose reads can be held open per call, for ordering tests.
///
/// Calls are numbered from zero. A call with a registered gate waits for the
/// gate's sender before reading the inner store.
pub struct GatedRepository {
    inner: LocalRepository,
    calls: AtomicUsize,
    gates: Mutex<HashMap<usize, oneshot::Receiver<()>>>,
}

impl GatedRepository {
    pub fn new(inner: LocalRepository) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
            gates: Mutex::new(HashMap::new()),
        })
    }

    /// Hold call number `call` until the returned sender fires.
    pub fn gate(&self, call: usize) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(call, rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DocumentRepository for GatedRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.health_check().await
    }

    async fn fetch_collection(&self, collection: &str) -> RepositoryResult<Vec<RawDocument>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&call);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.fetch_collection(collection).await
    }

    fn backend_name(&self) -> &'static str {
        "gated"
    }
}
