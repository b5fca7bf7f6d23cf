use crate::{
    db::cache::kv::KeyValueCache,
    obs::sink::{self, MetricsEvent},
};
use chrono::Utc;
use derive_more::Deref;
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Cache namespace for term data and term-query results.
pub const TERMS_NAMESPACE: &str = "terms";

/// Key holding the generation token within a namespace.
pub const LAST_CHANGED_KEY: &str = "last_changed";

// Process-wide sequence folded into every token so that consecutive tokens
// differ even within one microsecond.
static STAMP_SEQ: AtomicU64 = AtomicU64::new(0);

///
/// GenerationToken
///
/// Opaque freshness-epoch value for a namespace. Changing it orphans every
/// cache entry written under prior tokens without enumerating them.
///

#[derive(Clone, Debug, Deref, Eq, Hash, PartialEq)]
pub struct GenerationToken(String);

impl GenerationToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl fmt::Display for GenerationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

///
/// GenerationStamp
///
/// Per-namespace `last_changed` token maintained on top of the key-value
/// primitive. Read lazily and created on first read; bumped on every
/// mutation of the underlying entity set.
///

#[derive(Clone)]
pub struct GenerationStamp {
    kv: Arc<dyn KeyValueCache>,
}

impl GenerationStamp {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueCache>) -> Self {
        Self { kv }
    }

    /// Read the current token without creating one.
    #[must_use]
    pub fn peek(&self, namespace: &str) -> Option<GenerationToken> {
        self.kv
            .get(namespace, LAST_CHANGED_KEY)
            .map(|bytes| GenerationToken::from_bytes(&bytes))
    }

    /// Current token, created atomically on first read.
    ///
    /// Racing first-readers all observe the same winning token: creation
    /// goes through the primitive's set-if-absent operation.
    #[must_use]
    pub fn get(&self, namespace: &str) -> GenerationToken {
        if let Some(token) = self.peek(namespace) {
            return token;
        }

        let fresh = fresh_token();
        let winner = self
            .kv
            .add(namespace, LAST_CHANGED_KEY, fresh.0.into_bytes());

        GenerationToken::from_bytes(&winner)
    }

    /// Write a token guaranteed different from the previous value.
    ///
    /// Every entity-mutating operation calls this before returning success,
    /// so dependent reads observe the new generation.
    pub fn bump(&self, namespace: &str) -> GenerationToken {
        let next = fresh_token();
        self.kv
            .set(namespace, LAST_CHANGED_KEY, next.0.clone().into_bytes());
        sink::record(MetricsEvent::StampBump);

        next
    }
}

/// Microsecond wall-clock reading plus a process-unique sequence component.
fn fresh_token() -> GenerationToken {
    let micros = Utc::now().timestamp_micros();
    let seq = STAMP_SEQ.fetch_add(1, Ordering::Relaxed);

    GenerationToken(format!("{micros}.{seq:06}"))
}

///
/// TESTS
///
