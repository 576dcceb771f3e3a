//! Lazily produced property values.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::core::Result;

type Producer = dyn Fn() -> Result<String> + Send + Sync;

struct Inner {
    producer: Box<Producer>,
    value: OnceLock<Result<String>>,
}

/// A scalar whose text is computed on first use and then cached.
///
/// Merging moves these around as opaque data. Only [`DeferredValue::resolve`]
/// runs the producer, and it runs at most once per value, however many clones exist.
/// Equality is identity: two handles are equal when they share one producer.
///
/// ```rust
/// use modprops::properties::DeferredValue;
///
/// let value = DeferredValue::from_fn(|| Ok("[21,)".to_string()));
/// assert!(!value.is_resolved());
/// assert_eq!(value.resolve()?, "[21,)");
/// assert!(value.is_resolved());
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
#[derive(Clone)]
pub struct DeferredValue {
    inner: Arc<Inner>,
}

impl DeferredValue {
    /// Wrap a producer.
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: Fn() -> Result<String> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                producer: Box::new(producer),
                value: OnceLock::new(),
            }),
        }
    }

    /// A value that is already known.
    pub fn ready(value: impl Into<String>) -> Self {
        let value = value.into();
        let deferred = Self::from_fn(|| Ok(String::new()));
        let _ = deferred.inner.value.set(Ok(value));
        deferred
    }

    /// Produce the text, running the producer if this is the first call.
    ///
    /// # Errors
    ///
    /// Returns the producer's error. A failed producer is not retried.
    pub fn resolve(&self) -> Result<&str> {
        match self.inner.value.get_or_init(|| (self.inner.producer)()) {
            Ok(text) => Ok(text.as_str()),
            Err(error) => Err(error.clone()),
        }
    }

    /// Whether the producer has already run.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.inner.value.get().is_some()
    }
}

impl PartialEq for DeferredValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for DeferredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.value.get() {
            Some(Ok(text)) => f.debug_tuple("DeferredValue").field(text).finish(),
            Some(Err(error)) => write!(f, "DeferredValue(<failed: {error}>)"),
            None => f.write_str("DeferredValue(<pending>)"),
        }
    }
}
