use rustc_hash::FxHashMap;

/// Field values with dirty tracking against a baseline.
///
/// The baseline is the state the record was loaded with or last persisted
/// with. A field is dirty if its current value differs from the baseline,
/// including when it is missing from one of the two.
#[derive(Debug, Clone)]
pub struct Attributes<V> {
    current: FxHashMap<String, V>,
    original: FxHashMap<String, V>,
}

impl<V: Clone + PartialEq> Attributes<V> {
    /// Create an empty set of attributes, with nothing loaded.
    pub fn new() -> Self {
        Self {
            current: FxHashMap::default(),
            original: FxHashMap::default(),
        }
    }

    /// Create attributes as loaded from storage, all clean.
    pub fn from_loaded<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let current: FxHashMap<String, V> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self { original: current.clone(), current }
    }

    /// The current value of a field.
    pub fn get(&self, field: &str) -> Option<&V> {
        self.current.get(field)
    }

    /// The baseline value of a field.
    pub fn original(&self, field: &str) -> Option<&V> {
        self.original.get(field)
    }

    /// Whether a field currently holds a value.
    pub fn contains(&self, field: &str) -> bool {
        self.current.contains_key(field)
    }

    /// Set a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: V) -> Option<V> {
        self.current.insert(field.into(), value)
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<V> {
        self.current.remove(field)
    }

    /// Whether a field differs from the baseline.
    pub fn is_dirty(&self, field: &str) -> bool {
        self.current.get(field) != self.original.get(field)
    }

    /// Whether any field differs from the baseline.
    pub fn is_any_dirty(&self) -> bool {
        self.dirty().next().is_some()
    }

    /// The names of all dirty fields, in no particular order.
    pub fn dirty(&self) -> impl Iterator<Item = &str> {
        let changed = self
            .current
            .keys()
            .filter(|field| self.is_dirty(field));
        let removed = self
            .original
            .keys()
            .filter(|field| !self.current.contains_key(*field));
        changed.chain(removed).map(String::as_str)
    }

    /// Make the current state the new baseline, e.g. after a persist.
    pub fn sync(&mut self) {
        self.original.clone_from(&self.current);
    }
}

impl<V: Clone + PartialEq> Default for Attributes<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes<V>
where
    K: Into<String>,
    V: Clone + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_loaded(iter)
    }
}
