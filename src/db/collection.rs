//! Generic in-memory collection and the repository interface over it

/// An entity with a stable identity within its collection
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Storage operations consumed by the mutation services.
///
/// [Collection] is the in-memory backend; a persistent store only needs to provide
/// the same operations.
pub trait Repository<T: Record> {
    /// Look up a record by id
    fn find_by_id(&self, id: &str) -> Option<T>;

    /// All records matching `predicate`, in insertion order
    fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool;

    /// Append a record at the end of the collection
    fn append(&mut self, record: T);

    /// Rebuild the collection by passing every record through `map`
    fn replace_all<F>(&mut self, map: F)
    where
        F: FnMut(T) -> T;

    /// Remove a record by id, returning it if present
    fn remove(&mut self, id: &str) -> Option<T>;

    /// Generate an id not used by any record in this collection. `None` once the id
    /// space is exhausted.
    fn next_id(&mut self) -> Option<String>;
}

/// Ordered in-memory collection with a monotonic id counter.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    next_id: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from existing records. The id counter starts past the largest
    /// numeric id that has a successor, so generated ids never collide with seeded ones.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.append(record);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of every record, in insertion order
    pub fn all(&self) -> Vec<T> {
        self.records.clone()
    }

    fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    fn bump_counter(&mut self, id: &str) {
        // `u64::MAX` has no successor; `next_id` still skips it as a taken id.
        if let Some(next) = id.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
            self.next_id = self.next_id.max(next);
        }
    }
}

impl<T: Record> Repository<T> for Collection<T> {
    fn find_by_id(&self, id: &str) -> Option<T> {
        self.records.iter().find(|r| r.id() == id).cloned()
    }

    fn filter<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect()
    }

    fn append(&mut self, record: T) {
        self.bump_counter(record.id());
        self.records.push(record);
    }

    fn replace_all<F>(&mut self, map: F)
    where
        F: FnMut(T) -> T,
    {
        self.records = std::mem::take(&mut self.records)
            .into_iter()
            .map(map)
            .collect();
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    fn next_id(&mut self) -> Option<String> {
        loop {
            let candidate = self.next_id;
            self.next_id = candidate.checked_add(1)?;
            let candidate = candidate.to_string();
            if !self.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: i32,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: i32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_next_id_skips_seeded_ids() {
        let mut c = Collection::from_records(vec![item("1", 0), item("7", 0), item("abc", 0)]);
        assert_eq!(c.next_id().as_deref(), Some("8"));
        assert_eq!(c.next_id().as_deref(), Some("9"));
    }

    #[test]
    fn test_max_seeded_id_does_not_overflow_counter() {
        let max = u64::MAX.to_string();
        let mut c = Collection::from_records(vec![item("3", 0), item(&max, 0)]);
        let id = c.next_id().unwrap();
        assert_eq!(id, "4");
        c.append(item(&id, 0));
        assert_eq!(c.next_id().as_deref(), Some("5"));
    }

    #[test]
    fn test_exhausted_counter_stops_generating() {
        let last = (u64::MAX - 1).to_string();
        let mut c = Collection::from_records(vec![item(&last, 0)]);
        assert_eq!(c.next_id(), None);
    }

    #[test]
    fn test_next_id_is_unique_across_many_inserts() {
        let mut c: Collection<Item> = Collection::new();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let id = c.next_id().unwrap();
            assert!(seen.insert(id.clone()), "duplicate id {id}");
            c.append(item(&id, 0));
        }
        assert_eq!(c.len(), 10_000);
    }

    #[test]
    fn test_next_id_never_reuses_removed_ids() {
        let mut c: Collection<Item> = Collection::new();
        let first = c.next_id().unwrap();
        c.append(item(&first, 1));
        c.remove(&first);
        assert_ne!(c.next_id(), Some(first));
    }

    #[test]
    fn test_replace_all_preserves_order() {
        let mut c = Collection::from_records(vec![item("1", 1), item("2", 2), item("3", 3)]);
        c.replace_all(|mut r| {
            if r.id == "2" {
                r.value = 20;
            }
            r
        });
        assert_eq!(c.all(), vec![item("1", 1), item("2", 20), item("3", 3)]);
    }

    #[test]
    fn test_filter_and_remove() {
        let mut c = Collection::from_records(vec![item("1", 1), item("2", 2), item("3", 3)]);
        assert_eq!(c.filter(|r| r.value >= 2).len(), 2);
        assert_eq!(c.remove("2"), Some(item("2", 2)));
        assert_eq!(c.remove("2"), None);
        assert!(c.find_by_id("2").is_none());
    }
}
