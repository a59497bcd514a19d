//! Storage Module Tests
//!
//! Validates id allocation and local row mechanics of the entity store.
//!
//! ## Test Scopes
//! - **Ids**: monotonic allocation, no reuse after delete.
//! - **Rows**: insert/get/update/remove visibility and snapshot ordering.

#[cfg(test)]
mod tests {
    use crate::storage::memory::EntityMap;

    // Test row shape
    #[derive(Debug, Clone, PartialEq)]
    struct TestTrack {
        name: String,
        plays: u32,
    }

    fn track(name: &str) -> TestTrack {
        TestTrack {
            name: name.to_string(),
            plays: 0,
        }
    }

    // ============================================================
    // ID ALLOCATION TESTS
    // ============================================================

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let map: EntityMap<TestTrack> = EntityMap::new();

        let first = map.insert_with(|_| track("one"));
        let second = map.insert_with(|_| track("two"));

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let map: EntityMap<TestTrack> = EntityMap::new();

        let first = map.insert_with(|_| track("one"));
        map.remove(first);
        let second = map.insert_with(|_| track("two"));

        assert_ne!(first, second, "Deleted ids must stay dangling");
    }

    #[test]
    fn test_build_closure_sees_allocated_id() {
        let map: EntityMap<TestTrack> = EntityMap::new();

        let id = map.insert_with(|id| TestTrack {
            name: format!("track-{}", id),
            plays: 0,
        });

        assert_eq!(map.get(id).unwrap().name, format!("track-{}", id));
    }

    // ============================================================
    // ROW OPERATION TESTS
    // ============================================================

    #[test]
    fn test_get_nonexistent_row() {
        let map: EntityMap<TestTrack> = EntityMap::new();
        assert!(map.get(99).is_none());
    }

    #[test]
    fn test_update_is_visible_to_subsequent_reads() {
        let map: EntityMap<TestTrack> = EntityMap::new();
        let id = map.insert_with(|_| track("one"));

        let updated = map.update(id, |row| row.plays += 5);

        assert!(updated);
        assert_eq!(map.get(id).unwrap().plays, 5);
    }

    #[test]
    fn test_update_missing_row_reports_false() {
        let map: EntityMap<TestTrack> = EntityMap::new();
        assert!(!map.update(42, |row| row.plays += 1));
    }

    #[test]
    fn test_remove_returns_row_and_clears_it() {
        let map: EntityMap<TestTrack> = EntityMap::new();
        let id = map.insert_with(|_| track("gone"));

        let removed = map.remove(id);

        assert_eq!(removed.unwrap().name, "gone");
        assert!(map.get(id).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_snapshot_sorted_by_id() {
        let map: EntityMap<TestTrack> = EntityMap::new();
        for i in 0..50 {
            map.insert_with(|_| track(&format!("t{}", i)));
        }

        let snapshot = map.snapshot();

        assert_eq!(snapshot.len(), 50);
        let ids: Vec<u64> = snapshot.iter().map(|(id, _)| *id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted, "Snapshot must come back in id order");
    }

    #[test]
    fn test_len_tracks_inserts_and_removes() {
        let map: EntityMap<TestTrack> = EntityMap::new();
        let a = map.insert_with(|_| track("a"));
        map.insert_with(|_| track("b"));

        assert_eq!(map.len(), 2);
        map.remove(a);
        assert_eq!(map.len(), 1);
    }
}
