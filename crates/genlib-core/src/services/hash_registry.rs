//! Fingerprint registry.
//!
//! Maps known executable fingerprints to the game, version and publisher
//! they identify, and holds the ordered list of filenames worth
//! fingerprinting. The registry is an owned instance: consumers receive it
//! explicitly, so tests can build isolated registries.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use crate::domain::{GameType, HashRecord, UNKNOWN_VERSION, normalize_hash};

/// Built-in executable candidates, most information-dense first.
///
/// Engine binaries come before launcher stubs, which come before
/// publisher-specific binaries.
pub const DEFAULT_EXECUTABLE_NAMES: [&str; 6] = [
    "game.dat",
    "generals.exe",
    "generalsv.exe",
    "generalszh.exe",
    "generalsonlinezh_30.exe",
    "generalsonlinezh_60.exe",
];

/// Fingerprints shipped with the library, JSON array of [`HashRecord`]s.
const BUNDLED_RECORDS: &str = include_str!("../../data/known_hashes.json");

/// Parse a JSON array of fingerprint records.
pub fn parse_records(json: &str) -> Result<Vec<HashRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Records bundled with the library, loaded before user-added ones.
pub fn bundled_records() -> Result<Vec<HashRecord>, serde_json::Error> {
    parse_records(BUNDLED_RECORDS)
}

/// In-memory fingerprint table.
///
/// Safe to share between scanning threads. Inserts are a single
/// compare-and-insert under the write lock: when two callers race on the
/// same hash, the first record stays and the loser is told so.
#[derive(Debug, Default)]
pub struct HashRegistry {
    records: RwLock<HashMap<String, HashRecord>>,
    executable_names: RwLock<Vec<String>>,
}

impl HashRegistry {
    /// Empty registry with no records and no executable candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in executable candidates.
    pub fn with_default_executables() -> Self {
        let registry = Self::new();
        for name in DEFAULT_EXECUTABLE_NAMES {
            registry.add_possible_executable_name(name);
        }
        registry
    }

    /// Look up a fingerprint. Case-insensitive; empty or unknown hashes
    /// return `None`.
    pub fn try_get_info(&self, hash: &str) -> Option<HashRecord> {
        let key = normalize_hash(hash);
        if key.is_empty() {
            return None;
        }
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    /// Register a fingerprint.
    ///
    /// Returns `false` when the hash is empty or already registered; the
    /// existing record is never replaced.
    pub fn try_add_hash(&self, hash: &str, record: HashRecord) -> bool {
        let key = normalize_hash(hash);
        if key.is_empty() {
            return false;
        }

        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match records.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let hash = slot.key().clone();
                slot.insert(HashRecord { hash, ..record });
                true
            }
        }
    }

    /// Version recorded for `hash`, but only when the record belongs to
    /// `game_type`. Returns `"Unknown"` otherwise, so a fingerprint shared
    /// by two unrelated titles never leaks a version across games.
    pub fn get_version_from_hash(&self, hash: &str, game_type: GameType) -> String {
        self.try_get_info(hash)
            .filter(|record| record.game_type == game_type)
            .map_or_else(|| UNKNOWN_VERSION.to_string(), |record| record.version)
    }

    /// Bulk-register records, returning how many were new.
    pub fn seed(&self, records: impl IntoIterator<Item = HashRecord>) -> usize {
        records
            .into_iter()
            .filter(|record| self.try_add_hash(&record.hash.clone(), record.clone()))
            .count()
    }

    /// Snapshot of all records, sorted by hash.
    pub fn records(&self) -> Vec<HashRecord> {
        let mut records: Vec<HashRecord> = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        records.sort_by(|a, b| a.hash.cmp(&b.hash));
        records
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filenames to probe, in priority order.
    pub fn possible_executable_names(&self) -> Vec<String> {
        self.executable_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Append a filename candidate. Idempotent and case-insensitive;
    /// returns whether the name was new.
    pub fn add_possible_executable_name(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let mut names = self
            .executable_names
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if names.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
            return false;
        }
        names.push(name.to_ascii_lowercase());
        true
    }

    /// Whether `file_name` is one of the executable candidates.
    pub fn is_candidate_name(&self, file_name: &str) -> bool {
        self.executable_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|name| name.eq_ignore_ascii_case(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OFFICIAL_PUBLISHER;
    use std::sync::Arc;

    const ZH_HASH: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    fn zh_record(version: &str) -> HashRecord {
        HashRecord::new(ZH_HASH, GameType::ZeroHour, version, OFFICIAL_PUBLISHER, true)
    }

    #[test]
    fn test_version_lookup_is_scoped_to_game() {
        let registry = HashRegistry::new();
        assert!(registry.try_add_hash(ZH_HASH, zh_record("1.04")));

        assert_eq!(registry.get_version_from_hash(ZH_HASH, GameType::ZeroHour), "1.04");
        assert_eq!(
            registry.get_version_from_hash(ZH_HASH, GameType::Generals),
            UNKNOWN_VERSION
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = HashRegistry::new();
        registry.try_add_hash(ZH_HASH, zh_record("1.04"));

        let record = registry.try_get_info(&ZH_HASH.to_lowercase()).unwrap();
        assert_eq!(record.version, "1.04");
        assert_eq!(record.hash, ZH_HASH.to_lowercase());
    }

    #[test]
    fn test_empty_and_unknown_hashes() {
        let registry = HashRegistry::new();
        assert!(registry.try_get_info("").is_none());
        assert!(registry.try_get_info("deadbeef").is_none());
        assert!(!registry.try_add_hash("   ", zh_record("1.04")));
        assert_eq!(
            registry.get_version_from_hash("deadbeef", GameType::ZeroHour),
            UNKNOWN_VERSION
        );
    }

    #[test]
    fn test_duplicate_insert_keeps_first_record() {
        let registry = HashRegistry::new();
        assert!(registry.try_add_hash(ZH_HASH, zh_record("1.04")));
        assert!(!registry.try_add_hash(&ZH_HASH.to_lowercase(), zh_record("1.05")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.try_get_info(ZH_HASH).unwrap().version, "1.04");
    }

    #[test]
    fn test_concurrent_duplicate_inserts_leave_one_record() {
        let registry = Arc::new(HashRegistry::new());

        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let registry = Arc::clone(&registry);
                    scope.spawn(move || {
                        usize::from(registry.try_add_hash(ZH_HASH, zh_record(&format!("1.{i:02}"))))
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(winners, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_bundled_records_parse() {
        let records = bundled_records().unwrap();
        let registry = HashRegistry::new();
        assert_eq!(registry.seed(records.clone()), records.len());
    }

    #[test]
    fn test_parsed_records_seed_the_registry() {
        let json = r#"[
            {"hash": "ABCD01", "game_type": "zero_hour", "version": "1.04", "publisher": "ea", "trusted": true},
            {"hash": "abcd02", "game_type": "generals", "version": "1.08", "publisher": "ea", "trusted": true}
        ]"#;
        let registry = HashRegistry::new();

        assert_eq!(registry.seed(parse_records(json).unwrap()), 2);
        assert_eq!(registry.get_version_from_hash("abcd01", GameType::ZeroHour), "1.04");
        assert!(parse_records("{\"hash\": 1}").is_err());
    }

    #[test]
    fn test_seed_counts_new_records_only() {
        let registry = HashRegistry::new();
        let added = registry.seed(vec![
            zh_record("1.04"),
            zh_record("1.05"),
            HashRecord::new("bbbb", GameType::Generals, "1.08", OFFICIAL_PUBLISHER, true),
        ]);
        assert_eq!(added, 2);
        assert_eq!(registry.records().len(), 2);
    }

    #[test]
    fn test_executable_names_are_ordered_and_deduplicated() {
        let registry = HashRegistry::with_default_executables();
        let names = registry.possible_executable_names();
        assert_eq!(names.first().map(String::as_str), Some("game.dat"));
        assert_eq!(names.len(), DEFAULT_EXECUTABLE_NAMES.len());

        assert!(!registry.add_possible_executable_name("GAME.DAT"));
        assert!(registry.add_possible_executable_name("generals_custom.exe"));
        assert_eq!(
            registry.possible_executable_names().last().map(String::as_str),
            Some("generals_custom.exe")
        );
        assert!(registry.is_candidate_name("Generals.EXE"));
        assert!(!registry.is_candidate_name("readme.txt"));
    }
}
