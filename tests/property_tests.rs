//! Property-based tests for digest determinism and grouping invariants.

use dupescan::duplicates::DuplicateFinder;
use dupescan::scanner::Hasher;
use proptest::prelude::*;
use tempfile::tempdir;

proptest! {
    // Filesystem-backed properties; keep case counts modest
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_digest_is_deterministic(content in proptest::collection::vec(any::<u8>(), 0..8192)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.bin");
        std::fs::write(&path, &content).unwrap();

        let hasher = Hasher::new();
        let first = hasher.hash_file(&path).unwrap();
        let second = hasher.hash_file(&path).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_identical_content_always_grouped(content in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("one.bin"), &content).unwrap();
        std::fs::write(dir.path().join("two.bin"), &content).unwrap();

        let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
        let dups: Vec<_> = result.duplicate_groups().collect();

        prop_assert_eq!(dups.len(), 1);
        prop_assert_eq!(dups[0].len(), 2);
    }

    #[test]
    fn prop_single_flipped_byte_never_grouped(content in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let mut altered = content.clone();
        altered[0] ^= 0xFF;

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("orig.bin"), &content).unwrap();
        std::fs::write(dir.path().join("alt.bin"), &altered).unwrap();

        let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

        // Same size, different content: two singleton groups
        prop_assert_eq!(result.groups().len(), 2);
        prop_assert_eq!(result.duplicate_groups().count(), 0);
    }

    #[test]
    fn prop_group_members_share_size_and_digest(
        contents in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..512), 1..8)
    ) {
        let dir = tempdir().unwrap();
        for (i, content) in contents.iter().enumerate() {
            std::fs::write(dir.path().join(format!("f{i}.bin")), content).unwrap();
        }

        let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
        for group in result.groups() {
            let size = group.size();
            for file in group.files() {
                prop_assert_eq!(file.size(), size);
            }
        }
    }
}
