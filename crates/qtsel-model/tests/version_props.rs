use proptest::prelude::*;
use qtsel_model::QtVersion;

proptest! {
    #[test]
    fn compact_digits_rebuild_the_version(major in 1u32..10, minor in 10u32..100, patch in 0u32..100) {
        let version = QtVersion::new(major, minor, patch);
        prop_assert_eq!(QtVersion::from_compact_digits(&version.compact()), Some(version));
    }

    #[test]
    fn display_parses_back(major in 0u32..100, minor in 0u32..100, patch in 0u32..100) {
        let version = QtVersion::new(major, minor, patch);
        prop_assert_eq!(version.to_string().parse::<QtVersion>(), Ok(version));
    }
}
