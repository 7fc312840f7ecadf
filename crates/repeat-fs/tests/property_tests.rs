use proptest::prelude::*;
use repeat_fs::NormalizedPath;

proptest! {
    #[test]
    fn test_normalization_has_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        // Normalizing an already normalized path changes nothing
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_keeps_root_prefix(root in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}", rel in "[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let joined = NormalizedPath::new(&root).join(&rel);
        prop_assert!(joined.as_str().starts_with(&root));
        prop_assert!(joined.as_str().ends_with(&rel));
        prop_assert!(!joined.as_str().contains("//"));
    }
}
