//! Artifact - the normalized multi-file result of one generation call.
//!
//! An Artifact is derived data: a pure function of a record's raw completion
//! text, recomputed on demand and never stored as structured data. Parsing
//! is total - anything that is not a flat string-to-string mapping falls
//! back to a deterministic two-file substitute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name that receives the verbatim raw text when interpretation fails.
pub const FALLBACK_PRIMARY_FILE: &str = "main.txt";

/// File name of the synthesized README in the fallback artifact.
pub const FALLBACK_README_FILE: &str = "README.md";

/// Mapping of file path to file content produced by one generation call.
///
/// Invariant: at least one entry always exists. `parse` guarantees this by
/// substituting the fallback artifact whenever the provider output cannot
/// be interpreted as a non-empty flat mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct Artifact {
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    files: BTreeMap<String, String>,
}

impl Artifact {
    /// Interpret raw completion text as a file mapping. Total - never fails.
    ///
    /// Interpretation succeeds only if the top level is exactly a flat
    /// JSON object whose values are all strings. A valid-JSON array,
    /// number, string, null, nested object, or an empty mapping is an
    /// interpretation failure, not a single implicit file.
    ///
    /// On failure the result has exactly two entries: the verbatim raw
    /// text under `main.txt` and a one-line title derived from the prompt
    /// under `README.md`. Duplicate paths within a valid mapping collapse
    /// last-write-wins through the key-unique decode.
    pub fn parse(raw: &str, prompt: &str) -> Self {
        match serde_json::from_str::<BTreeMap<String, String>>(raw) {
            Ok(files) if !files.is_empty() => Self { files },
            // Parsed-but-empty counts as failure: the invariant that an
            // artifact holds at least one entry is unconditional.
            Ok(_) | Err(_) => Self::fallback(raw, prompt),
        }
    }

    /// Build the deterministic two-file fallback artifact.
    fn fallback(raw: &str, prompt: &str) -> Self {
        let mut files = BTreeMap::new();
        files.insert(FALLBACK_PRIMARY_FILE.to_string(), raw.to_string());
        files.insert(
            FALLBACK_README_FILE.to_string(),
            format!("# Project: {}\n", prompt),
        );
        Self { files }
    }

    /// Number of files in the artifact. Always at least 1.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false for parsed artifacts; kept for completeness.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a file's content by path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// The underlying path-to-content mapping.
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    /// Consume the artifact, yielding the mapping.
    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_mapping_returned_unchanged() {
        let raw = r##"{"App.js":"console.log('todo')","README.md":"# Todo"}"##;
        let artifact = Artifact::parse(raw, "todo list app");

        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get("App.js"), Some("console.log('todo')"));
        assert_eq!(artifact.get("README.md"), Some("# Todo"));
    }

    #[test]
    fn test_parse_single_entry_mapping() {
        let artifact = Artifact::parse(r#"{"a.txt":"hello"}"#, "p");
        assert_eq!(artifact.len(), 1);
        assert_eq!(artifact.get("a.txt"), Some("hello"));
    }

    #[test]
    fn test_parse_plain_text_falls_back() {
        let raw = "Sure, here's your app: ...";
        let artifact = Artifact::parse(raw, "todo list app");

        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some(raw));
        let readme = artifact.get(FALLBACK_README_FILE).unwrap();
        assert!(readme.contains("todo list app"));
    }

    #[test]
    fn test_parse_json_array_falls_back() {
        let artifact = Artifact::parse("[1,2]", "p");
        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some("[1,2]"));
    }

    #[test]
    fn test_parse_json_scalar_falls_back() {
        for raw in ["42", "\"just a string\"", "null", "true"] {
            let artifact = Artifact::parse(raw, "p");
            assert_eq!(artifact.len(), 2, "scalar {:?} must fall back", raw);
            assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some(raw));
        }
    }

    #[test]
    fn test_parse_nested_object_falls_back() {
        let raw = r#"{"nested":{"x":1}}"#;
        let artifact = Artifact::parse(raw, "p");
        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some(raw));
    }

    #[test]
    fn test_parse_non_string_value_falls_back() {
        let raw = r#"{"a.txt":7}"#;
        let artifact = Artifact::parse(raw, "p");
        assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some(raw));
    }

    #[test]
    fn test_parse_empty_string_falls_back() {
        let artifact = Artifact::parse("", "p");
        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some(""));
    }

    #[test]
    fn test_parse_empty_mapping_falls_back() {
        let artifact = Artifact::parse("{}", "p");
        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some("{}"));
    }

    #[test]
    fn test_fallback_readme_contains_prompt_verbatim() {
        let artifact = Artifact::parse("not json", "my weather dashboard");
        assert_eq!(
            artifact.get(FALLBACK_README_FILE),
            Some("# Project: my weather dashboard\n")
        );
    }

    #[test]
    fn test_duplicate_paths_last_write_wins() {
        let raw = r#"{"a.txt":"first","a.txt":"second"}"#;
        let artifact = Artifact::parse(raw, "p");
        assert_eq!(artifact.len(), 1);
        assert_eq!(artifact.get("a.txt"), Some("second"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        for raw in [r#"{"a.txt":"hello"}"#, "plain text", "[1,2]", ""] {
            let first = Artifact::parse(raw, "p");
            let second = Artifact::parse(raw, "p");
            assert_eq!(first, second);
        }
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// For any non-empty flat string-to-string mapping, parse returns
        /// exactly that mapping unchanged (round-trip identity).
        #[test]
        fn prop_flat_mapping_round_trips(
            files in prop::collection::btree_map(".{1,40}", ".{0,80}", 1..8)
        ) {
            let raw = serde_json::to_string(&files).unwrap();
            let artifact = Artifact::parse(&raw, "prompt");
            prop_assert_eq!(artifact.files(), &files);
        }

        /// For any raw text that is not a flat string-to-string mapping,
        /// parse yields exactly two entries: verbatim raw text plus a
        /// README containing the prompt.
        #[test]
        fn prop_non_mapping_falls_back(raw in "[^{]{0,120}", prompt in ".{0,40}") {
            // Inputs starting with anything but '{' can never decode as an
            // object, so the fallback branch is guaranteed.
            let artifact = Artifact::parse(&raw, &prompt);
            prop_assert_eq!(artifact.len(), 2);
            prop_assert_eq!(artifact.get(FALLBACK_PRIMARY_FILE), Some(raw.as_str()));
            let readme = artifact.get(FALLBACK_README_FILE).unwrap();
            prop_assert!(readme.contains(prompt.as_str()));
        }

        /// Parsing is deterministic: two calls on the same input agree.
        #[test]
        fn prop_parse_idempotent(raw in ".{0,160}", prompt in ".{0,40}") {
            let first = Artifact::parse(&raw, &prompt);
            let second = Artifact::parse(&raw, &prompt);
            prop_assert_eq!(first, second);
        }

        /// The artifact invariant holds for arbitrary input: at least one
        /// entry, never empty.
        #[test]
        fn prop_artifact_never_empty(raw in ".{0,160}", prompt in ".{0,40}") {
            let artifact = Artifact::parse(&raw, &prompt);
            prop_assert!(artifact.len() >= 1);
            prop_assert!(!artifact.is_empty());
        }
    }
}
