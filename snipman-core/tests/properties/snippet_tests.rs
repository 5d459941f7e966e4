//! Property-based tests for the snippet store and tag editing

use proptest::prelude::*;
use snipman_core::{
    ConfigManager, DashboardView, FilterState, SnippetDraft, SnippetManager, SnippetStore,
    StoreError, TagList,
};
use tempfile::TempDir;

// ========== Strategies ==========

fn arb_raw_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|s| s),
        " [a-z]{1,6} ".prop_map(|s| s),
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

fn arb_draft() -> impl Strategy<Value = SnippetDraft> {
    (
        "[A-Za-z][A-Za-z ]{0,10}",
        prop_oneof![Just("rust"), Just("python"), Just("sql")],
        "[a-z(){};]{1,20}",
        prop::collection::vec(arb_raw_tag(), 0..4),
    )
        .prop_map(|(title, language, code, tags)| {
            SnippetDraft::new(title, language, code).with_tags(tags)
        })
}

fn store() -> (SnippetManager, TempDir) {
    let temp = TempDir::new().unwrap();
    let manager =
        SnippetManager::new(ConfigManager::with_config_dir(temp.path().to_path_buf())).unwrap();
    (manager, temp)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Tags in a list are trimmed, non-empty and unique.
    #[test]
    fn tag_list_is_clean(raw in prop::collection::vec(arb_raw_tag(), 0..10)) {
        let tags: TagList = raw.iter().collect();
        let slice = tags.as_slice();
        for (i, tag) in slice.iter().enumerate() {
            prop_assert!(!tag.is_empty());
            prop_assert_eq!(tag.trim(), tag.as_str());
            prop_assert!(!slice[i + 1..].contains(tag));
        }
    }

    /// Adding a tag that is already present never changes the list.
    #[test]
    fn tag_add_is_idempotent(raw in prop::collection::vec(arb_raw_tag(), 1..6)) {
        let mut tags: TagList = raw.iter().collect();
        let before = tags.clone();
        for tag in &raw {
            tags.add(tag);
        }
        prop_assert_eq!(tags, before);
    }

    /// Created snippets can be read back, and every id is unique.
    #[test]
    fn created_snippets_are_retrievable(drafts in prop::collection::vec(arb_draft(), 1..6)) {
        let (mut manager, _temp) = store();
        let mut ids = Vec::new();
        for draft in &drafts {
            ids.push(manager.create(draft.clone(), "owner").unwrap());
        }

        prop_assert_eq!(manager.snippet_count(), drafts.len());
        for (id, draft) in ids.iter().zip(&drafts) {
            let snippet = manager.get_snippet(id).unwrap();
            prop_assert_eq!(&snippet.title, &draft.title);
            prop_assert_eq!(&snippet.code, &draft.code);
        }

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), ids.len());
    }

    /// Deleting everything leaves an empty store and an empty dashboard.
    #[test]
    fn delete_all_empties_store(drafts in prop::collection::vec(arb_draft(), 1..5)) {
        let (mut manager, _temp) = store();
        let ids: Vec<String> = drafts
            .into_iter()
            .map(|d| manager.create(d, "owner").unwrap())
            .collect();
        for id in &ids {
            manager.delete(id).unwrap();
        }
        prop_assert_eq!(manager.snippet_count(), 0);

        let view = DashboardView::from_store(&manager, FilterState::default());
        prop_assert!(view.visible().is_empty());
        prop_assert!(view.empty_message().is_some());
    }
}

#[test]
fn unknown_id_is_not_found() {
    let (mut manager, _temp) = store();
    let draft = SnippetDraft::new("t", "rust", "x");
    assert!(matches!(
        manager.update("missing", draft),
        Err(StoreError::NotFound(id)) if id == "missing"
    ));
    assert!(matches!(
        manager.delete("missing"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn snapshot_matches_listing() {
    let (mut manager, _temp) = store();
    manager
        .create(SnippetDraft::new("one", "rust", "x"), "u1")
        .unwrap();
    manager
        .create(SnippetDraft::new("two", "rust", "x"), "u2")
        .unwrap();
    assert_eq!(manager.snapshot(), manager.list_snippets().to_vec());
}
