//! Property-based tests for dashboard filtering and sorting

use std::cmp::Ordering;

use proptest::prelude::*;
use snipman_core::filter::{locale_compare, view};
use snipman_core::{apply, FilterState, LanguageFilter, Snippet, SortKey, Timestamp};

// ========== Strategies ==========

fn arb_language() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Python".to_string()),
        Just("python".to_string()),
        Just("java".to_string()),
        Just("JavaScript".to_string()),
        Just("sql".to_string()),
        Just(String::new()),
    ]
}

fn arb_title() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,12}".prop_map(|s| s)
}

fn arb_tag() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,8}".prop_map(|s| s)
}

fn arb_snippet() -> impl Strategy<Value = Snippet> {
    (
        arb_title(),
        arb_language(),
        prop::collection::vec(arb_tag(), 0..3),
        0i64..1_000,
    )
        .prop_map(|(title, language, tags, seconds)| {
            Snippet::new(title, language, "code")
                .with_tags(tags)
                .with_created_at(Timestamp::from_seconds(seconds))
        })
}

fn arb_snippets() -> impl Strategy<Value = Vec<Snippet>> {
    prop::collection::vec(arb_snippet(), 0..25)
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Newest),
        Just(SortKey::Oldest),
        Just(SortKey::Name),
        Just(SortKey::NameDesc),
        Just(SortKey::Unsorted),
    ]
}

fn arb_filter_state() -> impl Strategy<Value = FilterState> {
    (
        prop_oneof![Just("All".to_string()), arb_language()],
        prop::collection::vec(arb_language(), 0..2),
        prop_oneof![Just(String::new()), "[a-zA-Z]{1,3}".prop_map(|s| s)],
        arb_sort_key(),
    )
        .prop_map(|(language, selected, query, sort)| {
            FilterState::new()
                .with_language(language.as_str())
                .with_selected_languages(selected)
                .with_query(query)
                .with_sort(sort)
        })
}

fn ids(snippets: &[Snippet]) -> Vec<&str> {
    snippets.iter().map(|s| s.id.as_str()).collect()
}

fn is_subsequence(sub: &[&str], full: &[&str]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|wanted| rest.any(|id| id == wanted))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With no active filter and unknown sort key, the input comes back unchanged.
    #[test]
    fn identity_state_returns_input(snippets in arb_snippets()) {
        let state = FilterState::new().with_sort(SortKey::parse("unknown"));
        prop_assert!(state.is_identity());
        let result = apply(&snippets, &state);
        prop_assert_eq!(result, snippets);
    }

    /// With no active filter, the output is a permutation of the input, and
    /// time and identity orderings match a stable sort by seconds.
    #[test]
    fn identity_state_only_sorts(snippets in arb_snippets(), sort in arb_sort_key()) {
        let state = FilterState::new().with_sort(sort);
        let result = apply(&snippets, &state);

        let mut got = ids(&result);
        let mut all = ids(&snippets);
        let mut expected: Vec<&Snippet> = snippets.iter().collect();
        match sort {
            SortKey::Newest => expected.sort_by(|a, b| b.created_at.seconds.cmp(&a.created_at.seconds)),
            SortKey::Oldest => expected.sort_by(|a, b| a.created_at.seconds.cmp(&b.created_at.seconds)),
            SortKey::Unsorted => {}
            // Title orderings are pinned by the fixed examples below
            SortKey::Name | SortKey::NameDesc => {
                got.sort_unstable();
                all.sort_unstable();
                prop_assert_eq!(got, all);
                return Ok(());
            }
        }
        let expected_ids: Vec<&str> = expected.iter().map(|s| s.id.as_str()).collect();
        prop_assert_eq!(got, expected_ids);
    }

    /// Every returned snippet passes every active filter, and every dropped one fails one.
    #[test]
    fn output_is_exactly_the_matching_set(snippets in arb_snippets(), state in arb_filter_state()) {
        let result = apply(&snippets, &state);
        for snippet in &result {
            prop_assert!(state.matches(snippet));
        }
        let expected = snippets.iter().filter(|s| state.matches(s)).count();
        prop_assert_eq!(result.len(), expected);
    }

    /// Unsorted output preserves input order.
    #[test]
    fn unsorted_output_is_subsequence(snippets in arb_snippets(), state in arb_filter_state()) {
        let state = state.with_sort(SortKey::Unsorted);
        let result = apply(&snippets, &state);
        prop_assert!(is_subsequence(&ids(&result), &ids(&snippets)));
    }

    /// Filtering never mutates its input and is repeatable.
    #[test]
    fn apply_is_pure(snippets in arb_snippets(), state in arb_filter_state()) {
        let before = snippets.clone();
        let first = apply(&snippets, &state);
        let second = apply(&snippets, &state);
        prop_assert_eq!(&snippets, &before);
        prop_assert_eq!(first, second);
    }

    /// A specific language keeps only case-insensitive matches.
    #[test]
    fn language_filter_is_case_insensitive(snippets in arb_snippets(), language in arb_language()) {
        let state = FilterState::new().with_language(language.as_str());
        for snippet in view(&snippets, &state) {
            prop_assert_eq!(snippet.language.to_lowercase(), language.to_lowercase());
        }
    }

    /// An empty selected-languages set changes nothing.
    #[test]
    fn empty_selection_is_noop(snippets in arb_snippets(), state in arb_filter_state()) {
        let with_empty = state.clone().with_selected_languages(Vec::<String>::new());
        let without = FilterState { selected_languages: Default::default(), ..state };
        prop_assert_eq!(apply(&snippets, &with_empty), apply(&snippets, &without));
    }

    /// Newest and oldest orderings are monotonic in seconds.
    #[test]
    fn time_sorts_are_monotonic(snippets in arb_snippets()) {
        let newest = apply(&snippets, &FilterState::new().with_sort(SortKey::Newest));
        for pair in newest.windows(2) {
            prop_assert!(pair[0].created_at.seconds >= pair[1].created_at.seconds);
        }
        let oldest = apply(&snippets, &FilterState::new().with_sort(SortKey::Oldest));
        for pair in oldest.windows(2) {
            prop_assert!(pair[0].created_at.seconds <= pair[1].created_at.seconds);
        }
    }

    /// Name ordering follows the locale comparison in both directions.
    #[test]
    fn name_sorts_are_ordered(snippets in arb_snippets()) {
        let asc = apply(&snippets, &FilterState::new().with_sort(SortKey::Name));
        for pair in asc.windows(2) {
            prop_assert_ne!(locale_compare(&pair[0].title, &pair[1].title), Ordering::Greater);
        }
        let desc = apply(&snippets, &FilterState::new().with_sort(SortKey::NameDesc));
        for pair in desc.windows(2) {
            prop_assert_ne!(locale_compare(&pair[0].title, &pair[1].title), Ordering::Less);
        }
    }

    /// The locale comparison is antisymmetric.
    #[test]
    fn locale_compare_antisymmetric(a in arb_title(), b in arb_title()) {
        prop_assert_eq!(locale_compare(&a, &b), locale_compare(&b, &a).reverse());
    }

    /// A query matches regardless of its case.
    #[test]
    fn query_case_does_not_matter(snippets in arb_snippets(), query in "[a-zA-Z]{1,3}") {
        let lower = apply(&snippets, &FilterState::new().with_query(query.to_lowercase()));
        let upper = apply(&snippets, &FilterState::new().with_query(query.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }
}

// ========== Examples ==========

fn at(title: &str, language: &str, seconds: i64) -> Snippet {
    Snippet::new(title, language, "code").with_created_at(Timestamp::from_seconds(seconds))
}

#[test]
fn python_filter_drops_java() {
    let snippets = vec![at("py", "Python", 1), at("jv", "java", 2)];
    let result = apply(&snippets, &FilterState::new().with_language("python"));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].language, "Python");
}

#[test]
fn auth_query_matches_title_and_tag() {
    let snippets = vec![
        at("Auth Helper", "ts", 1),
        at("Token", "ts", 2).with_tags(vec!["auth".to_string()]),
        at("Other", "ts", 3),
    ];
    let result = apply(&snippets, &FilterState::new().with_query("auth"));
    let titles: Vec<&str> = result.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Token", "Auth Helper"]);
}

#[test]
fn name_sort_examples() {
    let snippets = vec![at("Zebra", "x", 1), at("apple", "x", 2), at("Mango", "x", 3)];
    let asc = apply(&snippets, &FilterState::new().with_sort(SortKey::Name));
    let titles: Vec<&str> = asc.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["apple", "Mango", "Zebra"]);

    let desc = apply(&snippets, &FilterState::new().with_sort(SortKey::NameDesc));
    let titles: Vec<&str> = desc.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Zebra", "Mango", "apple"]);
}

#[test]
fn name_sort_accents_and_symbols() {
    let snippets: Vec<Snippet> = ["zebra", "éclair", "fig", "Ábaco", "~notes", "apple"]
        .iter()
        .zip(1..)
        .map(|(title, seconds)| at(title, "x", seconds))
        .collect();

    let asc = apply(&snippets, &FilterState::new().with_sort(SortKey::Name));
    let titles: Vec<&str> = asc.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["~notes", "Ábaco", "apple", "éclair", "fig", "zebra"]);

    let desc = apply(&snippets, &FilterState::new().with_sort(SortKey::NameDesc));
    let titles: Vec<&str> = desc.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["zebra", "fig", "éclair", "apple", "Ábaco", "~notes"]);
}

#[test]
fn name_sort_case_variants() {
    let snippets = vec![at("Résumé", "x", 1), at("resume", "x", 2), at("résumé", "x", 3)];
    let asc = apply(&snippets, &FilterState::new().with_sort(SortKey::Name));
    let titles: Vec<&str> = asc.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["resume", "résumé", "Résumé"]);
}

#[test]
fn newest_sort_example() {
    let snippets = vec![at("a", "x", 100), at("b", "x", 300), at("c", "x", 200)];
    let result = apply(&snippets, &FilterState::new().with_sort(SortKey::Newest));
    let seconds: Vec<i64> = result.iter().map(|s| s.created_at.seconds).collect();
    assert_eq!(seconds, vec![300, 200, 100]);
}

#[test]
fn all_keyword_any_case() {
    assert_eq!(LanguageFilter::parse("ALL"), LanguageFilter::All);
    let snippets = vec![at("a", "Python", 1), at("b", "java", 2)];
    let result = apply(&snippets, &FilterState::new().with_language("all"));
    assert_eq!(result.len(), 2);
}
