//! Locale-aware string comparison for title sorting

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};

thread_local! {
    // Root collation, tertiary strength: base letters, then accents, then case.
    static ROOT_COLLATOR: Collator = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        Collator::try_new(&Default::default(), options)
            .expect("root collation data is compiled in")
    };
}

/// Compares two titles in the default Unicode collation order
///
/// Symbols sort before digits and letters, accented letters sort next to
/// their base letter (`Ábaco < apple < éclair`), and strings that differ
/// only in case put lowercase first. Strings the collator considers equal
/// fall back to code point order so the result is a total order.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| collator.compare(a, b))
        .then_with(|| a.cmp(b))
}
