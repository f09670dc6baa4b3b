//! Filter and sort views over a collection snapshot
//!
//! Everything here is pure: inputs are borrowed, results are fresh vectors.
//! Sorting is stable, so ties keep the order of the input sequence.

use serde::{Deserialize, Serialize};

use crate::item::{Item, Kind};

/// Sort order for a derived view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently added first
    #[default]
    Newest,
    Oldest,
    /// Case-insensitive by label
    Alphabetical,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Alphabetical => "alphabetical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "newest-first" | "recent" => Some(SortOrder::Newest),
            "oldest" | "oldest-first" => Some(SortOrder::Oldest),
            "alphabetical" | "alpha" | "a-z" | "title" => Some(SortOrder::Alphabetical),
            _ => None,
        }
    }
}

/// Kind selector: one category, or everything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Movie,
    Tv,
}

impl KindFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Movie => Kind::Movie.as_str(),
            KindFilter::Tv => Kind::Tv.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(KindFilter::All);
        }
        Kind::from_str(s).map(Self::from)
    }

    pub fn matches(&self, kind: Kind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Movie => kind == Kind::Movie,
            KindFilter::Tv => kind == Kind::Tv,
        }
    }
}

impl From<Kind> for KindFilter {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Movie => KindFilter::Movie,
            Kind::Tv => KindFilter::Tv,
        }
    }
}

/// Items matching `filter`, in input order
pub fn filtered(items: &[Item], filter: KindFilter) -> Vec<Item> {
    items
        .iter()
        .filter(|item| filter.matches(item.kind))
        .cloned()
        .collect()
}

/// A sorted copy of `items`
pub fn sorted(items: &[Item], order: SortOrder) -> Vec<Item> {
    let mut out = items.to_vec();
    match order {
        SortOrder::Newest => out.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        SortOrder::Oldest => out.sort_by_key(|item| item.added_at),
        SortOrder::Alphabetical => out.sort_by_cached_key(|item| item.label.to_lowercase()),
    }
    out
}

/// Filter, then sort
pub fn view(items: &[Item], filter: KindFilter, order: SortOrder) -> Vec<Item> {
    sorted(&filtered(items, filter), order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: &str, kind: Kind, label: &str, added_at: i64) -> Item {
        Item {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            thumbnail: String::new(),
            added_at,
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_sort_newest_and_oldest() {
        let items = vec![
            item("a", Kind::Movie, "A", 100),
            item("b", Kind::Movie, "B", 300),
            item("c", Kind::Movie, "C", 200),
        ];

        let newest = sorted(&items, SortOrder::Newest);
        let stamps: Vec<i64> = newest.iter().map(|i| i.added_at).collect();
        assert_eq!(stamps, vec![300, 200, 100]);

        let oldest = sorted(&items, SortOrder::Oldest);
        let stamps: Vec<i64> = oldest.iter().map(|i| i.added_at).collect();
        assert_eq!(stamps, vec![100, 200, 300]);

        // Input untouched
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_alphabetical_ignores_case() {
        let items = vec![
            item("1", Kind::Movie, "Banana", 1),
            item("2", Kind::Movie, "apple", 2),
            item("3", Kind::Tv, "Cherry", 3),
        ];
        let labels: Vec<String> = sorted(&items, SortOrder::Alphabetical)
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        let items = vec![
            item("x", Kind::Movie, "Heat", 5),
            item("y", Kind::Movie, "heat", 5),
            item("z", Kind::Movie, "HEAT", 5),
        ];
        for order in [SortOrder::Newest, SortOrder::Oldest, SortOrder::Alphabetical] {
            assert_eq!(ids(&sorted(&items, order)), vec!["x", "y", "z"], "{order:?}");
        }
    }

    #[test]
    fn test_filter_by_kind() {
        let items = vec![
            item("m1", Kind::Movie, "Fight Club", 3),
            item("t1", Kind::Tv, "Breaking Bad", 2),
            item("m2", Kind::Movie, "Heat", 1),
        ];
        assert_eq!(ids(&filtered(&items, KindFilter::Movie)), vec!["m1", "m2"]);
        assert_eq!(ids(&filtered(&items, KindFilter::Tv)), vec!["t1"]);
        assert_eq!(ids(&filtered(&items, KindFilter::All)), vec!["m1", "t1", "m2"]);
    }

    #[test]
    fn test_view_filters_then_sorts() {
        let items = vec![
            item("m1", Kind::Movie, "Zodiac", 3),
            item("t1", Kind::Tv, "Atlanta", 2),
            item("m2", Kind::Movie, "Alien", 1),
        ];
        let v = view(&items, KindFilter::Movie, SortOrder::Alphabetical);
        assert_eq!(ids(&v), vec!["m2", "m1"]);
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(SortOrder::from_str("Newest-First"), Some(SortOrder::Newest));
        assert_eq!(SortOrder::from_str("alphabetical"), Some(SortOrder::Alphabetical));
        assert_eq!(SortOrder::from_str("random"), None);
        assert_eq!(KindFilter::from_str("ALL"), Some(KindFilter::All));
        assert_eq!(KindFilter::from_str("movie"), Some(KindFilter::Movie));
        assert_eq!(KindFilter::from_str("tv"), Some(KindFilter::Tv));
        assert_eq!(KindFilter::from_str(""), None);
    }

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec((0i64..5, "[a-cA-C]{1,2}", any::<bool>()), 0..24).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (added_at, label, is_movie))| {
                        let kind = if is_movie { Kind::Movie } else { Kind::Tv };
                        item(&i.to_string(), kind, &label, added_at)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_sort_is_stable_permutation(items in arb_items()) {
            for order in [SortOrder::Newest, SortOrder::Oldest, SortOrder::Alphabetical] {
                let out = sorted(&items, order);
                prop_assert_eq!(out.len(), items.len());

                let position = |id: &str| items.iter().position(|i| i.id == id).unwrap();
                for pair in out.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    let key_order = match order {
                        SortOrder::Newest => b.added_at.cmp(&a.added_at),
                        SortOrder::Oldest => a.added_at.cmp(&b.added_at),
                        SortOrder::Alphabetical => {
                            a.label.to_lowercase().cmp(&b.label.to_lowercase())
                        }
                    };
                    prop_assert!(key_order.is_le());
                    if key_order.is_eq() {
                        prop_assert!(position(&a.id) < position(&b.id));
                    }
                }
            }
        }

        #[test]
        fn prop_filter_keeps_relative_order(items in arb_items()) {
            let movies = filtered(&items, KindFilter::Movie);
            let tv = filtered(&items, KindFilter::Tv);
            prop_assert_eq!(movies.len() + tv.len(), items.len());

            let expected: Vec<&Item> = items.iter().filter(|i| i.kind == Kind::Movie).collect();
            let actual: Vec<&Item> = movies.iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
