use crate::{
    db::query::options::{Order, OrderBy},
    model::{Term, TermId},
};
use std::cmp::Ordering;

///
/// IncludeFilter
///
/// Three-state include constraint. `MatchNothing` is the pinned behavior
/// for an include list that was supplied non-empty but sanitized away
/// entirely; only an originally-empty list is `Absent`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum IncludeFilter {
    #[default]
    Absent,
    Ids(Vec<TermId>),
    MatchNothing,
}

impl IncludeFilter {
    #[must_use]
    pub fn admits(&self, id: TermId) -> bool {
        match self {
            Self::Absent => true,
            Self::Ids(ids) => ids.contains(&id),
            Self::MatchNothing => false,
        }
    }

    /// Position of an id in the include list, for include-order sorting.
    #[must_use]
    pub fn position(&self, id: TermId) -> Option<usize> {
        match self {
            Self::Ids(ids) => ids.iter().position(|candidate| *candidate == id),
            Self::Absent | Self::MatchNothing => None,
        }
    }
}

///
/// Constraints
///
/// Deterministic storage-predicate translation of canonical options. The
/// store evaluates these; it never sees raw caller input, so a sanitized
/// list can never reach storage as a malformed predicate.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Constraints {
    pub hide_empty: bool,
    pub include: IncludeFilter,
    pub exclude: Vec<TermId>,
    pub search: Option<String>,
    pub name_like: Option<String>,
    pub description_like: Option<String>,
    pub orderby: OrderBy,
    pub order: Order,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl Constraints {
    /// Row-level predicate: does this term satisfy every filter?
    #[must_use]
    pub fn admits(&self, term: &Term) -> bool {
        if self.hide_empty && term.count == 0 {
            return false;
        }
        if !self.include.admits(term.id) {
            return false;
        }
        if self.exclude.contains(&term.id) {
            return false;
        }
        if let Some(needle) = self.search.as_deref()
            && !contains_ci(&term.name, needle)
            && !contains_ci(&term.slug, needle)
        {
            return false;
        }
        if let Some(needle) = self.name_like.as_deref()
            && !contains_ci(&term.name, needle)
        {
            return false;
        }
        if let Some(needle) = self.description_like.as_deref()
            && !contains_ci(&term.description, needle)
        {
            return false;
        }

        true
    }

    /// Order admitted rows.
    ///
    /// A non-empty include list dictates result order outright; otherwise
    /// rows sort by the requested column with id as tie-break, reversed for
    /// descending order. `Unordered` keeps storage order.
    pub fn order_rows(&self, rows: &mut [Term]) {
        if let IncludeFilter::Ids(_) = &self.include {
            rows.sort_by_key(|term| self.include.position(term.id).unwrap_or(usize::MAX));
            return;
        }

        if self.orderby == OrderBy::Unordered {
            return;
        }

        rows.sort_by(|a, b| {
            let cmp = match self.orderby {
                // Name/slug comparisons are collation-style: case-insensitive.
                OrderBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                OrderBy::Slug => a.slug.to_lowercase().cmp(&b.slug.to_lowercase()),
                OrderBy::Id => a.id.cmp(&b.id),
                OrderBy::Count => a.count.cmp(&b.count),
                OrderBy::Unordered => Ordering::Equal,
            };
            let cmp = cmp.then_with(|| a.id.cmp(&b.id));

            match self.order {
                Order::Asc => cmp,
                Order::Desc => cmp.reverse(),
            }
        });
    }

    /// Apply offset/limit to ordered rows.
    #[must_use]
    pub fn paginate(&self, rows: Vec<Term>) -> Vec<Term> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = self
            .limit
            .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

        rows.into_iter().skip(offset).take(limit).collect()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn term(id: TermId, name: &str) -> Term {
        Term::new(name).with_id(id).with_count(1)
    }

    #[test]
    fn hide_empty_rejects_zero_count() {
        let constraints = Constraints {
            hide_empty: true,
            ..Default::default()
        };

        assert!(!constraints.admits(&Term::new("empty").with_id(1)));
        assert!(constraints.admits(&term(1, "full")));
    }

    #[test]
    fn include_and_hide_empty_compose_independently() {
        let constraints = Constraints {
            hide_empty: true,
            include: IncludeFilter::Ids(vec![1, 2]),
            ..Default::default()
        };

        // Included but empty: still hidden.
        assert!(!constraints.admits(&Term::new("a").with_id(1)));
        assert!(constraints.admits(&term(2, "b")));
        assert!(!constraints.admits(&term(3, "c")));
    }

    #[test]
    fn match_nothing_rejects_everything() {
        let constraints = Constraints {
            hide_empty: false,
            include: IncludeFilter::MatchNothing,
            ..Default::default()
        };

        assert!(!constraints.admits(&term(1, "a")));
    }

    #[test]
    fn exclude_rejects_listed_ids() {
        let constraints = Constraints {
            hide_empty: false,
            exclude: vec![2],
            ..Default::default()
        };

        assert!(constraints.admits(&term(1, "a")));
        assert!(!constraints.admits(&term(2, "b")));
    }

    #[test]
    fn search_matches_name_or_slug_case_insensitively() {
        let constraints = Constraints {
            hide_empty: false,
            search: Some("BUR".to_string()),
            ..Default::default()
        };

        let by_slug = Term::new("Food").with_id(1).with_slug("burrito");
        let by_name = Term::new("Wilbur").with_id(2).with_slug("pig");
        let neither = Term::new("taco").with_id(3);

        assert!(constraints.admits(&by_slug));
        assert!(constraints.admits(&by_name));
        assert!(!constraints.admits(&neither));
    }

    #[test]
    fn like_filters_target_one_column_only() {
        let name_like = Constraints {
            hide_empty: false,
            name_like: Some("bur".to_string()),
            ..Default::default()
        };
        let description_like = Constraints {
            hide_empty: false,
            description_like: Some("bur".to_string()),
            ..Default::default()
        };

        let named = Term::new("burrito").with_id(1);
        let described = Term::new("taco").with_id(2).with_description("Burning man.");

        assert!(name_like.admits(&named));
        assert!(!name_like.admits(&described));
        assert!(description_like.admits(&described));
        assert!(!description_like.admits(&named));
    }

    #[test]
    fn include_order_overrides_orderby() {
        let constraints = Constraints {
            include: IncludeFilter::Ids(vec![3, 1, 2]),
            ..Default::default()
        };

        let mut rows = vec![term(1, "a"), term(2, "b"), term(3, "c")];
        constraints.order_rows(&mut rows);

        let ids: Vec<TermId> = rows.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn orderby_name_is_case_insensitive_with_id_tiebreak() {
        let constraints = Constraints::default();

        let mut rows = vec![term(2, "beta"), term(3, "Alpha"), term(1, "beta")];
        constraints.order_rows(&mut rows);

        let ids: Vec<TermId> = rows.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn descending_order_reverses_comparator() {
        let constraints = Constraints {
            orderby: OrderBy::Id,
            order: Order::Desc,
            ..Default::default()
        };

        let mut rows = vec![term(1, "a"), term(3, "c"), term(2, "b")];
        constraints.order_rows(&mut rows);

        let ids: Vec<TermId> = rows.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn paginate_applies_offset_then_limit() {
        let constraints = Constraints {
            limit: Some(2),
            offset: 1,
            ..Default::default()
        };

        let rows = vec![term(1, "a"), term(2, "b"), term(3, "c"), term(4, "d")];
        let page = constraints.paginate(rows);

        let ids: Vec<TermId> = page.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
