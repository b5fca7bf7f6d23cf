use crate::{
    db::query::{
        constraints::{Constraints, IncludeFilter},
        fields::Fields,
    },
    model::TermId,
};
use std::collections::BTreeMap;

///
/// ScopeArg
///
/// Taxonomy scope input: a single name, a plain list, or an arbitrarily
/// keyed collection. Keys carry no meaning and are discarded on
/// normalization.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScopeArg {
    One(String),
    Many(Vec<String>),
    Keyed(BTreeMap<String, String>),
}

impl ScopeArg {
    /// Normalize to a plain ordered list of scope names, discarding keys.
    #[must_use]
    pub fn normalize(self) -> Vec<String> {
        match self {
            Self::One(scope) => vec![scope],
            Self::Many(scopes) => scopes,
            Self::Keyed(scopes) => scopes.into_values().collect(),
        }
    }
}

impl From<&str> for ScopeArg {
    fn from(scope: &str) -> Self {
        Self::One(scope.to_string())
    }
}

impl From<String> for ScopeArg {
    fn from(scope: String) -> Self {
        Self::One(scope)
    }
}

impl From<Vec<String>> for ScopeArg {
    fn from(scopes: Vec<String>) -> Self {
        Self::Many(scopes)
    }
}

impl From<Vec<&str>> for ScopeArg {
    fn from(scopes: Vec<&str>) -> Self {
        Self::Many(scopes.into_iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ScopeArg {
    fn from(scopes: [&str; N]) -> Self {
        Self::Many(scopes.into_iter().map(ToString::to_string).collect())
    }
}

impl From<BTreeMap<String, String>> for ScopeArg {
    fn from(scopes: BTreeMap<String, String>) -> Self {
        Self::Keyed(scopes)
    }
}

///
/// IdArg
///
/// Loosely-typed identifier input for include/exclude lists. Entries are
/// coerced by [`sanitize_id_list`]; anything that does not resolve to a
/// positive integer is silently dropped.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IdArg {
    Num(i64),
    Text(String),
}

impl From<i64> for IdArg {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for IdArg {
    fn from(value: i32) -> Self {
        Self::Num(i64::from(value))
    }
}

impl From<u64> for IdArg {
    // Identifiers beyond i64 cannot name a stored row; the sentinel is
    // dropped by sanitization like any other invalid entry.
    fn from(value: u64) -> Self {
        Self::Num(i64::try_from(value).unwrap_or(-1))
    }
}

impl From<&str> for IdArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for IdArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Coerce loose id entries to positive identifiers.
///
/// Zero, negative, and non-numeric entries are dropped without error;
/// duplicates are removed with first-occurrence order preserved.
#[must_use]
pub fn sanitize_id_list(entries: &[IdArg]) -> Vec<TermId> {
    let mut out: Vec<TermId> = Vec::with_capacity(entries.len());

    for entry in entries {
        let id = match entry {
            IdArg::Num(n) => TermId::try_from(*n).ok().filter(|id| *id > 0),
            IdArg::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|n| TermId::try_from(n).ok())
                .filter(|id| *id > 0),
        };

        if let Some(id) = id
            && !out.contains(&id)
        {
            out.push(id);
        }
    }

    out
}

///
/// OrderBy
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderBy {
    #[default]
    Name,
    Slug,
    Id,
    Count,
    Unordered,
}

impl OrderBy {
    /// Parse an order-by keyword; unrecognized input falls back to `Name`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "slug" => Self::Slug,
            "id" | "term_id" => Self::Id,
            "count" => Self::Count,
            "none" => Self::Unordered,
            _ => Self::Name,
        }
    }

    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Name => 0x01,
            Self::Slug => 0x02,
            Self::Id => 0x03,
            Self::Count => 0x04,
            Self::Unordered => 0x05,
        }
    }
}

impl From<&str> for OrderBy {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

///
/// Order
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    /// Parse a direction keyword; unrecognized input falls back to `Asc`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Asc => 0x01,
            Self::Desc => 0x02,
        }
    }
}

impl From<&str> for Order {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

///
/// QueryOptions
///
/// Raw, caller-facing option bag with documented defaults. Construct with
/// [`Self::new`] and the fluent setters; [`Self::normalize`] produces the
/// canonical form everything downstream consumes.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    orderby: OrderBy,
    order: Order,
    hide_empty: Option<bool>,
    include: Vec<IdArg>,
    exclude: Vec<IdArg>,
    number: u64,
    offset: u64,
    fields: Fields,
    search: Option<String>,
    name_like: Option<String>,
    description_like: Option<String>,
}

impl QueryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn orderby(mut self, orderby: impl Into<OrderBy>) -> Self {
        self.orderby = orderby.into();
        self
    }

    #[must_use]
    pub fn order(mut self, order: impl Into<Order>) -> Self {
        self.order = order.into();
        self
    }

    #[must_use]
    pub const fn hide_empty(mut self, hide_empty: bool) -> Self {
        self.hide_empty = Some(hide_empty);
        self
    }

    #[must_use]
    pub fn include<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IdArg>,
    {
        self.include = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn exclude<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IdArg>,
    {
        self.exclude = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Limit the number of returned rows; `0` means unbounded.
    #[must_use]
    pub const fn number(mut self, number: u64) -> Self {
        self.number = number;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    #[must_use]
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    #[must_use]
    pub fn name_like(mut self, needle: impl Into<String>) -> Self {
        self.name_like = Some(needle.into());
        self
    }

    #[must_use]
    pub fn description_like(mut self, needle: impl Into<String>) -> Self {
        self.description_like = Some(needle.into());
        self
    }

    /// Resolve defaults and coerce loose inputs into canonical values.
    ///
    /// An include list that was given non-empty but sanitized to nothing
    /// becomes [`IncludeFilter::MatchNothing`]; only an originally-empty
    /// list means "no include filter".
    #[must_use]
    pub fn normalize(&self) -> CanonicalOptions {
        let include = if self.include.is_empty() {
            IncludeFilter::Absent
        } else {
            let ids = sanitize_id_list(&self.include);
            if ids.is_empty() {
                IncludeFilter::MatchNothing
            } else {
                IncludeFilter::Ids(ids)
            }
        };

        CanonicalOptions {
            orderby: self.orderby,
            order: self.order,
            hide_empty: self.hide_empty.unwrap_or(true),
            include,
            exclude: sanitize_id_list(&self.exclude),
            limit: (self.number > 0).then_some(self.number),
            offset: self.offset,
            fields: self.fields,
            search: clean_needle(self.search.as_deref()),
            name_like: clean_needle(self.name_like.as_deref()),
            description_like: clean_needle(self.description_like.as_deref()),
        }
    }
}

fn clean_needle(needle: Option<&str>) -> Option<String> {
    needle.filter(|s| !s.is_empty()).map(ToString::to_string)
}

///
/// CanonicalOptions
///
/// Fully-resolved query shape: defaults applied, id lists sanitized, limit
/// made explicit. This is the only form that is fingerprinted or translated
/// into storage constraints.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalOptions {
    pub orderby: OrderBy,
    pub order: Order,
    pub hide_empty: bool,
    pub include: IncludeFilter,
    pub exclude: Vec<TermId>,
    pub limit: Option<u64>,
    pub offset: u64,
    pub fields: Fields,
    pub search: Option<String>,
    pub name_like: Option<String>,
    pub description_like: Option<String>,
}

impl CanonicalOptions {
    /// Translate canonical options into storage predicates.
    #[must_use]
    pub fn to_constraints(&self) -> Constraints {
        Constraints {
            hide_empty: self.hide_empty,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            search: self.search.clone(),
            name_like: self.name_like.clone(),
            description_like: self.description_like.clone(),
            orderby: self.orderby,
            order: self.order,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_keys_are_discarded() {
        let keyed: BTreeMap<String, String> =
            BTreeMap::from([("111".to_string(), "post_tag".to_string())]);

        assert_eq!(
            ScopeArg::from(keyed).normalize(),
            vec!["post_tag".to_string()]
        );
        assert_eq!(
            ScopeArg::from("post_tag").normalize(),
            vec!["post_tag".to_string()]
        );
    }

    #[test]
    fn sanitize_drops_invalid_entries() {
        let entries = vec![
            IdArg::from(3_i64),
            IdArg::from(0_i64),
            IdArg::from(-7_i64),
            IdArg::from("12"),
            IdArg::from("unexpected-string"),
            IdArg::from(" 4 "),
            IdArg::from(3_i64),
        ];

        assert_eq!(sanitize_id_list(&entries), vec![3, 12, 4]);
    }

    #[test]
    fn sanitize_preserves_first_occurrence_order() {
        let entries = vec![IdArg::from(9_i64), IdArg::from(2_i64), IdArg::from("9")];
        assert_eq!(sanitize_id_list(&entries), vec![9, 2]);
    }

    #[test]
    fn defaults_resolve_on_normalize() {
        let canonical = QueryOptions::new().normalize();

        assert_eq!(canonical.orderby, OrderBy::Name);
        assert_eq!(canonical.order, Order::Asc);
        assert!(canonical.hide_empty);
        assert_eq!(canonical.include, IncludeFilter::Absent);
        assert!(canonical.exclude.is_empty());
        assert_eq!(canonical.limit, None);
        assert_eq!(canonical.offset, 0);
        assert_eq!(canonical.fields, Fields::All);
    }

    #[test]
    fn zero_number_means_unbounded() {
        assert_eq!(QueryOptions::new().number(0).normalize().limit, None);
        assert_eq!(QueryOptions::new().number(10).normalize().limit, Some(10));
    }

    #[test]
    fn fully_invalid_include_matches_nothing() {
        let canonical = QueryOptions::new()
            .include(["unexpected-string"])
            .normalize();
        assert_eq!(canonical.include, IncludeFilter::MatchNothing);

        let canonical = QueryOptions::new().include(Vec::<i64>::new()).normalize();
        assert_eq!(canonical.include, IncludeFilter::Absent);
    }

    #[test]
    fn empty_needles_normalize_to_absent() {
        let canonical = QueryOptions::new().search("").name_like("bur").normalize();
        assert_eq!(canonical.search, None);
        assert_eq!(canonical.name_like.as_deref(), Some("bur"));
    }

    #[test]
    fn orderby_parse_falls_back_to_name() {
        assert_eq!(OrderBy::parse("slug"), OrderBy::Slug);
        assert_eq!(OrderBy::parse("term_id"), OrderBy::Id);
        assert_eq!(OrderBy::parse("NONE"), OrderBy::Unordered);
        assert_eq!(OrderBy::parse("what-even"), OrderBy::Name);
        assert_eq!(Order::parse("DESC"), Order::Desc);
        assert_eq!(Order::parse("sideways"), Order::Asc);
    }
}
