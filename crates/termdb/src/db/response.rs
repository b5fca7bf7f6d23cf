use crate::model::{Term, TermId};
use serde::{Deserialize, Serialize};

///
/// QueryOutput
///
/// Materialized query result in the shape selected by the `fields` option:
/// full rows, a single projected column, or an id-keyed mapping.
///
/// Mapping variants are insertion-ordered pair lists: row order is
/// preserved, and a duplicate id keeps its first position with the
/// last-written value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryOutput {
    Terms(Vec<Term>),
    Ids(Vec<TermId>),
    Names(Vec<String>),
    IdParent(Vec<(TermId, TermId)>),
    IdName(Vec<(TermId, String)>),
    IdSlug(Vec<(TermId, String)>),
}

impl QueryOutput {
    #[must_use]
    pub fn count(&self) -> u64 {
        let len = match self {
            Self::Terms(rows) => rows.len(),
            Self::Ids(rows) => rows.len(),
            Self::Names(rows) => rows.len(),
            Self::IdParent(rows) => rows.len(),
            Self::IdName(rows) | Self::IdSlug(rows) => rows.len(),
        };
        len as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[must_use]
    pub fn as_terms(&self) -> Option<&[Term]> {
        match self {
            Self::Terms(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ids(&self) -> Option<&[TermId]> {
        match self {
            Self::Ids(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_names(&self) -> Option<&[String]> {
        match self {
            Self::Names(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_id_parent(&self) -> Option<&[(TermId, TermId)]> {
        match self {
            Self::IdParent(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_id_name(&self) -> Option<&[(TermId, String)]> {
        match self {
            Self::IdName(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_id_slug(&self) -> Option<&[(TermId, String)]> {
        match self {
            Self::IdSlug(rows) => Some(rows),
            _ => None,
        }
    }

    /// Identifiers of the returned rows, for shapes that carry them.
    #[must_use]
    pub fn ids(&self) -> Vec<TermId> {
        match self {
            Self::Terms(rows) => rows.iter().map(|t| t.id).collect(),
            Self::Ids(rows) => rows.clone(),
            Self::Names(_) => Vec::new(),
            Self::IdParent(rows) => rows.iter().map(|(id, _)| *id).collect(),
            Self::IdName(rows) | Self::IdSlug(rows) => rows.iter().map(|(id, _)| *id).collect(),
        }
    }
}

/// Insert into an insertion-ordered pair list with last-write-wins
/// semantics for duplicate ids.
pub(crate) fn push_pair<V>(pairs: &mut Vec<(TermId, V)>, id: TermId, value: V) {
    if let Some(existing) = pairs.iter_mut().find(|(existing, _)| *existing == id) {
        existing.1 = value;
    } else {
        pairs.push((id, value));
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_covers_every_shape() {
        assert_eq!(QueryOutput::Terms(vec![Term::new("a")]).count(), 1);
        assert_eq!(QueryOutput::Ids(vec![1, 2]).count(), 2);
        assert_eq!(QueryOutput::Names(vec![]).count(), 0);
        assert_eq!(QueryOutput::IdParent(vec![(1, 0)]).count(), 1);
        assert!(QueryOutput::IdName(vec![]).is_empty());
    }

    #[test]
    fn push_pair_is_last_write_wins() {
        let mut pairs: Vec<(TermId, &str)> = Vec::new();
        push_pair(&mut pairs, 1, "first");
        push_pair(&mut pairs, 2, "second");
        push_pair(&mut pairs, 1, "replaced");

        assert_eq!(pairs, vec![(1, "replaced"), (2, "second")]);
    }

    #[test]
    fn ids_are_extracted_per_shape() {
        let out = QueryOutput::IdSlug(vec![(3, "c".to_string()), (1, "a".to_string())]);
        assert_eq!(out.ids(), vec![3, 1]);
        assert!(QueryOutput::Names(vec!["x".to_string()]).ids().is_empty());
    }
}
