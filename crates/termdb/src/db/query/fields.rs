use crate::{
    db::response::{QueryOutput, push_pair},
    model::Term,
};

///
/// Fields
///
/// Return-shape selector for term queries. Parsing is permissive:
/// unrecognized input falls back to [`Self::All`] rather than failing.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Fields {
    #[default]
    All,
    Ids,
    Names,
    IdParent,
    IdName,
    IdSlug,
}

impl Fields {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "ids" => Self::Ids,
            "names" => Self::Names,
            "id=>parent" => Self::IdParent,
            "id=>name" => Self::IdName,
            "id=>slug" => Self::IdSlug,
            _ => Self::All,
        }
    }

    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::All => 0x01,
            Self::Ids => 0x02,
            Self::Names => 0x03,
            Self::IdParent => 0x04,
            Self::IdName => 0x05,
            Self::IdSlug => 0x06,
        }
    }

    /// Project full rows into the selected output shape in one pass.
    ///
    /// Mapping shapes preserve row order as insertion order; duplicate ids
    /// are last-write-wins.
    #[must_use]
    pub fn project(self, rows: Vec<Term>) -> QueryOutput {
        match self {
            Self::All => QueryOutput::Terms(rows),
            Self::Ids => QueryOutput::Ids(rows.into_iter().map(|t| t.id).collect()),
            Self::Names => QueryOutput::Names(rows.into_iter().map(|t| t.name).collect()),
            Self::IdParent => {
                let mut pairs = Vec::with_capacity(rows.len());
                for term in rows {
                    push_pair(&mut pairs, term.id, term.parent);
                }
                QueryOutput::IdParent(pairs)
            }
            Self::IdName => {
                let mut pairs = Vec::with_capacity(rows.len());
                for term in rows {
                    push_pair(&mut pairs, term.id, term.name);
                }
                QueryOutput::IdName(pairs)
            }
            Self::IdSlug => {
                let mut pairs = Vec::with_capacity(rows.len());
                for term in rows {
                    push_pair(&mut pairs, term.id, term.slug);
                }
                QueryOutput::IdSlug(pairs)
            }
        }
    }
}

impl From<&str> for Fields {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Term> {
        vec![
            Term::new("WOO!").with_id(1).with_slug("woo"),
            Term::new("HOO!").with_id(2).with_slug("hoo").with_parent(1),
        ]
    }

    #[test]
    fn parse_is_permissive() {
        assert_eq!(Fields::parse("ids"), Fields::Ids);
        assert_eq!(Fields::parse("id=>parent"), Fields::IdParent);
        assert_eq!(Fields::parse("ID=>SLUG"), Fields::IdSlug);
        assert_eq!(Fields::parse("tbd-shape"), Fields::All);
    }

    #[test]
    fn project_all_returns_rows_unmodified() {
        let input = rows();
        let out = Fields::All.project(input.clone());
        assert_eq!(out.as_terms(), Some(input.as_slice()));
    }

    #[test]
    fn project_scalar_shapes() {
        assert_eq!(Fields::Ids.project(rows()).as_ids(), Some([1, 2].as_slice()));
        assert_eq!(
            Fields::Names.project(rows()).as_names(),
            Some(["WOO!".to_string(), "HOO!".to_string()].as_slice())
        );
    }

    #[test]
    fn project_mapping_shapes() {
        assert_eq!(
            Fields::IdParent.project(rows()).as_id_parent(),
            Some([(1, 0), (2, 1)].as_slice())
        );
        assert_eq!(
            Fields::IdSlug.project(rows()).as_id_slug(),
            Some([(1, "woo".to_string()), (2, "hoo".to_string())].as_slice())
        );
    }

    #[test]
    fn duplicate_ids_are_last_write_wins() {
        let dup = vec![
            Term::new("first").with_id(1),
            Term::new("second").with_id(1),
        ];
        assert_eq!(
            Fields::IdName.project(dup).as_id_name(),
            Some([(1, "second".to_string())].as_slice())
        );
    }
}
