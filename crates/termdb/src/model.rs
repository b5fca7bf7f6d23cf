use serde::{Deserialize, Serialize};

/// Primary key of a [`Term`]. `0` is never a valid identity; as a `parent`
/// value it means "root".
pub type TermId = u64;

/// Parent value for terms at the root of their hierarchy.
pub const ROOT_PARENT: TermId = 0;

///
/// Term
///
/// A taxonomy label: the single entity type this crate queries and caches.
///
/// `count` is derived state (number of associated objects) maintained by the
/// caller; it drives `hide_empty` filtering and is never computed here.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent: TermId,
    pub count: u64,
}

impl Term {
    /// Create a term with the given name. The slug is derived from the name
    /// unless overridden with [`Self::with_slug`]; an id of `0` asks the
    /// store to assign one on insert.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);

        Self {
            id: 0,
            name,
            slug,
            description: String::new(),
            parent: ROOT_PARENT,
            count: 0,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: TermId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_parent(mut self, parent: TermId) -> Self {
        self.parent = parent;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }
}

/// Derive a URL-safe slug from a display name: lowercase alphanumerics with
/// single dashes between words. Empty input yields an empty slug.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }

    out
}

///
/// TESTS
///
