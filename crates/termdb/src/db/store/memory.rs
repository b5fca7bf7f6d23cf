use crate::{
    db::{query::constraints::Constraints, store::TermStore},
    error::InternalError,
    model::{Term, TermId, slugify},
    obs::sink::{self, MetricsEvent},
};
use derive_more::{Deref, DerefMut};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{
        RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

///
/// TaxonomyIndex
///
/// Insertion-ordered term membership per taxonomy name.
///

#[derive(Debug, Default, Deref, DerefMut)]
struct TaxonomyIndex(BTreeMap<String, Vec<TermId>>);

///
/// MemoryStore
///
/// In-memory reference [`TermStore`]: rows keyed by id plus a taxonomy
/// membership index. Stands in for the relational collaborator in tests and
/// examples; every `query` call is counted.
///

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
    queries: AtomicU64,
}

#[derive(Debug, Default)]
struct StoreInner {
    rows: BTreeMap<TermId, Term>,
    taxonomies: TaxonomyIndex,
    next_id: TermId,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl StoreInner {
    // Deduplicate a requested slug within the target taxonomies by
    // suffixing "-2", "-3", ... like the usual CMS slug discipline.
    fn unique_slug(&self, requested: &str, taxonomies: &[String], own_id: TermId) -> String {
        let taken: BTreeSet<&str> = taxonomies
            .iter()
            .filter_map(|taxonomy| self.taxonomies.get(taxonomy))
            .flatten()
            .filter(|id| **id != own_id)
            .filter_map(|id| self.rows.get(id))
            .map(|term| term.slug.as_str())
            .collect();

        if !taken.contains(requested) {
            return requested.to_string();
        }

        let mut suffix = 2u64;
        loop {
            let candidate = format!("{requested}-{suffix}");
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

impl TermStore for MemoryStore {
    fn query(
        &self,
        scopes: &[String],
        constraints: &Constraints,
    ) -> Result<Vec<Term>, InternalError> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        let inner = self.read();
        let mut seen: BTreeSet<TermId> = BTreeSet::new();
        let mut rows: Vec<Term> = Vec::new();

        for scope in scopes {
            let Some(members) = inner.taxonomies.get(scope) else {
                // Unknown scope: contributes nothing, raises nothing.
                continue;
            };

            for id in members {
                if !seen.insert(*id) {
                    continue;
                }
                if let Some(term) = inner.rows.get(id)
                    && constraints.admits(term)
                {
                    rows.push(term.clone());
                }
            }
        }

        constraints.order_rows(&mut rows);
        let rows = constraints.paginate(rows);

        sink::record(MetricsEvent::StorageQuery {
            rows_matched: rows.len() as u64,
        });

        Ok(rows)
    }

    fn insert(&self, mut term: Term, taxonomies: &[String]) -> Result<Term, InternalError> {
        let mut inner = self.write();

        if term.id == 0 {
            term.id = inner.next_id.max(1);
        } else if inner.rows.contains_key(&term.id) {
            return Err(InternalError::store_conflict(format!(
                "term id already exists: {}",
                term.id
            )));
        }

        if term.slug.is_empty() {
            term.slug = slugify(&term.name);
        }
        if term.slug.is_empty() {
            term.slug = format!("term-{}", term.id);
        }
        term.slug = inner.unique_slug(&term.slug, taxonomies, term.id);

        for taxonomy in taxonomies {
            let members = inner.taxonomies.entry(taxonomy.clone()).or_default();
            if !members.contains(&term.id) {
                members.push(term.id);
            }
        }

        inner.next_id = inner.next_id.max(term.id + 1);
        inner.rows.insert(term.id, term.clone());

        Ok(term)
    }

    fn update(&self, term: Term) -> Result<Term, InternalError> {
        let mut inner = self.write();

        if !inner.rows.contains_key(&term.id) {
            return Err(InternalError::store_not_found(term.id));
        }

        inner.rows.insert(term.id, term.clone());
        Ok(term)
    }

    fn delete(&self, id: TermId) -> Result<bool, InternalError> {
        let mut inner = self.write();

        let existed = inner.rows.remove(&id).is_some();
        if existed {
            for members in inner.taxonomies.values_mut() {
                members.retain(|member| *member != id);
            }
        }

        Ok(existed)
    }

    fn num_queries(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

///
/// TESTS
///
