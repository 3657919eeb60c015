//! Organization-aware entry point: dialect lookup plus normalization.

use std::sync::Arc;

use panel_dialect::{Dialect, DialectCache, DialectStore, global_default};
use panel_ingest::{RawPart, extract_raw_fields};
use panel_model::{PartServices, ServiceFamily};

use crate::options::NormalizeOptions;
use crate::part::{NormalizedPart, normalize_part, normalize_token};

/// Normalizes parts for many organizations, caching each one's dialect.
///
/// The resolver is `Sync`; share one instance across worker threads.
#[derive(Debug)]
pub struct OrgResolver<S> {
    cache: DialectCache,
    store: S,
    options: NormalizeOptions,
}

impl<S: DialectStore> OrgResolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: DialectCache::new(),
            store,
            options: NormalizeOptions::default(),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: DialectCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// The dialect of an organization; `None` is the global default.
    pub fn dialect(&self, org_id: Option<&str>) -> panel_dialect::Result<Arc<Dialect>> {
        self.cache.get_or_load(org_id, &self.store)
    }

    /// A store failure degrades to the global default rather than failing
    /// the part.
    fn dialect_or_default(&self, org_id: Option<&str>) -> Arc<Dialect> {
        match self.dialect(org_id) {
            Ok(dialect) => dialect,
            Err(error) => {
                tracing::warn!(
                    org_id = org_id.unwrap_or_default(),
                    %error,
                    "falling back to the global default dialect"
                );
                global_default()
            }
        }
    }

    /// Resolve one token of a known family for an organization.
    pub fn resolve_code(
        &self,
        org_id: Option<&str>,
        family: ServiceFamily,
        code: &str,
    ) -> Option<PartServices> {
        let dialect = self.dialect_or_default(org_id);
        normalize_token(family, code, &dialect, &self.options)
    }

    pub fn normalize(&self, org_id: Option<&str>, raw: &RawPart) -> NormalizedPart {
        let dialect = self.dialect_or_default(org_id);
        normalize_part(raw, &dialect, &self.options)
    }

    pub fn normalize_text(&self, org_id: Option<&str>, text: &str) -> NormalizedPart {
        self.normalize(org_id, &extract_raw_fields(text, None))
    }

    /// Forget a cached dialect so the next call reloads it.
    pub fn invalidate(&self, org_id: &str) {
        self.cache.invalidate(org_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::{DialectError, DialectOverlay};
    use panel_model::EdgeSet;

    struct FixedStore;

    impl DialectStore for FixedStore {
        fn fetch(&self, org_id: &str) -> panel_dialect::Result<Option<DialectOverlay>> {
            match org_id {
                "acme" => Ok(Some(DialectOverlay::default().with_edge_alias("FULL", "2L2W"))),
                "down" => Err(DialectError::Store {
                    org_id: org_id.to_string(),
                    message: "timeout".to_string(),
                }),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn organization_alias_applies_only_to_that_organization() {
        let resolver = OrgResolver::new(FixedStore);
        let acme = resolver.resolve_code(Some("acme"), ServiceFamily::EdgeBand, "FULL");
        assert_eq!(acme.unwrap().edgeband.unwrap().edges, EdgeSet::ALL);
        assert!(
            resolver
                .resolve_code(Some("other"), ServiceFamily::EdgeBand, "FULL")
                .is_none()
        );
    }

    #[test]
    fn store_failure_uses_default() {
        let resolver = OrgResolver::new(FixedStore);
        assert!(resolver.dialect(Some("down")).is_err());
        let part = resolver.normalize_text(Some("down"), "2L");
        assert_eq!(part.services.edgeband.unwrap().edges, EdgeSet::LONG);
    }

    #[test]
    fn invalidate_drops_cached_dialect() {
        let resolver = OrgResolver::new(FixedStore);
        let first = resolver.dialect(Some("acme")).unwrap();
        let cached = resolver.dialect(Some("acme")).unwrap();
        assert!(Arc::ptr_eq(&first, &cached));
        resolver.invalidate("acme");
        let reloaded = resolver.dialect(Some("acme")).unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
    }
}
