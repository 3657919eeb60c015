use panel_model::ServiceFamily;
use sha2::{Digest, Sha256};

use crate::config::{ColumnKey, DialectConfig, Vocabulary};
use crate::rules::{CompiledRule, compile_rules};

/// Normalize a lookup key: trimmed, upper case, inner whitespace collapsed.
pub fn lookup_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// A resolved, ready-to-use dialect.
///
/// Holds the merged configuration plus the per-family rule lists, compiled and
/// sorted once at construction. Immutable after construction; share it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dialect {
    org_id: Option<String>,
    config: DialectConfig,
    rules: [Vec<CompiledRule>; 4],
}

fn family_index(family: ServiceFamily) -> usize {
    match family {
        ServiceFamily::EdgeBand => 0,
        ServiceFamily::Groove => 1,
        ServiceFamily::Drilling => 2,
        ServiceFamily::Cnc => 3,
    }
}

impl Dialect {
    pub fn new(org_id: Option<String>, config: DialectConfig) -> Self {
        let rules =
            ServiceFamily::ALL.map(|family| compile_rules(&config.vocabulary(family).rules));
        Self {
            org_id,
            config,
            rules,
        }
    }

    /// Organization this dialect belongs to; `None` for the global default.
    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    pub fn vocabulary(&self, family: ServiceFamily) -> &Vocabulary {
        self.config.vocabulary(family)
    }

    /// Enabled rules of a family, highest priority first.
    pub fn rules(&self, family: ServiceFamily) -> &[CompiledRule] {
        &self.rules[family_index(family)]
    }

    /// Case-insensitive alias lookup.
    pub fn alias(&self, family: ServiceFamily, token: &str) -> Option<&str> {
        self.vocabulary(family)
            .aliases
            .get(&lookup_key(token))
            .map(String::as_str)
    }

    pub fn is_yes(&self, family: ServiceFamily, value: &str) -> bool {
        let key = lookup_key(value);
        self.vocabulary(family)
            .yes_values
            .iter()
            .any(|yes| lookup_key(yes) == key)
    }

    pub fn is_no(&self, family: ServiceFamily, value: &str) -> bool {
        let key = lookup_key(value);
        self.vocabulary(family)
            .no_values
            .iter()
            .any(|no| lookup_key(no) == key)
    }

    /// Canonical column for a source header.
    pub fn column_key(&self, family: ServiceFamily, header: &str) -> Option<ColumnKey> {
        self.vocabulary(family)
            .columns
            .get(&lookup_key(header))
            .copied()
    }

    pub fn default_if_blank(&self, family: ServiceFamily) -> Option<&str> {
        self.vocabulary(family)
            .default_if_blank
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }

    /// SHA-256 of the canonical JSON form of the configuration.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(&self.config).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{default_config, global_default};

    #[test]
    fn lookups_are_case_and_space_insensitive() {
        let dialect = global_default();
        assert_eq!(dialect.alias(ServiceFamily::EdgeBand, " all "), Some("2L2W"));
        assert_eq!(dialect.alias(ServiceFamily::EdgeBand, "all   round"), Some("2L2W"));
        assert!(dialect.is_yes(ServiceFamily::EdgeBand, "x"));
        assert!(dialect.is_no(ServiceFamily::Groove, "no"));
        assert!(!dialect.is_no(ServiceFamily::Groove, ""));
        assert_eq!(
            dialect.column_key(ServiceFamily::EdgeBand, "edge tape"),
            Some(ColumnKey::Tape)
        );
    }

    #[test]
    fn fingerprint_is_stable() {
        let a = Dialect::new(None, default_config());
        let b = Dialect::new(Some("acme".to_string()), default_config());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
