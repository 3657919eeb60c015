//! Where the CLI gets its dialect from.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use panel_dialect::{Dialect, DialectOverlay, default_config, global_default, merge_with_default};
use serde::Serialize;
use tracing::info;

/// The global default, or an overlay file merged onto it.
pub fn load_dialect(path: Option<&Path>) -> Result<Arc<Dialect>> {
    let Some(path) = path else {
        return Ok(global_default());
    };
    let overlay = DialectOverlay::from_path(path)
        .with_context(|| format!("load dialect overlay {}", path.display()))?;
    let dialect = merge_with_default(&default_config(), &overlay);
    info!(
        path = %path.display(),
        org_id = dialect.org_id().unwrap_or("-"),
        fingerprint = %dialect.fingerprint(),
        "dialect overlay merged"
    );
    Ok(Arc::new(dialect))
}

/// What `dialect` prints.
#[derive(Debug, Serialize)]
pub struct DialectDump<'a> {
    pub org_id: Option<&'a str>,
    pub version: &'a str,
    pub fingerprint: String,
    pub config: &'a panel_dialect::DialectConfig,
}

impl<'a> DialectDump<'a> {
    pub fn new(dialect: &'a Dialect) -> Self {
        Self {
            org_id: dialect.org_id(),
            version: &dialect.config().version,
            fingerprint: dialect.fingerprint(),
            config: dialect.config(),
        }
    }
}
