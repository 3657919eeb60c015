//! The `@override` suffix accepted on any shortcode.
//!
//! `GL-4-10@d6` keeps the base code and carries `depth = 6` on the side. The
//! suffix is either a bare number (its meaning depends on the family) or a
//! run of `{letters}{number}` tokens. Unknown prefixes are kept verbatim in
//! [`Overrides::extra`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::number::{format_mm, parse_mm};

static OVERRIDE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]+)([0-9.]+)").expect("Invalid override token regex"));

/// Numeric overrides parsed from an `@` suffix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    /// `d`: groove depth, hole depth or tape thickness.
    pub depth: Option<f64>,
    /// `w`: groove width.
    pub width: Option<f64>,
    /// `o`: offset.
    pub offset: Option<f64>,
    /// `dia`: hole diameter.
    pub diameter: Option<f64>,
    /// `c`: count.
    pub count: Option<f64>,
    /// `cc`: centre-to-centre distance.
    pub centers: Option<f64>,
    /// A bare number after `@`.
    pub bare: Option<f64>,
    /// Prefixes this version does not know.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        self == &Overrides::default()
    }

    /// Parse the text after `@`. Unparseable fragments are ignored.
    pub fn parse(suffix: &str) -> Self {
        let lowered = suffix.trim().to_lowercase();
        let mut overrides = Overrides::default();
        if lowered.is_empty() {
            return overrides;
        }
        if let Some(value) = parse_mm(&lowered) {
            overrides.bare = Some(value);
            return overrides;
        }
        for caps in OVERRIDE_TOKEN.captures_iter(&lowered) {
            let Some(value) = parse_mm(&caps[2]) else {
                continue;
            };
            let key = &caps[1];
            let slot = match key {
                "d" => &mut overrides.depth,
                "w" => &mut overrides.width,
                "o" => &mut overrides.offset,
                "dia" => &mut overrides.diameter,
                "c" => &mut overrides.count,
                "cc" => &mut overrides.centers,
                other => {
                    overrides.extra.insert(other.to_string(), value);
                    continue;
                }
            };
            *slot = Some(value);
        }
        overrides
    }

    /// The suffix text without the leading `@`, in a fixed key order.
    pub fn to_suffix(&self) -> String {
        if let Some(bare) = self.bare
            && self.is_bare_only()
        {
            return format_mm(bare);
        }
        let mut out = String::new();
        let named = [
            ("d", self.depth),
            ("w", self.width),
            ("o", self.offset),
            ("dia", self.diameter),
            ("c", self.count),
            ("cc", self.centers),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                out.push_str(key);
                out.push_str(&format_mm(value));
            }
        }
        for (key, value) in &self.extra {
            out.push_str(key);
            out.push_str(&format_mm(*value));
        }
        out
    }

    fn is_bare_only(&self) -> bool {
        Overrides {
            bare: None,
            ..self.clone()
        }
        .is_empty()
    }
}

/// Split `CODE@SUFFIX` on the first `@`.
///
/// Returns the trimmed base code and the parsed overrides (empty when the
/// token has no suffix).
pub fn split_overrides(token: &str) -> (&str, Overrides) {
    match token.split_once('@') {
        Some((base, suffix)) => (base.trim(), Overrides::parse(suffix)),
        None => (token.trim(), Overrides::default()),
    }
}

/// Append overrides to a code; an empty set leaves the code unchanged.
pub fn attach_overrides(code: &str, overrides: &Overrides) -> String {
    if overrides.is_empty() {
        return code.to_string();
    }
    format!("{code}@{}", overrides.to_suffix())
}
