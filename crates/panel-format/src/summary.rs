//! Compact one-line summary for tables and tooltips.

use panel_model::{PartServices, ServiceFamily};

use crate::join_or_none;
use crate::shortcode::{CodeDefaults, shortcodes};

/// `EB:2L2W | G:GL-4-10 | H:H2-100 | CNC:-`
///
/// Every family is always present; codes within a family are comma-joined.
pub fn summarize(services: &PartServices, defaults: &CodeDefaults) -> String {
    let codes = shortcodes(services, defaults);
    let fields = [
        (ServiceFamily::EdgeBand, codes.edgeband),
        (ServiceFamily::Groove, join_or_none(&codes.grooves, ",")),
        (ServiceFamily::Drilling, join_or_none(&codes.holes, ",")),
        (ServiceFamily::Cnc, join_or_none(&codes.cnc, ",")),
    ];
    fields
        .iter()
        .map(|(family, value)| format!("{}:{value}", family.short_label()))
        .collect::<Vec<_>>()
        .join(" | ")
}
