//! The ordered strategy chain shared by the four families.
//!
//! For one token: alias, dialect preset, codec decode, built-in preset,
//! pattern rules, natural-language heuristics. The first strategy that
//! produces a result wins and later ones are not consulted. Overrides are
//! split off first and applied to whatever the chain produced.

use panel_codec::{Overrides, split_overrides};
use panel_dialect::{Dialect, RuleOutput};
use panel_ingest::is_blank_marker;
use panel_model::ServiceFamily;

use crate::options::NormalizeOptions;
use crate::trace::{Recorder, Strategy};

/// Family-specific steps of the chain.
///
/// Every step returns `None` rather than an empty result, so "no result"
/// and "nothing to do" never get confused.
pub(crate) trait FamilyResolver {
    type Output;

    const FAMILY: ServiceFamily;

    /// A named preset of the dialect.
    fn preset(&self, name: &str) -> Option<Self::Output>;

    /// A canonical code typed directly.
    fn decode(&self, code: &str) -> Option<Self::Output>;

    /// A system-wide shortcut that needs no dialect.
    fn builtin(&self, name: &str) -> Option<Self::Output>;

    /// Natural-language fallback.
    fn heuristic(&self, text: &str) -> Option<Self::Output>;

    fn apply_overrides(&self, output: Self::Output, overrides: &Overrides) -> Self::Output;
}

/// Resolve a reference (an alias target, a rule output, a default) that
/// must name a preset or a code. References never chain into aliases.
fn resolve_reference<R: FamilyResolver>(resolver: &R, reference: &str) -> Option<R::Output> {
    let (base, overrides) = split_overrides(reference);
    let output = resolver
        .preset(base)
        .or_else(|| resolver.decode(base))
        .or_else(|| resolver.builtin(base))?;
    Some(with_overrides(resolver, output, &overrides))
}

fn with_overrides<R: FamilyResolver>(
    resolver: &R,
    output: R::Output,
    overrides: &Overrides,
) -> R::Output {
    if overrides.is_empty() {
        output
    } else {
        resolver.apply_overrides(output, overrides)
    }
}

fn resolve_rules<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    text: &str,
) -> Option<(R::Output, Strategy)> {
    for rule in dialect.rules(R::FAMILY) {
        let Some(output) = rule.apply(text) else {
            continue;
        };
        let resolved = match &output {
            RuleOutput::Code(code) => resolve_reference(resolver, code),
            RuleOutput::Preset(name) => resolver.preset(name).or_else(|| resolver.builtin(name)),
        };
        match resolved {
            Some(resolved) => {
                return Some((
                    resolved,
                    Strategy::Rule {
                        id: rule.id().to_string(),
                    },
                ));
            }
            None => {
                // A rule whose output does not resolve counts as no match.
                tracing::debug!(
                    family = %R::FAMILY,
                    rule_id = rule.id(),
                    ?output,
                    "pattern rule output did not resolve"
                );
            }
        }
    }
    None
}

/// Run the chain for one token.
pub(crate) fn resolve_token<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    options: &NormalizeOptions,
    token: &str,
) -> Option<(R::Output, Strategy)> {
    let (base, overrides) = split_overrides(token.trim());
    if base.is_empty() {
        return None;
    }

    let resolved = resolve_alias(resolver, dialect, base)
        .or_else(|| resolver.preset(base).map(|output| (output, Strategy::Preset)))
        .or_else(|| resolver.decode(base).map(|output| (output, Strategy::Codec)))
        .or_else(|| resolver.builtin(base).map(|output| (output, Strategy::Builtin)))
        .or_else(|| resolve_rules(resolver, dialect, base))
        .or_else(|| {
            if options.natural_language {
                resolver
                    .heuristic(base)
                    .map(|output| (output, Strategy::Heuristic))
            } else {
                None
            }
        })?;

    let (output, strategy) = resolved;
    Some((with_overrides(resolver, output, &overrides), strategy))
}

fn resolve_alias<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    base: &str,
) -> Option<(R::Output, Strategy)> {
    let target = dialect.alias(R::FAMILY, base)?;
    match resolve_reference(resolver, target) {
        Some(output) => Some((output, Strategy::Alias)),
        None => {
            tracing::warn!(
                family = %R::FAMILY,
                alias = base,
                target,
                "alias target is neither a preset nor a code"
            );
            None
        }
    }
}

/// Resolve a configured reference (default-if-blank value) through the
/// same chain, aliases included.
pub(crate) fn resolve_configured<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    reference: &str,
) -> Option<R::Output> {
    let (base, overrides) = split_overrides(reference);
    let output = resolve_alias(resolver, dialect, base)
        .map(|(output, _)| output)
        .or_else(|| resolve_reference(resolver, base))?;
    Some(with_overrides(resolver, output, &overrides))
}

/// Run one input through the chain and record the outcome.
pub(crate) fn resolve_input<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    options: &NormalizeOptions,
    input: &str,
    recorder: &mut Recorder,
    sink: &mut impl FnMut(R::Output),
) -> bool {
    match resolve_token(resolver, dialect, options, input) {
        Some((output, strategy)) => {
            recorder.hit(R::FAMILY, input, strategy);
            sink(output);
            true
        }
        None => {
            recorder.miss(R::FAMILY, input);
            false
        }
    }
}

/// Run every free-text token of a family through the chain.
///
/// Whitespace tokens and explicit "nothing" markers are skipped.
pub(crate) fn resolve_tokens<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    options: &NormalizeOptions,
    tokens: &[String],
    recorder: &mut Recorder,
    sink: &mut impl FnMut(R::Output),
) {
    for token in tokens {
        let token = token.trim();
        if token.is_empty() || is_blank_marker(token) {
            continue;
        }
        resolve_input(resolver, dialect, options, token, recorder, sink);
    }
}

/// Apply the family's default-if-blank code.
pub(crate) fn apply_default_if_blank<R: FamilyResolver>(
    resolver: &R,
    dialect: &Dialect,
    recorder: &mut Recorder,
    sink: &mut impl FnMut(R::Output),
) {
    let Some(reference) = dialect.default_if_blank(R::FAMILY) else {
        return;
    };
    match resolve_configured(resolver, dialect, reference) {
        Some(output) => {
            recorder.hit(R::FAMILY, reference, Strategy::DefaultIfBlank);
            sink(output);
        }
        None => {
            tracing::warn!(
                family = %R::FAMILY,
                reference,
                "default-if-blank value does not resolve"
            );
        }
    }
}
