//! Override merge: hand-authored corrections applied onto extracted parameters.
//!
//! Overrides are sparse. Only the fields an override specifies replace the
//! extracted values; the parameter list keeps its length and order.

use crate::model::{ParameterOverride, ResolvedParameter};

/// Apply `overrides` onto `base` by parameter name.
///
/// The first override with a matching name wins. Overrides matching no base
/// parameter are ignored here; see [`unmatched`].
pub fn merge(base: &[ResolvedParameter], overrides: &[ParameterOverride]) -> Vec<ResolvedParameter> {
    base.iter()
        .map(|param| match find(overrides, &param.name) {
            Some(o) => apply(param, o),
            None => param.clone(),
        })
        .collect()
}

/// Override names with no counterpart in `base`, in override order.
pub fn unmatched<'a>(base: &[ResolvedParameter], overrides: &'a [ParameterOverride]) -> Vec<&'a str> {
    overrides
        .iter()
        .map(|o| o.name.as_str())
        .filter(|name| !base.iter().any(|p| p.name == *name))
        .collect()
}

fn find<'a>(overrides: &'a [ParameterOverride], name: &str) -> Option<&'a ParameterOverride> {
    overrides.iter().find(|o| o.name == name)
}

fn apply(param: &ResolvedParameter, o: &ParameterOverride) -> ResolvedParameter {
    let mut merged = param.clone();
    if let Some(ref ty) = o.type_text {
        merged.type_text = ty.clone();
    }
    if let Some(ref desc) = o.description {
        merged.description = desc.clone();
    }
    if let Some(required) = o.required() {
        merged.required = required;
    }
    if let Some(ref nested) = o.sub_content {
        // Authored nested list replaces the extracted one, filled from
        // same-named extracted fields
        merged.sub_params = nested
            .iter()
            .map(|n| match param.sub_params.iter().find(|p| p.name == n.name) {
                Some(existing) => apply(existing, n),
                None => from_override(n),
            })
            .collect();
    }
    merged
}

fn from_override(o: &ParameterOverride) -> ResolvedParameter {
    apply(
        &ResolvedParameter {
            name: o.name.clone(),
            ..Default::default()
        },
        o,
    )
}
