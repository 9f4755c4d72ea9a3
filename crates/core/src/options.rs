//! Dependent filtering of the Type and reference-run dropdowns.
//!
//! The Type dropdown narrows to the runtype/reco checkboxes ticked above
//! it; the reference-run dropdown narrows to entries compatible with the
//! selected Type. Both filters always keep the currently selected option
//! visible so it never disappears out from under the user.

use crate::run::{RecoType, ReferenceRunOption, RunType, TypeOption};
use crate::types::OptionId;

// ---------------------------------------------------------------------------
// Type dropdown
// ---------------------------------------------------------------------------

/// Checkbox state driving the Type dropdown filter.
///
/// An empty list means the corresponding group of checkboxes is unticked,
/// which shows everything.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    pub runtypes: Vec<RunType>,
    pub recos: Vec<RecoType>,
}

impl TypeFilter {
    fn admits(&self, option: &TypeOption) -> bool {
        let runtype_ok = self.runtypes.is_empty() || self.runtypes.contains(&option.runtype);
        let reco_ok = self.recos.is_empty() || self.recos.contains(&option.reco);
        runtype_ok && reco_ok
    }
}

/// Ids of the Type options that stay visible under `filter`.
pub fn visible_type_options(
    options: &[TypeOption],
    filter: &TypeFilter,
    selected: Option<OptionId>,
) -> Vec<OptionId> {
    options
        .iter()
        .filter(|option| filter.admits(option) || selected == Some(option.id))
        .map(|option| option.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Reference-run dropdown
// ---------------------------------------------------------------------------

/// Ids of the reference runs offered for the selected Type.
///
/// With `match_type` on, only references whose reco and runtype equal the
/// selected Type's stay visible; with no Type selected yet, or `match_type`
/// off, everything is shown.
pub fn visible_reference_options(
    options: &[ReferenceRunOption],
    selected_type: Option<&TypeOption>,
    match_type: bool,
    selected: Option<OptionId>,
) -> Vec<OptionId> {
    options
        .iter()
        .filter(|option| {
            let compatible = match selected_type {
                Some(t) => option.reco == t.reco && option.runtype == t.runtype,
                None => true,
            };
            compatible || !match_type || selected == Some(option.id)
        })
        .map(|option| option.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
