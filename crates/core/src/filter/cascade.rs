//! Category / subcategory / subsubcategory dropdown cascade.
//!
//! Child dropdowns are repopulated from small HTML `<option>` fragments
//! served by the backend. The cascade state machine decides which fetch a
//! selection change requires and keeps the child levels consistent while
//! the response is outstanding.

use crate::error::CoreError;
use crate::types::OptionId;

// ---------------------------------------------------------------------------
// Option fragments
// ---------------------------------------------------------------------------

/// One `<option>` parsed out of a dropdown fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// Placeholder rows carry an empty value.
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Parse an HTML fragment of `<option>` tags into structured options.
///
/// Only the subset of HTML the backend actually emits is understood. A
/// fragment that cannot be scanned cleanly is rejected rather than
/// half-applied to the dropdown.
pub fn parse_option_fragment(html: &str) -> Result<Vec<SelectOption>, CoreError> {
    let mut options = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find("<option") {
        let tag = &rest[start..];
        let open_end = tag
            .find('>')
            .ok_or_else(|| CoreError::Parse("unterminated <option> tag".to_string()))?;
        let attrs = &tag[..open_end];

        let value = match attrs.find("value=\"") {
            Some(at) => {
                let after = &attrs[at + "value=\"".len()..];
                let quote = after.find('"').ok_or_else(|| {
                    CoreError::Parse("unterminated value attribute in <option>".to_string())
                })?;
                after[..quote].to_string()
            }
            None => String::new(),
        };

        let body = &tag[open_end + 1..];
        let close = body
            .find("</option>")
            .ok_or_else(|| CoreError::Parse("missing </option> closing tag".to_string()))?;
        options.push(SelectOption {
            value,
            label: body[..close].trim().to_string(),
        });
        rest = &body[close + "</option>".len()..];
    }

    Ok(options)
}

// ---------------------------------------------------------------------------
// Cascade state
// ---------------------------------------------------------------------------

/// One child dropdown: its options, current selection and visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeLevel {
    pub options: Vec<SelectOption>,
    pub selected: String,
    pub visible: bool,
}

impl CascadeLevel {
    /// Swap in freshly fetched options. The selection resets to the
    /// placeholder and the dropdown is only shown when it has real rows.
    pub fn replace_options(&mut self, options: Vec<SelectOption>) {
        self.visible = options.iter().any(|option| !option.is_placeholder());
        self.options = options;
        self.selected = String::new();
    }

    /// Empty and hide the dropdown.
    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = String::new();
        self.visible = false;
    }
}

/// Fetch a selection change requires before the cascade can settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeFetch {
    Subcategories { category_id: OptionId },
    Subsubcategories { subcategory_id: OptionId },
}

/// The three-level category cascade of the filter panel.
#[derive(Debug, Clone, Default)]
pub struct CategoryCascade {
    pub category: Option<OptionId>,
    pub subcategory: CascadeLevel,
    pub subsubcategory: CascadeLevel,
}

impl CategoryCascade {
    /// Apply a category selection. Both child levels reset; a concrete
    /// selection asks for its subcategories, clearing the selection does
    /// not need a fetch at all.
    pub fn select_category(&mut self, category: Option<OptionId>) -> Option<CascadeFetch> {
        self.category = category;
        self.subcategory.clear();
        self.subsubcategory.clear();
        category.map(|category_id| CascadeFetch::Subcategories { category_id })
    }

    /// Apply a subcategory selection, resetting the subsubcategory level.
    pub fn select_subcategory(&mut self, subcategory: Option<OptionId>) -> Option<CascadeFetch> {
        self.subcategory.selected = subcategory
            .map(|id| id.to_string())
            .unwrap_or_default();
        self.subsubcategory.clear();
        subcategory.map(|subcategory_id| CascadeFetch::Subsubcategories { subcategory_id })
    }

    /// Install the fetched subcategory options.
    pub fn apply_subcategories(&mut self, options: Vec<SelectOption>) {
        self.subcategory.replace_options(options);
    }

    /// Install the fetched subsubcategory options.
    pub fn apply_subsubcategories(&mut self, options: Vec<SelectOption>) {
        self.subsubcategory.replace_options(options);
    }

    /// Clear the whole cascade back to its initial hidden state.
    pub fn clear(&mut self) {
        self.category = None;
        self.subcategory.clear();
        self.subsubcategory.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
