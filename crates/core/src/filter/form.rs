//! Query-string assembly for the list filter form.
//!
//! The filter form submits as a plain GET form, so everything that should
//! stay out of the query string has to be disabled before submission. The
//! six date dropdowns are collapsed into two hidden ISO-ish fields first,
//! and an "ignore other filters" checkbox can narrow the submission to a
//! single filter group.

// ---------------------------------------------------------------------------
// Form model
// ---------------------------------------------------------------------------

/// A named form control with its current value and disabled state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub disabled: bool,
}

/// Ordered set of filter controls as they sit in the page form, plus the
/// state of the "ignore other filters" checkboxes next to them.
#[derive(Debug, Clone, Default)]
pub struct QueryForm {
    fields: Vec<FormField>,
    ignore_group: Option<String>,
}

impl QueryForm {
    /// Append a control to the form.
    pub fn push(&mut self, name: &str, value: &str) {
        self.fields.push(FormField {
            name: name.to_string(),
            value: value.to_string(),
            disabled: false,
        });
    }

    /// Current value of the first control with this name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Overwrite the value of an existing control. Returns false when no
    /// control of that name exists.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Whether the control is currently disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .is_some_and(|field| field.disabled)
    }

    fn upsert(&mut self, name: &str, value: &str) {
        if !self.set_value(name, value) {
            self.push(name, value);
        }
    }

    // -----------------------------------------------------------------------
    // Ignore-other-filters checkboxes
    // -----------------------------------------------------------------------

    /// Check the "ignore other filters" box of one group. Only one box can
    /// be checked at a time, so this unchecks any previously checked box.
    pub fn check_ignore_box(&mut self, group: &str) {
        self.ignore_group = Some(group.to_string());
    }

    /// Uncheck every "ignore other filters" box.
    pub fn uncheck_all_ignore_boxes(&mut self) {
        self.ignore_group = None;
    }

    /// The group whose ignore box is currently checked.
    pub fn ignore_group(&self) -> Option<&str> {
        self.ignore_group.as_deref()
    }

    // -----------------------------------------------------------------------
    // Submission passes
    // -----------------------------------------------------------------------

    /// Collapse the `date__gte_*`/`date__lte_*` dropdown triples into hidden
    /// `date__gte`/`date__lte` fields and disable the dropdowns.
    ///
    /// The hidden value keeps the unpadded `YYYY-M-D` join of the raw
    /// dropdown values, and is only produced while the day dropdown has an
    /// actual selection. Calling this twice leaves the form unchanged.
    pub fn simplify_date_filter_parameters(&mut self) {
        self.collapse_date_triple("date__gte");
        self.collapse_date_triple("date__lte");
        for field in &mut self.fields {
            if field.name.starts_with("date__gte_") || field.name.starts_with("date__lte_") {
                field.disabled = true;
            }
        }
    }

    fn collapse_date_triple(&mut self, prefix: &str) {
        let day = self.value(&format!("{prefix}_day")).unwrap_or("").to_string();
        let month = self.value(&format!("{prefix}_month")).unwrap_or("").to_string();
        let year = self.value(&format!("{prefix}_year")).unwrap_or("").to_string();

        if !day.is_empty() && day != "0" {
            let value = format!("{year}-{month}-{day}");
            self.upsert(prefix, &value);
        }
    }

    /// Blank every control whose name does not contain `group`, limiting
    /// the query to one logical filter group.
    pub fn keep_only_group(&mut self, group: &str) {
        for field in &mut self.fields {
            if !field.name.contains(group) {
                field.value.clear();
            }
        }
    }

    /// Disable every control whose value is empty or the `0` placeholder,
    /// so it is omitted from the query string.
    pub fn disable_empty_fields(&mut self) {
        for field in &mut self.fields {
            if field.value.is_empty() || field.value == "0" {
                field.disabled = true;
            }
        }
    }

    /// Run the full pre-submission pipeline: collapse the date dropdowns,
    /// narrow to the checked "ignore other filters" group when a box is
    /// checked, then drop everything empty.
    ///
    /// The checked box survives submission; only
    /// [`uncheck_all_ignore_boxes`](Self::uncheck_all_ignore_boxes) resets
    /// it.
    pub fn prepare_submission(&mut self) {
        self.simplify_date_filter_parameters();
        if let Some(group) = self.ignore_group.clone() {
            self.keep_only_group(&group);
        }
        self.disable_empty_fields();
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Enabled (name, value) pairs in form order, the way the browser would
    /// serialize the form.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|field| !field.disabled)
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect()
    }

    /// The serialized query string.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
