//! Gated certification checklists.
//!
//! Ticking a checklist summary box on the entry form is intercepted: the
//! modal holding the individual checklist items opens instead, and only
//! confirming the modal with every item ticked sets the summary flag.
//! Confirming never submits the form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Checklist kinds
// ---------------------------------------------------------------------------

/// The five checklists a shifter works through per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    General,
    TrackerMap,
    Pixel,
    SiStrip,
    Tracking,
}

/// All checklist identifiers.
pub const ALL_CHECKLISTS: &[ChecklistKind] = &[
    ChecklistKind::General,
    ChecklistKind::TrackerMap,
    ChecklistKind::Pixel,
    ChecklistKind::SiStrip,
    ChecklistKind::Tracking,
];

impl ChecklistKind {
    /// Return the checklist identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::TrackerMap => "trackermap",
            Self::Pixel => "pixel",
            Self::SiStrip => "sistrip",
            Self::Tracking => "tracking",
        }
    }

    /// Parse a checklist identifier.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "general" => Ok(Self::General),
            "trackermap" => Ok(Self::TrackerMap),
            "pixel" => Ok(Self::Pixel),
            "sistrip" => Ok(Self::SiStrip),
            "tracking" => Ok(Self::Tracking),
            _ => Err(CoreError::Validation(format!(
                "Invalid checklist '{s}'. Must be one of: general, \
                 trackermap, pixel, sistrip, tracking"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary flags
// ---------------------------------------------------------------------------

/// Summary completion flags, one per checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistFlags {
    pub general: bool,
    pub trackermap: bool,
    pub pixel: bool,
    pub sistrip: bool,
    pub tracking: bool,
}

impl ChecklistFlags {
    /// Whether the given checklist has been confirmed.
    pub fn get(&self, kind: ChecklistKind) -> bool {
        match kind {
            ChecklistKind::General => self.general,
            ChecklistKind::TrackerMap => self.trackermap,
            ChecklistKind::Pixel => self.pixel,
            ChecklistKind::SiStrip => self.sistrip,
            ChecklistKind::Tracking => self.tracking,
        }
    }

    /// Record a confirmed checklist.
    pub fn record(&mut self, kind: ChecklistKind) {
        match kind {
            ChecklistKind::General => self.general = true,
            ChecklistKind::TrackerMap => self.trackermap = true,
            ChecklistKind::Pixel => self.pixel = true,
            ChecklistKind::SiStrip => self.sistrip = true,
            ChecklistKind::Tracking => self.tracking = true,
        }
    }

    /// True when every checklist has been confirmed.
    pub fn all_confirmed(&self) -> bool {
        ALL_CHECKLISTS.iter().all(|kind| self.get(*kind))
    }

    /// Checklists still waiting for confirmation.
    pub fn unconfirmed(&self) -> Vec<ChecklistKind> {
        ALL_CHECKLISTS
            .iter()
            .copied()
            .filter(|kind| !self.get(*kind))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Modal gate
// ---------------------------------------------------------------------------

/// Side effect the page adapter must perform after a checklist event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistEffect {
    /// Open the modal holding the checklist items.
    OpenModal(ChecklistKind),
    /// Close the modal without submitting anything.
    CloseModal(ChecklistKind),
}

/// Intercepting state machine for one checklist summary checkbox.
#[derive(Debug, Clone)]
pub struct ChecklistGate {
    kind: ChecklistKind,
    items: Vec<bool>,
    open: bool,
    confirmed: bool,
}

impl ChecklistGate {
    /// Gate for a checklist with `item_count` individual items.
    pub fn new(kind: ChecklistKind, item_count: usize) -> Self {
        Self {
            kind,
            items: vec![false; item_count],
            open: false,
            confirmed: false,
        }
    }

    pub fn kind(&self) -> ChecklistKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// The user clicked the summary checkbox. The tick is suppressed and
    /// the modal opens instead.
    pub fn request_summary_tick(&mut self) -> ChecklistEffect {
        self.open = true;
        ChecklistEffect::OpenModal(self.kind)
    }

    /// Tick or untick one checklist item.
    pub fn set_item(&mut self, index: usize, ticked: bool) -> Result<(), CoreError> {
        let item = self.items.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!(
                "Checklist '{}' has no item {index}",
                self.kind.as_str()
            ))
        })?;
        *item = ticked;
        Ok(())
    }

    /// Tick every item of this checklist at once.
    pub fn check_all(&mut self) {
        for item in &mut self.items {
            *item = true;
        }
    }

    /// Whether every individual item is ticked.
    pub fn all_items_ticked(&self) -> bool {
        self.items.iter().all(|ticked| *ticked)
    }

    /// Confirm the modal, setting the summary flag.
    ///
    /// Fails while any item is unticked; the modal stays open and the flag
    /// stays unset.
    pub fn confirm(&mut self) -> Result<ChecklistEffect, CoreError> {
        if !self.all_items_ticked() {
            return Err(CoreError::Validation(format!(
                "Checklist '{}' still has unticked items",
                self.kind.as_str()
            )));
        }
        self.confirmed = true;
        self.open = false;
        Ok(ChecklistEffect::CloseModal(self.kind))
    }

    /// Dismiss the modal; the summary flag stays unset.
    pub fn dismiss(&mut self) {
        self.open = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
