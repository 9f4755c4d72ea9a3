//! Certification run domain types.
//!
//! Choice enums with their exact stored strings, structured rows for the
//! Type and reference-run dropdowns, and the immutable form snapshot that
//! the validation functions consume.

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistFlags;
use crate::error::CoreError;
use crate::luminosity::LumiUnit;
use crate::types::{OptionId, RunNumber};

// ---------------------------------------------------------------------------
// Component status
// ---------------------------------------------------------------------------

/// Certification verdict of one detector component (pixel, SiStrip,
/// tracking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentStatus {
    Good,
    Bad,
    Lowstat,
    Excluded,
}

/// All valid component status strings.
const VALID_COMPONENT_STATUSES: &[&str] = &["Good", "Bad", "Lowstat", "Excluded"];

impl ComponentStatus {
    /// Return the status as the stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::Lowstat => "Lowstat",
            Self::Excluded => "Excluded",
        }
    }

    /// Parse a status from its stored string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Good" => Ok(Self::Good),
            "Bad" => Ok(Self::Bad),
            "Lowstat" => Ok(Self::Lowstat),
            "Excluded" => Ok(Self::Excluded),
            _ => Err(CoreError::Validation(format!(
                "Invalid component status '{s}'. Must be one of: {}",
                VALID_COMPONENT_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether this status counts towards a good certification.
    ///
    /// `Lowstat` carries too little data to complain about, so it is grouped
    /// with `Good`.
    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good | Self::Lowstat)
    }

    /// Whether this status counts towards a bad certification.
    pub fn is_bad(&self) -> bool {
        matches!(self, Self::Bad | Self::Excluded)
    }

    /// CSS class the run table attaches to a cell with this status.
    pub fn table_css_class(&self) -> &'static str {
        if self.is_good() {
            "good-component"
        } else {
            "bad-component"
        }
    }
}

// ---------------------------------------------------------------------------
// Reconstruction pass
// ---------------------------------------------------------------------------

/// Reconstruction pass a run was certified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoType {
    Express,
    Prompt,
    #[serde(rename = "reReco")]
    ReReco,
}

/// All valid reconstruction pass strings.
const VALID_RECO_TYPES: &[&str] = &["Express", "Prompt", "reReco"];

impl RecoType {
    /// Return the pass as the stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Express => "Express",
            Self::Prompt => "Prompt",
            Self::ReReco => "reReco",
        }
    }

    /// Parse a pass from its stored string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Express" => Ok(Self::Express),
            "Prompt" => Ok(Self::Prompt),
            "reReco" => Ok(Self::ReReco),
            _ => Err(CoreError::Validation(format!(
                "Invalid reco type '{s}'. Must be one of: {}",
                VALID_RECO_TYPES.join(", ")
            ))),
        }
    }

    /// The complementary pass this one is cross-checked against.
    ///
    /// Express and Prompt check each other; reReco runs have no counterpart
    /// and are never cross-checked.
    pub fn counterpart(&self) -> Option<RecoType> {
        match self {
            Self::Express => Some(Self::Prompt),
            Self::Prompt => Some(Self::Express),
            Self::ReReco => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Remaining run choices
// ---------------------------------------------------------------------------

/// Kind of data-taking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunType {
    Cosmics,
    Collisions,
}

impl RunType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosmics => "Cosmics",
            Self::Collisions => "Collisions",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Cosmics" => Ok(Self::Cosmics),
            "Collisions" => Ok(Self::Collisions),
            _ => Err(CoreError::Validation(format!(
                "Invalid runtype '{s}'. Must be one of: Cosmics, Collisions"
            ))),
        }
    }
}

/// Magnet field setting during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bfield {
    #[serde(rename = "0 T")]
    Zero,
    #[serde(rename = "3.8 T")]
    Nominal,
}

impl Bfield {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0 T",
            Self::Nominal => "3.8 T",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "0 T" => Ok(Self::Zero),
            "3.8 T" => Ok(Self::Nominal),
            _ => Err(CoreError::Validation(format!(
                "Invalid bfield '{s}'. Must be one of: 0 T, 3.8 T"
            ))),
        }
    }
}

/// Particle configuration of the beams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamType {
    #[serde(rename = "Proton-Proton")]
    ProtonProton,
    #[serde(rename = "HeavyIon-Proton")]
    HeavyIonProton,
    #[serde(rename = "HeavyIon-HeavyIon")]
    HeavyIonHeavyIon,
}

impl BeamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProtonProton => "Proton-Proton",
            Self::HeavyIonProton => "HeavyIon-Proton",
            Self::HeavyIonHeavyIon => "HeavyIon-HeavyIon",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Proton-Proton" => Ok(Self::ProtonProton),
            "HeavyIon-Proton" => Ok(Self::HeavyIonProton),
            "HeavyIon-HeavyIon" => Ok(Self::HeavyIonHeavyIon),
            _ => Err(CoreError::Validation(format!(
                "Invalid beamtype '{s}'. Must be one of: Proton-Proton, \
                 HeavyIon-Proton, HeavyIon-HeavyIon"
            ))),
        }
    }
}

/// Centre-of-mass energy of the beams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamEnergy {
    #[serde(rename = "5 TeV")]
    Tev5,
    #[serde(rename = "13 TeV")]
    Tev13,
}

impl BeamEnergy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tev5 => "5 TeV",
            Self::Tev13 => "13 TeV",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "5 TeV" => Ok(Self::Tev5),
            "13 TeV" => Ok(Self::Tev13),
            _ => Err(CoreError::Validation(format!(
                "Invalid beamenergy '{s}'. Must be one of: 5 TeV, 13 TeV"
            ))),
        }
    }
}

/// Whether a tracker map was produced for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerMap {
    Exists,
    Missing,
}

impl TrackerMap {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "Exists",
            Self::Missing => "Missing",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Exists" => Ok(Self::Exists),
            "Missing" => Ok(Self::Missing),
            _ => Err(CoreError::Validation(format!(
                "Invalid trackermap '{s}'. Must be one of: Exists, Missing"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Dropdown option rows
// ---------------------------------------------------------------------------

/// One row of the Type dropdown as structured data.
///
/// The page used to recover these fields by splitting the option label on
/// spaces at fixed positions; carrying them explicitly removes that coupling
/// to the label format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOption {
    pub id: OptionId,
    pub reco: RecoType,
    pub runtype: RunType,
    pub bfield: Bfield,
    pub beamtype: BeamType,
    pub beamenergy: BeamEnergy,
    pub dataset: String,
}

impl TypeOption {
    /// Dropdown label in the stored-record format, e.g.
    /// `Express Collisions 3.8 T Proton-Proton 13 TeV /Express/Run2018/DQMIO`.
    pub fn label(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.reco.as_str(),
            self.runtype.as_str(),
            self.bfield.as_str(),
            self.beamtype.as_str(),
            self.beamenergy.as_str(),
            self.dataset
        )
    }
}

/// One row of the reference-run dropdown as structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRunOption {
    pub id: OptionId,
    pub reference_run: RunNumber,
    pub reco: RecoType,
    pub runtype: RunType,
    pub bfield: Bfield,
    pub beamtype: BeamType,
    pub beamenergy: BeamEnergy,
    pub dataset: String,
}

impl ReferenceRunOption {
    /// Dropdown label, the run number followed by the type description.
    pub fn label(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.reference_run,
            self.reco.as_str(),
            self.runtype.as_str(),
            self.bfield.as_str(),
            self.beamtype.as_str(),
            self.beamenergy.as_str(),
            self.dataset
        )
    }
}

// ---------------------------------------------------------------------------
// Form snapshot
// ---------------------------------------------------------------------------

/// Immutable snapshot of the certification entry form.
///
/// Field names follow the submitted form fields one-for-one. `None` means
/// the field is still empty; validation skips checks whose inputs are not
/// filled in yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_number: Option<RunNumber>,
    pub run_type: Option<TypeOption>,
    pub reference_run: Option<ReferenceRunOption>,
    pub trackermap: Option<TrackerMap>,
    pub number_of_ls: Option<u32>,
    pub int_luminosity: Option<f64>,
    pub lumi_unit: LumiUnit,
    pub pixel: Option<ComponentStatus>,
    pub pixel_lowstat: bool,
    pub sistrip: Option<ComponentStatus>,
    pub sistrip_lowstat: bool,
    pub tracking: Option<ComponentStatus>,
    pub tracking_lowstat: bool,
    pub comment: String,
    pub date: Option<chrono::NaiveDate>,
    pub checklists: ChecklistFlags,
}

impl RunSnapshot {
    /// Runtype of the selected Type, if one is selected.
    pub fn runtype(&self) -> Option<RunType> {
        self.run_type.as_ref().map(|t| t.runtype)
    }

    /// Reconstruction pass of the selected Type, if one is selected.
    pub fn reco(&self) -> Option<RecoType> {
        self.run_type.as_ref().map(|t| t.reco)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
