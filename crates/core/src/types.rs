/// Row identifier of a selectable option (Type, reference run, category).
pub type OptionId = i64;

/// Six-digit identifier of a recorded data-taking session.
pub type RunNumber = u32;
