//! Application-wide constants.
//!
//! Names shared between the generator and the host application: output file,
//! profile name, and the host-side variables the generated rules read and write.

/// The display name of the application.
pub const APP_NAME: &str = "hyperkey";

/// File name the host application loads its configuration from.
pub const OUTPUT_FILE_NAME: &str = "karabiner.json";

/// Name of the single profile written into the document.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Host variable held at 1 while the hyper key is down.
pub const HYPER_VARIABLE: &str = "hyper";

/// Host variable backing the shift-lock toggle.
pub const SHIFT_LOCK_VARIABLE: &str = "shiftlock";
