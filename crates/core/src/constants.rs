//! Constants used throughout the engine.
//!
//! Answer literals and clinical thresholds live here so the rule tables read the same way
//! as the published protocol.

use crate::config::Locale;

/// Answer literal for an affirmative binary questionnaire item.
pub const YES: &str = "yes";

/// Answer literal for a negative binary questionnaire item.
pub const NO: &str = "no";

/// SQ3 option: no pain in the last 30 days.
pub const NO_PAIN: &str = "no_pain";

/// SQ3 option: pain comes and goes.
pub const INTERMITTENT: &str = "intermittent";

/// SQ3 option: pain always present.
pub const CONTINUOUS: &str = "continuous";

/// Maximum assisted opening (including vertical incisal overlap) below which opening counts
/// as limited, in millimetres.
pub const LIMITED_OPENING_THRESHOLD_MM: u32 = 40;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// Environment variable selecting the locale for clinical context text.
pub const LOCALE_ENV_VAR: &str = "TMD_LOCALE";
