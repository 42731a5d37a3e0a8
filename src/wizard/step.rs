use std::fmt;

use serde::{Deserialize, Serialize};

/// The screen currently in front of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Splash,
    Calendar,
    Details,
    Review,
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Splash => "splash",
            WizardStep::Calendar => "calendar",
            WizardStep::Details => "details",
            WizardStep::Review => "review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
