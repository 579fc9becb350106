use strum::{Display, EnumString};

/// Deployment environment, selected by the `APP_ENVIRONMENT` variable.
///
/// Controls which configuration file is read at boot and lets hosts
/// branch on test-specific behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    #[must_use]
    pub const fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }
}
