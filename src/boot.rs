use std::{env, str::FromStr as _};

use config_rs::Config as ConfigRs;
use tracing::{debug, trace};

use crate::{app::App, config::Config, environment::Environment, setup_tracing::setup_tracing};

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

/// Read the environment and configuration, install the tracing
/// subscriber, and return the application state.
///
/// Hosts that need finer control (custom subscribers, test harnesses)
/// can call [`set_environment`] and [`read_config`] directly instead.
#[must_use]
pub fn boot() -> App {
    let environment = set_environment();
    let config = read_config(&environment);

    setup_tracing(&config.tracing.log_level);

    debug!("Environment set to: {:?}", environment);
    trace!("Configuration loaded: {:?}", config);

    App::new(config, environment)
}

#[must_use]
pub fn set_environment() -> Environment {
    env::var(ENVIRONMENT_VARIABLE)
        .ok()
        .and_then(|s| Environment::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn read_config(environment: &Environment) -> Config {
    let config_file_name = format!("config/{environment}");

    trace!("Reading configuration from: {}", config_file_name);

    ConfigRs::builder()
        .add_source(config_rs::File::with_name(&config_file_name))
        .add_source(config_rs::Environment::with_prefix("APP"))
        .build()
        .unwrap()
        .try_deserialize()
        .expect("Failed to deserialize configuration")
}
