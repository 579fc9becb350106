use axum::extract::FromRef;

use crate::{config::Config, environment::Environment};

/// Shared application state cloned into the router.
///
/// Unlike a full application framework there is no database, mailer or
/// job queue here; hosts compose their own state around this one and
/// extract the pieces they need via [`FromRef`].
#[derive(Clone, Debug)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
}

impl App {
    #[must_use]
    pub const fn new(config: Config, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }
}

impl FromRef<App> for Config {
    fn from_ref(app: &App) -> Self {
        app.config.clone()
    }
}
