//! Handle to the global logger installed by [`init_global`](crate::init_global).

use std::{fmt, sync::Arc};

use iroha_config::parameters::logger::{into_tracing_level, Level};
use tracing_subscriber::{filter::LevelFilter, reload};

type Reload = dyn Fn(LevelFilter) -> Result<(), reload::Error> + Send + Sync;

/// Interacts with the installed global logger.
#[derive(Clone)]
pub struct LoggerHandle {
    reload: Arc<Reload>,
}

impl LoggerHandle {
    pub(crate) fn new<S>(handle: reload::Handle<LevelFilter, S>) -> Self
    where
        S: 'static,
    {
        Self {
            reload: Arc::new(move |filter| handle.reload(filter)),
        }
    }

    /// Reload the log level filter.
    ///
    /// # Errors
    /// If the subscriber the filter belongs to was dropped.
    pub fn reload_level(&self, new_value: Level) -> Result<(), reload::Error> {
        (self.reload)(LevelFilter::from_level(into_tracing_level(new_value)))
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle").finish_non_exhaustive()
    }
}
