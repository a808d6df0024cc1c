//! The process-wide resolver.
//!
//! Hosts install it once at startup with their declaration provider; it then lives until the
//! process exits. Nothing is ever invalidated because declaration graphs are immutable.

use std::sync::{Arc, OnceLock};

use genres_config::CacheConfig;
use genres_types::DeclProvider;

use crate::ResolutionCache;

static GLOBAL: OnceLock<ResolutionCache> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum GlobalError {
    #[error("a process-wide resolver is already installed")]
    AlreadyInstalled,
}

/// Install the process-wide resolver. Fails if one is already installed.
pub fn install_global(
    provider: Arc<dyn DeclProvider>,
    config: CacheConfig,
) -> Result<&'static ResolutionCache, GlobalError> {
    let mut installed = false;
    let cache = GLOBAL.get_or_init(|| {
        installed = true;
        ResolutionCache::with_config(provider, config)
    });
    if !installed {
        return Err(GlobalError::AlreadyInstalled);
    }
    tracing::debug!(target: "genres.resolve", config = ?config, "installed process-wide resolver");
    Ok(cache)
}

/// The process-wide resolver, if installed.
pub fn global() -> Option<&'static ResolutionCache> {
    GLOBAL.get()
}
