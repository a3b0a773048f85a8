use std::{fmt, sync::Arc};

use koinonia_config::Config;

use crate::auth::jwt::JwtKeys;
use crate::broadcast::BroadcastRecorder;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub jwt: Arc<JwtKeys>,
    pub recorder: Arc<BroadcastRecorder>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Store) -> Self {
        let jwt = Arc::new(JwtKeys::new(&config.auth));
        let recorder = Arc::new(BroadcastRecorder::new(
            config.broadcast.clone(),
            store.media.clone(),
        ));
        Self {
            config,
            store,
            jwt,
            recorder,
        }
    }
}
