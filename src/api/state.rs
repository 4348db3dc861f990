use std::sync::Arc;

use crate::source::PlayerSource;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub source: Arc<dyn PlayerSource>,
}
