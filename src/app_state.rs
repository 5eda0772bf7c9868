use crate::store::Store;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn init(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
