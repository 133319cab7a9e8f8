use std::sync::Arc;

use astrologer_core::Archive;

#[derive(Clone)]
pub struct AppState {
    archive: Arc<dyn Archive>,
}

impl AppState {
    pub fn new(archive: Arc<dyn Archive>) -> Self {
        Self { archive }
    }

    pub fn archive(&self) -> &dyn Archive {
        self.archive.as_ref()
    }
}
