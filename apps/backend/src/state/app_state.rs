use crate::config::GameConfig;
use crate::services::rooms::RoomService;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Room operations over the shared room store
    pub rooms: RoomService,
}

impl AppState {
    pub fn new(rooms: RoomService) -> Self {
        Self { rooms }
    }

    /// In-memory rooms with the given game settings
    pub fn in_memory(config: GameConfig) -> Self {
        Self::new(RoomService::in_memory(config))
    }
}
