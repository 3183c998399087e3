pub mod batch;
pub mod conflicts;
pub mod game_dir;
pub mod lifecycle;
pub mod ordering;
pub mod preview;
pub mod registry;
pub mod repository;
pub mod shelf;
pub mod shelf_service;
pub mod thumbnail;
