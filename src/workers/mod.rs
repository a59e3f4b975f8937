pub mod lcu;
pub mod live_game;

pub use lcu::LcuWorker;
pub use live_game::LiveGameWorker;
