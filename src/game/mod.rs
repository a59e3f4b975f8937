pub mod champ_select;
pub mod event_feed;
pub mod gold;
pub mod normalize;
pub mod objectives;
pub mod session;

pub use session::{GameSession, LiveUpdate};
