pub mod champ_select;
pub mod events;
pub mod live_game;

pub use champ_select::{
    ActionKind, BanPickAction, ChampSelectPhase, ChampSelectSession, ChampSelectTimer, PlayerSlot,
    RawChampSelectSession, Side,
};
pub use events::{GamePhase, OverlayStatus, OverlayUpdate};
pub use live_game::{
    AllGameData, GameEvent, GoldSample, ItemSlot, LiveGameState, ObjectiveTimer, ObjectiveTimerSet,
    PlayerStat, RawGameEvent, TeamAggregate,
};
