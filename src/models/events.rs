use serde::Serialize;

use crate::api::lcu::LcuCredentials;
use crate::models::{ChampSelectSession, GameEvent, LiveGameState};

/// Coarse match lifecycle phase derived from the LCU gameflow phase
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Idle,
    ChampSelect,
    InGame,
    PostGame,
}

impl GamePhase {
    /// Map a raw gameflow phase string onto the overlay phase
    pub fn from_gameflow(raw: &str) -> Self {
        match raw {
            "ChampSelect" => GamePhase::ChampSelect,
            "InProgress" | "GameStart" => GamePhase::InGame,
            "EndOfGame" | "PreEndOfGame" => GamePhase::PostGame,
            _ => GamePhase::Idle,
        }
    }
}

/// State-change update emitted by the workers and consumed by the push layer
#[derive(Debug, Clone)]
pub enum OverlayUpdate {
    /// LCU authentication succeeded
    Connect(LcuCredentials),

    /// LCU unreachable or the event stream dropped
    Disconnect { reason: String },

    /// Champ select session changed
    ChampSelect(ChampSelectSession),

    /// Gameflow phase changed
    GameflowPhase { raw: String, phase: GamePhase },

    /// A live game was first detected
    GameStart,

    /// Full composed state for one poll tick
    GameData(LiveGameState),

    /// One newly observed in-game event
    GameEvent(GameEvent),

    /// The live game ended or became unreachable
    GameEnd { last_state: Option<LiveGameState> },
}

/// Connection/activity flags exposed to the query surface
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStatus {
    pub lcu_connected: bool,
    pub game_active: bool,
}
