use serde::{Deserialize, Serialize};

/// Normalized champion select state, rebuilt wholesale on every update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectSession {
    /// Current pick/ban phase
    pub phase: ChampSelectPhase,

    /// Phase timer, absent when the LCU did not send one
    pub timer: Option<ChampSelectTimer>,

    /// Completed and in-progress bans, in action order
    pub bans: Vec<BanPickAction>,

    /// Completed and in-progress picks, in action order
    pub picks: Vec<BanPickAction>,

    /// Ally team slots
    pub blue_team: Vec<PlayerSlot>,

    /// Enemy team slots
    pub red_team: Vec<PlayerSlot>,

    /// Cell id of the local player, -1 when unknown
    pub local_player_cell_id: i64,
}

impl ChampSelectSession {
    /// The well-defined result for an absent or malformed session
    pub fn empty() -> Self {
        Self {
            phase: ChampSelectPhase::Unknown,
            timer: None,
            bans: Vec::new(),
            picks: Vec::new(),
            blue_team: Vec::new(),
            red_team: Vec::new(),
            local_player_cell_id: -1,
        }
    }
}

/// Pick/ban phase as reported by the LCU timer block
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChampSelectPhase {
    Planning,
    BanPick,
    Finalization,
    Unknown,
}

impl ChampSelectPhase {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "PLANNING" => ChampSelectPhase::Planning,
            "BAN_PICK" => ChampSelectPhase::BanPick,
            "FINALIZATION" => ChampSelectPhase::Finalization,
            _ => ChampSelectPhase::Unknown,
        }
    }
}

/// Phase timer extracted from the raw session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectTimer {
    pub total_time_ms: i64,
    pub adjusted_time_ms: i64,
    pub reference_epoch_ms: i64,
}

/// One flattened ban or pick action
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BanPickAction {
    /// Champion id, always > 0 (placeholder actions are filtered out)
    pub champion_id: i64,

    /// Which side performed the action
    pub side: Side,

    /// Whether the action has been locked in
    pub completed: bool,

    /// Cell id of the acting player
    pub actor_cell_id: i64,

    /// Ban or pick
    pub kind: ActionKind,
}

/// Team side from the local player's perspective
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

/// Kind of a pick/ban action
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Ban,
    Pick,
}

impl ActionKind {
    /// Parse the LCU action `type` string; other kinds (e.g. ten_bans_reveal)
    /// are not pick/ban actions and yield None
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "ban" => Some(ActionKind::Ban),
            "pick" => Some(ActionKind::Pick),
            _ => None,
        }
    }
}

/// Per-player metadata from the roster arrays
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSlot {
    pub cell_id: i64,
    pub champion_id: i64,
    pub summoner_id: i64,
    pub spell1_id: i64,
    pub spell2_id: i64,
    pub assigned_position: String,
}

/// Raw champ select session as returned by `/lol-champ-select/v1/session`.
/// Every field is optional-tolerant; the LCU omits most of them freely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChampSelectSession {
    /// Per-round action arrays; None distinguishes a malformed session
    pub actions: Option<Vec<Vec<RawChampSelectAction>>>,
    pub my_team: Vec<RawChampSelectPlayer>,
    pub their_team: Vec<RawChampSelectPlayer>,
    pub timer: Option<RawChampSelectTimer>,
    pub local_player_cell_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChampSelectAction {
    pub champion_id: i64,
    pub is_ally_action: bool,
    pub completed: bool,
    pub actor_cell_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChampSelectPlayer {
    pub cell_id: i64,
    pub champion_id: i64,
    pub summoner_id: i64,
    pub spell1_id: i64,
    pub spell2_id: i64,
    pub assigned_position: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChampSelectTimer {
    pub phase: String,
    pub total_time_in_phase: i64,
    pub adjusted_time_left_in_phase: i64,
    pub internal_now_in_epoch_ms: i64,
}
