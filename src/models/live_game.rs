use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composed live game state, rebuilt wholesale each poll tick
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveGameState {
    /// Current game clock in seconds
    pub game_time: f64,

    /// Game mode (e.g. CLASSIC, ARAM)
    pub game_mode: String,

    /// Internal map name (e.g. Map11)
    pub map_name: String,

    /// Numeric map id
    pub map_number: i64,

    /// Blue side (ORDER) aggregate
    pub blue_team: TeamAggregate,

    /// Red side (CHAOS) aggregate
    pub red_team: TeamAggregate,

    /// Display name of the player running the client
    pub active_player: String,

    /// Objective respawn state derived from the event log
    pub objectives: ObjectiveTimerSet,

    /// Gold differential samples for the current session
    pub gold_history: Vec<GoldSample>,

    /// When this state was composed
    pub updated_at: DateTime<Utc>,
}

/// Per-team sums plus the players they were computed from
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregate {
    pub total_kills: i64,
    pub total_deaths: i64,
    pub total_assists: i64,
    pub total_cs: i64,

    /// Sum of item prices across the team. The Live Client Data API does not
    /// expose true player gold, so this diverges when players sell items or
    /// sit on unspent gold.
    pub total_gold: i64,

    pub players: Vec<PlayerStat>,
}

/// Normalized per-player stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub summoner_name: String,
    pub tag_line: String,
    pub champion_name: String,
    pub raw_champion_name: String,
    pub level: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,

    /// Approximated from item prices, see [`TeamAggregate::total_gold`]
    pub gold: i64,

    pub items: Vec<ItemSlot>,
    pub summoner_spells: serde_json::Value,
    pub runes: serde_json::Value,
    pub team: String,
    pub position: String,
    pub is_dead: bool,
    pub respawn_timer: f64,
    pub skin_id: i64,
}

/// One inventory slot
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemSlot {
    pub item_id: i64,
    pub display_name: String,
    pub count: i64,
    pub price: i64,
}

/// Respawn state for the four tracked map objectives
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveTimerSet {
    pub baron: ObjectiveTimer,
    pub dragon: ObjectiveTimer,
    pub herald: ObjectiveTimer,
    pub elder_dragon: ObjectiveTimer,
}

/// Respawn state for a single objective
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveTimer {
    /// Whether the objective is currently up
    pub alive: bool,

    /// Game clock at which the objective respawns; 0 while never killed
    pub respawn_at: f64,

    /// Name of the player credited with the last kill
    pub last_killed_by: String,

    /// Drake element for the dragon slot (Fire, Ocean, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragon_type: Option<String>,

    /// Seconds until respawn, 0 while alive
    pub time_remaining: f64,
}

impl Default for ObjectiveTimer {
    fn default() -> Self {
        Self {
            alive: true,
            respawn_at: 0.0,
            last_killed_by: String::new(),
            dragon_type: None,
            time_remaining: 0.0,
        }
    }
}

/// One gold differential sample (blue minus red)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoldSample {
    /// Game clock in whole seconds
    pub time: i64,
    pub blue_gold: i64,
    pub red_gold: i64,
    pub diff: i64,
}

/// Formatted game event surfaced to subscribers
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    /// Upstream event name (ChampionKill, DragonKill, ...)
    pub kind: String,
    pub time: f64,
    pub killer: Option<String>,
    pub victim: Option<String>,
    pub assisters: Vec<String>,
    pub dragon_type: Option<String>,
    pub turret_killed: Option<String>,
    pub inhib_killed: Option<String>,
    pub stolen: bool,
}

impl GameEvent {
    pub fn from_raw(raw: &RawGameEvent) -> Self {
        let non_empty = |s: &String| {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        };

        Self {
            kind: raw.event_name.clone(),
            time: raw.event_time,
            killer: non_empty(&raw.killer_name),
            victim: non_empty(&raw.victim_name),
            assisters: raw.assisters.clone(),
            dragon_type: non_empty(&raw.dragon_type),
            turret_killed: non_empty(&raw.turret_killed),
            inhib_killed: non_empty(&raw.inhib_killed),
            stolen: raw.stolen,
        }
    }
}

/// Raw `/liveclientdata/allgamedata` snapshot. Every field is defaulted so a
/// partial payload deserializes instead of failing the tick.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllGameData {
    pub active_player: RawActivePlayer,
    pub all_players: Vec<RawPlayer>,
    pub events: RawEventLog,
    pub game_data: RawGameStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActivePlayer {
    pub riot_id_game_name: String,
    pub summoner_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlayer {
    pub riot_id_game_name: String,
    pub riot_id_tag_line: String,
    pub summoner_name: String,
    pub champion_name: String,
    pub raw_champion_name: String,
    pub level: i64,
    pub scores: RawScores,
    pub items: Vec<RawItem>,
    pub summoner_spells: serde_json::Value,
    pub runes: serde_json::Value,
    pub team: String,
    pub position: String,
    pub is_dead: bool,
    pub respawn_timer: f64,
    #[serde(rename = "skinID")]
    pub skin_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawScores {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub creep_score: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    #[serde(rename = "itemID")]
    pub item_id: i64,
    pub display_name: String,
    pub count: i64,
    pub price: i64,
}

/// The event log container nests the list under a capitalized key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEventLog {
    #[serde(rename = "Events")]
    pub events: Vec<RawGameEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawGameEvent {
    pub event_name: String,
    pub event_time: f64,
    pub killer_name: String,
    pub victim_name: String,
    pub assisters: Vec<String>,
    pub dragon_type: String,
    pub turret_killed: String,
    pub inhib_killed: String,
    pub stolen: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawGameStats {
    pub game_mode: String,
    pub map_name: String,
    pub map_number: i64,
    pub game_time: f64,
}
