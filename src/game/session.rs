use tracing::{debug, info};

use crate::game::event_feed::EventCursor;
use crate::game::gold::GoldHistory;
use crate::game::normalize;
use crate::models::{AllGameData, GameEvent, LiveGameState};

/// Updates produced by one poll tick of the game session
#[derive(Debug, Clone)]
pub enum LiveUpdate {
    GameStart,
    GameData(LiveGameState),
    GameEvent(GameEvent),
    GameEnd { last_state: Option<LiveGameState> },
}

/// Tracks whether a game is running and derives per-tick updates from raw
/// snapshots.
///
/// Snapshot presence is the whole signal: the Live Client Data endpoint only
/// answers while a game is actually running, so the first successful fetch
/// marks game start and the first failure after that marks game end. All
/// mutation happens synchronously inside [`GameSession::on_snapshot`], so an
/// overlapping timer fire cannot observe a half-applied tick.
#[derive(Debug, Default)]
pub struct GameSession {
    active: bool,
    gold: GoldHistory,
    events: EventCursor,
    last_state: Option<LiveGameState>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a game is currently detected
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Read access to the current gold buffer
    pub fn gold_history(&self) -> &[crate::models::GoldSample] {
        self.gold.samples()
    }

    /// Apply one poll tick. `None` means the fetch failed or timed out.
    pub fn on_snapshot(&mut self, snapshot: Option<AllGameData>) -> Vec<LiveUpdate> {
        let data = match snapshot {
            Some(data) => data,
            None => {
                if !self.active {
                    return Vec::new();
                }
                info!("Game ended or live client API unavailable");
                self.active = false;
                return vec![LiveUpdate::GameEnd {
                    last_state: self.last_state.take(),
                }];
            }
        };

        let mut updates = Vec::new();

        if !self.active {
            info!("Live game detected");
            self.active = true;
            self.gold.reset();
            self.events.reset();
            updates.push(LiveUpdate::GameStart);
        }

        let mut state = normalize::game_state(&data);

        self.gold.record(
            state.game_time,
            state.blue_team.total_gold,
            state.red_team.total_gold,
        );
        state.gold_history = self.gold.samples().to_vec();

        self.last_state = Some(state.clone());
        updates.push(LiveUpdate::GameData(state));

        let new_events = self.events.drain(&data.events.events);
        if !new_events.is_empty() {
            debug!("{} new game events", new_events.len());
        }
        for raw in new_events {
            updates.push(LiveUpdate::GameEvent(GameEvent::from_raw(raw)));
        }

        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(game_time: f64, events: serde_json::Value) -> AllGameData {
        serde_json::from_value(json!({
            "allPlayers": [
                {
                    "riotIdGameName": "Faker",
                    "team": "ORDER",
                    "scores": { "kills": 1, "deaths": 0, "assists": 0, "creepScore": 20 },
                    "items": [ { "itemID": 1056, "displayName": "Doran's Ring",
                                 "count": 1, "price": 400 } ]
                },
                { "riotIdGameName": "Chovy", "team": "CHAOS" }
            ],
            "gameData": { "gameMode": "CLASSIC", "gameTime": game_time },
            "events": { "Events": events }
        }))
        .expect("snapshot fixture")
    }

    #[test]
    fn test_snapshot_presence_drives_lifecycle() {
        let mut session = GameSession::new();

        // [None, None, snap, snap, None]
        assert!(session.on_snapshot(None).is_empty());
        assert!(session.on_snapshot(None).is_empty());
        assert!(!session.is_active());

        let first = session.on_snapshot(Some(snapshot(30.0, json!([]))));
        assert!(matches!(first[0], LiveUpdate::GameStart));
        assert!(matches!(first[1], LiveUpdate::GameData(_)));
        assert_eq!(first.len(), 2);
        assert!(session.is_active());

        let second = session.on_snapshot(Some(snapshot(31.0, json!([]))));
        assert_eq!(second.len(), 1);
        let second_time = match &second[0] {
            LiveUpdate::GameData(state) => state.game_time,
            other => panic!("expected GameData, got {:?}", other),
        };
        assert_eq!(second_time, 31.0);

        let end = session.on_snapshot(None);
        assert_eq!(end.len(), 1);
        match &end[0] {
            LiveUpdate::GameEnd { last_state } => {
                // Last known state is the second snapshot's derived state
                assert_eq!(last_state.as_ref().expect("last state").game_time, 31.0);
            }
            other => panic!("expected GameEnd, got {:?}", other),
        }
        assert!(!session.is_active());

        // Further failures stay silent
        assert!(session.on_snapshot(None).is_empty());
    }

    #[test]
    fn test_new_events_emitted_individually_once() {
        let mut session = GameSession::new();

        let first = session.on_snapshot(Some(snapshot(
            10.0,
            json!([ { "EventName": "GameStart", "EventTime": 0.0 } ]),
        )));
        let first_events: Vec<&GameEvent> = first
            .iter()
            .filter_map(|u| match u {
                LiveUpdate::GameEvent(e) => Some(e),
                _ => None,
            })
            .collect();
        assert_eq!(first_events.len(), 1);
        assert_eq!(first_events[0].kind, "GameStart");

        // Same log again: nothing new
        let second = session.on_snapshot(Some(snapshot(
            11.0,
            json!([ { "EventName": "GameStart", "EventTime": 0.0 } ]),
        )));
        assert!(second
            .iter()
            .all(|u| !matches!(u, LiveUpdate::GameEvent(_))));

        // Log grew by one: exactly the suffix is emitted
        let third = session.on_snapshot(Some(snapshot(
            190.0,
            json!([
                { "EventName": "GameStart", "EventTime": 0.0 },
                { "EventName": "FirstBlood", "EventTime": 190.0, "KillerName": "Faker" }
            ]),
        )));
        let third_events: Vec<&GameEvent> = third
            .iter()
            .filter_map(|u| match u {
                LiveUpdate::GameEvent(e) => Some(e),
                _ => None,
            })
            .collect();
        assert_eq!(third_events.len(), 1);
        assert_eq!(third_events[0].kind, "FirstBlood");
        assert_eq!(third_events[0].killer.as_deref(), Some("Faker"));
    }

    #[test]
    fn test_gold_history_resets_on_new_game() {
        let mut session = GameSession::new();

        // First game samples at t=30
        session.on_snapshot(Some(snapshot(30.0, json!([]))));
        assert_eq!(session.gold_history().len(), 1);

        // Game ends, new game starts: buffer is cleared before sampling
        session.on_snapshot(None);
        let updates = session.on_snapshot(Some(snapshot(10.0, json!([]))));

        let state = updates
            .iter()
            .find_map(|u| match u {
                LiveUpdate::GameData(state) => Some(state),
                _ => None,
            })
            .expect("game data");
        assert_eq!(state.gold_history.len(), 1);
        assert_eq!(state.gold_history[0].time, 10);
        // 400 blue gold vs 0 red gold
        assert_eq!(state.gold_history[0].diff, 400);
    }
}
