use chrono::Utc;

use crate::game::objectives;
use crate::models::{
    AllGameData, ItemSlot, LiveGameState, PlayerStat, TeamAggregate,
};
use crate::models::live_game::{RawItem, RawPlayer};

/// Turn one raw `/allgamedata` snapshot into a composed [`LiveGameState`].
///
/// Pure function of the snapshot: no timers, no network, no session state.
/// `gold_history` is left empty here; the game session attaches its buffer.
pub fn game_state(data: &AllGameData) -> LiveGameState {
    let blue: Vec<PlayerStat> = data
        .all_players
        .iter()
        .filter(|p| p.team == "ORDER")
        .map(player_stat)
        .collect();

    let red: Vec<PlayerStat> = data
        .all_players
        .iter()
        .filter(|p| p.team == "CHAOS")
        .map(player_stat)
        .collect();

    let stats = &data.game_data;
    let game_time = stats.game_time;

    let game_mode = if stats.game_mode.is_empty() {
        "CLASSIC".to_string()
    } else {
        stats.game_mode.clone()
    };
    let map_name = if stats.map_name.is_empty() {
        "Map11".to_string()
    } else {
        stats.map_name.clone()
    };
    let map_number = if stats.map_number == 0 {
        11
    } else {
        stats.map_number
    };

    let active_player = display_name(
        &data.active_player.riot_id_game_name,
        &data.active_player.summoner_name,
    );

    LiveGameState {
        game_time,
        game_mode,
        map_name,
        map_number,
        blue_team: team_aggregate(blue),
        red_team: team_aggregate(red),
        active_player,
        objectives: objectives::objective_timers(&data.events.events, game_time),
        gold_history: Vec::new(),
        updated_at: Utc::now(),
    }
}

/// Sum per-player stats into a team aggregate. Order-independent fold.
fn team_aggregate(players: Vec<PlayerStat>) -> TeamAggregate {
    TeamAggregate {
        total_kills: players.iter().map(|p| p.kills).sum(),
        total_deaths: players.iter().map(|p| p.deaths).sum(),
        total_assists: players.iter().map(|p| p.assists).sum(),
        total_cs: players.iter().map(|p| p.cs).sum(),
        total_gold: players.iter().map(|p| p.gold).sum(),
        players,
    }
}

fn player_stat(p: &RawPlayer) -> PlayerStat {
    PlayerStat {
        summoner_name: display_name(&p.riot_id_game_name, &p.summoner_name),
        tag_line: p.riot_id_tag_line.clone(),
        champion_name: p.champion_name.clone(),
        raw_champion_name: p.raw_champion_name.clone(),
        level: p.level,
        kills: p.scores.kills,
        deaths: p.scores.deaths,
        assists: p.scores.assists,
        cs: p.scores.creep_score,
        gold: item_gold(&p.items),
        items: p.items.iter().map(item_slot).collect(),
        summoner_spells: p.summoner_spells.clone(),
        runes: p.runes.clone(),
        team: p.team.clone(),
        position: p.position.clone(),
        is_dead: p.is_dead,
        respawn_timer: p.respawn_timer,
        skin_id: p.skin_id,
    }
}

/// Riot-id game name, falling back to the legacy summoner name
fn display_name(riot_id_name: &str, summoner_name: &str) -> String {
    if !riot_id_name.is_empty() {
        riot_id_name.to_string()
    } else if !summoner_name.is_empty() {
        summoner_name.to_string()
    } else {
        "Unknown".to_string()
    }
}

/// Per-player gold approximated as the sum of item prices. The API does not
/// expose true gold, so sold items and unspent gold are invisible here.
fn item_gold(items: &[RawItem]) -> i64 {
    items
        .iter()
        .map(|i| i.price * if i.count > 0 { i.count } else { 1 })
        .sum()
}

fn item_slot(i: &RawItem) -> ItemSlot {
    ItemSlot {
        item_id: i.item_id,
        display_name: i.display_name.clone(),
        count: i.count,
        price: i.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> AllGameData {
        serde_json::from_value(value).expect("snapshot fixture")
    }

    #[test]
    fn test_partitions_teams_and_sums_stats() {
        let data = snapshot(json!({
            "activePlayer": { "riotIdGameName": "Faker" },
            "allPlayers": [
                {
                    "riotIdGameName": "Faker",
                    "team": "ORDER",
                    "scores": { "kills": 3, "deaths": 1, "assists": 4, "creepScore": 180 },
                    "items": [
                        { "itemID": 3089, "displayName": "Rabadon's Deathcap", "count": 1, "price": 3500 },
                        { "itemID": 2003, "displayName": "Health Potion", "count": 2, "price": 50 }
                    ]
                },
                {
                    "riotIdGameName": "Zeus",
                    "team": "ORDER",
                    "scores": { "kills": 2, "deaths": 2, "assists": 1, "creepScore": 150 }
                },
                {
                    "riotIdGameName": "Chovy",
                    "team": "CHAOS",
                    "scores": { "kills": 5, "deaths": 0, "assists": 2, "creepScore": 210 }
                }
            ],
            "gameData": { "gameMode": "CLASSIC", "mapName": "Map11", "mapNumber": 11, "gameTime": 930.5 }
        }));

        let state = game_state(&data);

        assert_eq!(state.blue_team.players.len(), 2);
        assert_eq!(state.red_team.players.len(), 1);
        assert_eq!(state.blue_team.total_kills, 5);
        assert_eq!(state.blue_team.total_deaths, 3);
        assert_eq!(state.blue_team.total_assists, 5);
        assert_eq!(state.blue_team.total_cs, 330);
        // 3500*1 + 50*2
        assert_eq!(state.blue_team.total_gold, 3600);
        assert_eq!(state.red_team.total_kills, 5);
        assert_eq!(state.active_player, "Faker");
        assert_eq!(state.game_time, 930.5);
    }

    #[test]
    fn test_player_without_items_has_zero_gold() {
        let data = snapshot(json!({
            "allPlayers": [
                { "riotIdGameName": "Keria", "team": "ORDER" }
            ]
        }));

        let state = game_state(&data);
        let player = &state.blue_team.players[0];

        assert_eq!(player.gold, 0);
        assert!(player.items.is_empty());
        assert_eq!(state.blue_team.total_gold, 0);
    }

    #[test]
    fn test_name_fallback_chain() {
        let data = snapshot(json!({
            "allPlayers": [
                { "riotIdGameName": "Gumayusi", "summonerName": "old name", "team": "ORDER" },
                { "summonerName": "LegacyName", "team": "ORDER" },
                { "team": "ORDER" }
            ]
        }));

        let players = &game_state(&data).blue_team.players;
        assert_eq!(players[0].summoner_name, "Gumayusi");
        assert_eq!(players[1].summoner_name, "LegacyName");
        assert_eq!(players[2].summoner_name, "Unknown");
    }

    #[test]
    fn test_empty_snapshot_defaults() {
        let state = game_state(&snapshot(json!({})));

        assert_eq!(state.game_mode, "CLASSIC");
        assert_eq!(state.map_name, "Map11");
        assert_eq!(state.map_number, 11);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.active_player, "Unknown");
        assert!(state.blue_team.players.is_empty());
        assert!(state.red_team.players.is_empty());
        assert!(state.objectives.baron.alive);
        assert!(state.gold_history.is_empty());
    }
}
