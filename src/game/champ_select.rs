use crate::models::champ_select::{RawChampSelectPlayer, RawChampSelectSession};
use crate::models::{
    ActionKind, BanPickAction, ChampSelectPhase, ChampSelectSession, ChampSelectTimer, PlayerSlot,
    Side,
};

/// Flatten a raw LCU champ select session into the normalized shape.
///
/// The LCU nests actions as one array per pick/ban round; rounds are flattened
/// in order, partitioned into bans and picks, and placeholder actions with no
/// champion selected yet are dropped. An absent or malformed session yields
/// the well-defined empty result instead of an error.
pub fn normalize_session(raw: Option<&RawChampSelectSession>) -> ChampSelectSession {
    let session = match raw {
        Some(s) => s,
        None => return ChampSelectSession::empty(),
    };

    let rounds = match &session.actions {
        Some(rounds) => rounds,
        None => return ChampSelectSession::empty(),
    };

    let mut bans = Vec::new();
    let mut picks = Vec::new();

    for round in rounds {
        for action in round {
            let kind = match ActionKind::from_raw(&action.kind) {
                Some(kind) => kind,
                None => continue,
            };

            if action.champion_id <= 0 {
                continue;
            }

            let entry = BanPickAction {
                champion_id: action.champion_id,
                side: if action.is_ally_action {
                    Side::Blue
                } else {
                    Side::Red
                },
                completed: action.completed,
                actor_cell_id: action.actor_cell_id,
                kind,
            };

            match kind {
                ActionKind::Ban => bans.push(entry),
                ActionKind::Pick => picks.push(entry),
            }
        }
    }

    let phase = session
        .timer
        .as_ref()
        .map(|t| ChampSelectPhase::from_raw(&t.phase))
        .unwrap_or(ChampSelectPhase::Planning);

    let timer = session.timer.as_ref().map(|t| ChampSelectTimer {
        total_time_ms: t.total_time_in_phase,
        adjusted_time_ms: t.adjusted_time_left_in_phase,
        reference_epoch_ms: t.internal_now_in_epoch_ms,
    });

    ChampSelectSession {
        phase,
        timer,
        bans,
        picks,
        blue_team: session.my_team.iter().map(player_slot).collect(),
        red_team: session.their_team.iter().map(player_slot).collect(),
        local_player_cell_id: session.local_player_cell_id,
    }
}

fn player_slot(p: &RawChampSelectPlayer) -> PlayerSlot {
    PlayerSlot {
        cell_id: p.cell_id,
        champion_id: p.champion_id,
        summoner_id: p.summoner_id,
        spell1_id: p.spell1_id,
        spell2_id: p.spell2_id,
        assigned_position: p.assigned_position.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(value: serde_json::Value) -> RawChampSelectSession {
        serde_json::from_value(value).expect("session fixture")
    }

    #[test]
    fn test_absent_session_is_empty() {
        let result = normalize_session(None);

        assert_eq!(result.phase, ChampSelectPhase::Unknown);
        assert!(result.bans.is_empty());
        assert!(result.picks.is_empty());
        assert!(result.timer.is_none());
        assert_eq!(result.local_player_cell_id, -1);
    }

    #[test]
    fn test_session_without_actions_is_empty() {
        let raw = session(json!({ "localPlayerCellId": 2 }));
        let result = normalize_session(Some(&raw));

        assert_eq!(result.phase, ChampSelectPhase::Unknown);
        assert!(result.bans.is_empty());
        assert!(result.picks.is_empty());
    }

    #[test]
    fn test_two_round_ban_and_pick() {
        let raw = session(json!({
            "actions": [
                [
                    { "championId": 14, "isAllyAction": true, "completed": true,
                      "actorCellId": 0, "type": "ban" }
                ],
                [
                    { "championId": 22, "isAllyAction": false, "completed": true,
                      "actorCellId": 5, "type": "pick" }
                ]
            ],
            "timer": {
                "phase": "BAN_PICK",
                "totalTimeInPhase": 27000,
                "adjustedTimeLeftInPhase": 12000,
                "internalNowInEpochMs": 1700000000000i64
            },
            "localPlayerCellId": 0
        }));

        let result = normalize_session(Some(&raw));

        assert_eq!(
            result.bans,
            vec![BanPickAction {
                champion_id: 14,
                side: Side::Blue,
                completed: true,
                actor_cell_id: 0,
                kind: ActionKind::Ban,
            }]
        );
        assert_eq!(
            result.picks,
            vec![BanPickAction {
                champion_id: 22,
                side: Side::Red,
                completed: true,
                actor_cell_id: 5,
                kind: ActionKind::Pick,
            }]
        );
        assert_eq!(result.phase, ChampSelectPhase::BanPick);

        let timer = result.timer.expect("timer");
        assert_eq!(timer.total_time_ms, 27000);
        assert_eq!(timer.adjusted_time_ms, 12000);
    }

    #[test]
    fn test_placeholder_and_unknown_actions_filtered() {
        let raw = session(json!({
            "actions": [
                [
                    { "championId": 0, "isAllyAction": true, "completed": false,
                      "actorCellId": 1, "type": "pick" },
                    { "championId": -1, "isAllyAction": true, "completed": false,
                      "actorCellId": 2, "type": "ban" },
                    { "championId": 55, "isAllyAction": true, "completed": false,
                      "actorCellId": 3, "type": "ten_bans_reveal" }
                ]
            ]
        }));

        let result = normalize_session(Some(&raw));
        assert!(result.bans.is_empty());
        assert!(result.picks.is_empty());
        // Session exists but carries no timer: original behavior is Planning
        assert_eq!(result.phase, ChampSelectPhase::Planning);
    }

    #[test]
    fn test_rosters_mapped_to_slots() {
        let raw = session(json!({
            "actions": [],
            "myTeam": [
                { "cellId": 0, "championId": 517, "summonerId": 111,
                  "spell1Id": 4, "spell2Id": 12, "assignedPosition": "top" }
            ],
            "theirTeam": [
                { "cellId": 5, "championId": 0, "summonerId": 222,
                  "spell1Id": 4, "spell2Id": 14, "assignedPosition": "middle" }
            ],
            "localPlayerCellId": 0
        }));

        let result = normalize_session(Some(&raw));

        assert_eq!(result.blue_team.len(), 1);
        assert_eq!(result.blue_team[0].champion_id, 517);
        assert_eq!(result.blue_team[0].assigned_position, "top");
        assert_eq!(result.red_team.len(), 1);
        assert_eq!(result.red_team[0].cell_id, 5);
        assert_eq!(result.local_player_cell_id, 0);
    }
}
