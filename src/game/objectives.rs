use crate::models::{ObjectiveTimer, ObjectiveTimerSet, RawGameEvent};

/// Baron respawns 6 minutes after a kill
pub const BARON_RESPAWN_SECS: f64 = 360.0;

/// Elemental drakes respawn 5 minutes after a kill
pub const DRAGON_RESPAWN_SECS: f64 = 300.0;

/// Rift Herald respawn window
pub const HERALD_RESPAWN_SECS: f64 = 360.0;

/// Elder dragon respawns 6 minutes after a kill
pub const ELDER_RESPAWN_SECS: f64 = 360.0;

/// Derive objective respawn state by replaying the full event log against the
/// current game clock. The upstream log is authoritative and replay is cheap,
/// so this is a pure function rather than an incremental tracker; feeding the
/// same log twice yields the same answer even if the client truncates or
/// duplicates entries between polls.
pub fn objective_timers(events: &[RawGameEvent], current_time: f64) -> ObjectiveTimerSet {
    let mut timers = ObjectiveTimerSet {
        baron: ObjectiveTimer::default(),
        dragon: ObjectiveTimer::default(),
        herald: ObjectiveTimer::default(),
        elder_dragon: ObjectiveTimer::default(),
    };

    // Last kill wins: only the next respawn matters, so later kills of the
    // same objective simply overwrite the prior deadline.
    for event in events {
        match event.event_name.as_str() {
            "BaronKill" => {
                timers.baron.alive = false;
                timers.baron.respawn_at = event.event_time + BARON_RESPAWN_SECS;
                timers.baron.last_killed_by = event.killer_name.clone();
            }
            "DragonKill" => {
                if event.dragon_type == "Elder" {
                    timers.elder_dragon.alive = false;
                    timers.elder_dragon.respawn_at = event.event_time + ELDER_RESPAWN_SECS;
                    timers.elder_dragon.last_killed_by = event.killer_name.clone();
                } else {
                    timers.dragon.alive = false;
                    timers.dragon.respawn_at = event.event_time + DRAGON_RESPAWN_SECS;
                    timers.dragon.last_killed_by = event.killer_name.clone();
                    timers.dragon.dragon_type = if event.dragon_type.is_empty() {
                        None
                    } else {
                        Some(event.dragon_type.clone())
                    };
                }
            }
            "HeraldKill" => {
                timers.herald.alive = false;
                timers.herald.respawn_at = event.event_time + HERALD_RESPAWN_SECS;
                timers.herald.last_killed_by = event.killer_name.clone();
            }
            _ => {}
        }
    }

    for timer in [
        &mut timers.baron,
        &mut timers.dragon,
        &mut timers.herald,
        &mut timers.elder_dragon,
    ] {
        if !timer.alive && current_time >= timer.respawn_at {
            timer.alive = true;
        }
        timer.time_remaining = if timer.alive {
            0.0
        } else {
            (timer.respawn_at - current_time).max(0.0)
        };
    }

    timers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(name: &str, time: f64, killer: &str, dragon_type: &str) -> RawGameEvent {
        RawGameEvent {
            event_name: name.to_string(),
            event_time: time,
            killer_name: killer.to_string(),
            dragon_type: dragon_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_log_all_alive() {
        let timers = objective_timers(&[], 900.0);

        for timer in [&timers.baron, &timers.dragon, &timers.herald, &timers.elder_dragon] {
            assert!(timer.alive);
            assert_eq!(timer.time_remaining, 0.0);
        }
    }

    #[test]
    fn test_baron_kill_starts_timer() {
        let events = vec![kill("BaronKill", 1200.0, "Faker", "")];

        let timers = objective_timers(&events, 1300.0);
        assert!(!timers.baron.alive);
        assert_eq!(timers.baron.respawn_at, 1560.0);
        assert_eq!(timers.baron.time_remaining, 260.0);
        assert_eq!(timers.baron.last_killed_by, "Faker");

        // Other objectives untouched
        assert!(timers.dragon.alive);
        assert!(timers.herald.alive);
        assert!(timers.elder_dragon.alive);
    }

    #[test]
    fn test_respawn_flip_never_early() {
        let events = vec![kill("DragonKill", 600.0, "Canyon", "Fire")];

        let just_before = objective_timers(&events, 899.9);
        assert!(!just_before.dragon.alive);
        assert!(just_before.dragon.time_remaining > 0.0);

        let at_respawn = objective_timers(&events, 900.0);
        assert!(at_respawn.dragon.alive);
        assert_eq!(at_respawn.dragon.time_remaining, 0.0);
        // Dragon type is still reported for the last kill
        assert_eq!(at_respawn.dragon.dragon_type.as_deref(), Some("Fire"));
    }

    #[test]
    fn test_elder_branches_from_drakes() {
        let events = vec![
            kill("DragonKill", 600.0, "Canyon", "Ocean"),
            kill("DragonKill", 2100.0, "Oner", "Elder"),
        ];

        let timers = objective_timers(&events, 2150.0);
        // Drake respawned long ago, elder is down
        assert!(timers.dragon.alive);
        assert!(!timers.elder_dragon.alive);
        assert_eq!(timers.elder_dragon.respawn_at, 2460.0);
        assert_eq!(timers.elder_dragon.last_killed_by, "Oner");
    }

    #[test]
    fn test_last_kill_wins() {
        let events = vec![
            kill("DragonKill", 600.0, "Canyon", "Fire"),
            kill("DragonKill", 950.0, "Peanut", "Mountain"),
        ];

        let timers = objective_timers(&events, 1000.0);
        assert!(!timers.dragon.alive);
        assert_eq!(timers.dragon.respawn_at, 1250.0);
        assert_eq!(timers.dragon.last_killed_by, "Peanut");
        assert_eq!(timers.dragon.dragon_type.as_deref(), Some("Mountain"));
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let events = vec![
            kill("ChampionKill", 500.0, "Zeus", ""),
            kill("TurretKilled", 700.0, "Gumayusi", ""),
        ];

        let timers = objective_timers(&events, 800.0);
        assert!(timers.baron.alive);
        assert!(timers.dragon.alive);
    }

    #[test]
    fn test_replay_is_pure() {
        let events = vec![
            kill("BaronKill", 1200.0, "Faker", ""),
            kill("HeraldKill", 840.0, "Oner", ""),
        ];

        let first = objective_timers(&events, 1300.0);
        let second = objective_timers(&events, 1300.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_time_remaining_formula() {
        let events = vec![kill("HeraldKill", 840.0, "Oner", "")];

        // Clock past the deadline clamps to zero rather than going negative
        let timers = objective_timers(&events, 840.0 + HERALD_RESPAWN_SECS + 50.0);
        assert!(timers.herald.alive);
        assert_eq!(timers.herald.time_remaining, 0.0);
    }
}
