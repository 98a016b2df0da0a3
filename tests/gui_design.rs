use chrono::NaiveDate;
use town_quest::*;

fn engine(mode: GameMode) -> Engine {
    let now = NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap();
    let mut engine = Engine::with_seed(MemoryStore::new(), ManualClock::new(now), 11);
    engine.set_game_mode(mode);
    engine
}

#[test]
fn top_hud_matches_design_outline() {
    let snap = engine(GameMode::Single).snapshot();
    let hud_line = format_hud(&snap);
    assert!(hud_line.contains("Score: 0"));
    assert!(hud_line.contains("Best: 0"));
    assert!(hud_line.contains("Steps: 0"));
}

#[test]
fn controls_are_exposed() {
    for expected in ["⟲ Turn Left", "↑ Go Forward", "Turn Right ⟳", "Restart"] {
        assert!(CONTROL_LABELS.contains(&expected));
    }
    assert_eq!(REWARDS_PANEL_HEADING, "Rewards");
}

#[test]
fn side_panel_names_destination_and_turn() {
    let snap = engine(GameMode::TwoPlayer).snapshot();
    let lines = format_side_panel(&snap);
    let place = snap.destination.expect("destination");
    assert_eq!(
        lines[0],
        format!("Destination: {} {}", place.kind.emoji(), place.name())
    );
    assert!(lines.contains(&"Turn: Player 1".to_string()));
    assert!(lines.contains(&"Mode: Two Players | Difficulty: Medium".to_string()));
}

#[test]
fn snapshot_serializes_for_front_ends() {
    let snap = engine(GameMode::Single).snapshot();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["mode"], "single");
    assert_eq!(json["difficulty"], "medium");
    assert_eq!(json["score"], 0);
    assert!(json["players"]["two"].is_null());
}
