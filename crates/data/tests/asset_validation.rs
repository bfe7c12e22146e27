use gemwitch_core::{Event, EventBus, GemColor, GemEffect, Phase, RunState};
use gemwitch_data::{load_assets, load_content, load_game_config, validate};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn shipped_assets_pass_validation() {
    let config = load_game_config(&assets_root()).expect("load config");
    let content = load_content(&assets_root()).expect("load content");
    validate(&config, &content).expect("shipped data must validate");
}

#[test]
fn rule_tables_read_back() {
    let (config, _) = load_assets(&assets_root()).expect("load assets");
    assert_eq!(config.battle.hand_size, 5);
    assert_eq!(config.last_day(), Some(5));
    assert!(config.day_rule(5).map(|rule| rule.witch).unwrap_or(false));
    for phase in [Phase::Dawn, Phase::Dusk, Phase::Dark] {
        assert!(config.phase_rule(phase).is_some());
    }
    assert_eq!(config.phase_rule(Phase::Dark).map(|rule| rule.tier), Some(2));
}

#[test]
fn bestiary_spot_checks() {
    let (_, content) = load_assets(&assets_root()).expect("load assets");

    let ember = content.gem_by_id("ember_shard").expect("ember_shard");
    assert_eq!(ember.effect, GemEffect::Damage);
    assert_eq!(ember.color, GemColor::Red);
    assert_eq!(ember.amount_at(2), ember.power + ember.growth);

    let witches: Vec<_> = content
        .enemies
        .iter()
        .filter(|enemy| enemy.witch)
        .collect();
    assert_eq!(witches.len(), 1);
    assert_eq!(witches[0].id, "briar_witch");
    assert_eq!(witches[0].actions.len(), 5);

    assert_eq!(content.classes.len(), 3);
    for class in &content.classes {
        assert_eq!(class.gems.len(), 8);
    }
    let colors: Vec<GemColor> = content
        .classes
        .iter()
        .map(|class| class.favored_color)
        .collect();
    assert!(colors.contains(&GemColor::Blue));
    assert!(colors.contains(&GemColor::Purple));
    assert!(colors.contains(&GemColor::Green));
}

#[test]
fn a_seeded_run_boots_from_shipped_assets() {
    let (config, content) = load_assets(&assets_root()).expect("load assets");
    let hand_size = config.battle.hand_size;
    let mut run = RunState::new(config, content, "errant_knight", 404).expect("new run");
    let mut events = EventBus::default();
    run.start_battle(&mut events).expect("first battle");
    assert_eq!(run.hand.len(), hand_size);
    let log: Vec<Event> = events.drain().collect();
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::BattleStarted { day: 1, .. })));
}
