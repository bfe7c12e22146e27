use gemwitch_core::{
    BattleRule, CampRule, ClassDef, Content, DayRule, EconomyRule, EnemyAction, EnemyActionKind,
    EnemyDef, EventBus, GameConfig, GemColor, GemDef, GemEffect, Phase, PhaseRule,
    ProficiencyRule, RunError, RunState, ShopRule,
};

fn config() -> GameConfig {
    GameConfig {
        phases: vec![
            PhaseRule {
                phase: Phase::Dawn,
                tier: 1,
                hp_mult: 1.0,
                damage_mult: 1.0,
                reward_base: 10,
            },
            PhaseRule {
                phase: Phase::Dusk,
                tier: 1,
                hp_mult: 1.0,
                damage_mult: 1.0,
                reward_base: 10,
            },
            PhaseRule {
                phase: Phase::Dark,
                tier: 2,
                hp_mult: 1.0,
                damage_mult: 1.0,
                reward_base: 15,
            },
        ],
        days: vec![
            DayRule {
                day: 1,
                hp_mult: 1.0,
                damage_mult: 1.0,
                reward_mult: 1.0,
                witch: false,
            },
            DayRule {
                day: 2,
                hp_mult: 1.0,
                damage_mult: 1.0,
                reward_mult: 1.0,
                witch: true,
            },
        ],
        battle: BattleRule {
            hand_size: 3,
            max_gem_level: 5,
            hp_variance_pct: 0,
        },
        proficiency: ProficiencyRule {
            gain_on_success: 5,
            max: 110,
            favored_bonus: 10,
        },
        camp: CampRule {
            rest_heal_pct: 50,
            train_gain: 10,
        },
        economy: EconomyRule {
            interest_step: 10,
            interest_per: 1,
            interest_cap: 5,
            meta_per_day: 3,
            meta_victory_bonus: 25,
        },
        shop: ShopRule {
            gem_slots: 2,
            restock_base: 2,
            restock_step: 1,
            heal_price: 5,
            heal_amount: 10,
            discard_price: 2,
            upgrade_base: 4,
            upgrade_per_level: 2,
        },
    }
}

fn gem(id: &str, effect: GemEffect, cost: i64, proficiency: u8) -> GemDef {
    GemDef {
        id: id.to_string(),
        name: id.to_string(),
        color: GemColor::Red,
        cost,
        effect,
        power: 7,
        growth: 2,
        proficiency,
        price: 5,
        weight: 1,
    }
}

fn idle_enemy(hp: i64) -> EnemyDef {
    EnemyDef {
        id: "dummy".to_string(),
        name: "Dummy".to_string(),
        tier: 1,
        max_hp: hp,
        actions: vec![EnemyAction {
            kind: EnemyActionKind::Defend,
            amount: 1,
        }],
        witch: false,
    }
}

fn content(gem_def: GemDef, enemy: EnemyDef) -> Content {
    let class = ClassDef {
        id: "tester".to_string(),
        name: "Tester".to_string(),
        blurb: String::new(),
        max_hp: 30,
        stamina: 5,
        zenny: 20,
        favored_color: GemColor::Blue,
        gems: vec![gem_def.id.clone(); 3],
    };
    Content {
        gems: vec![gem_def],
        enemies: vec![enemy],
        classes: vec![class],
    }
}

fn battle_run(effect: GemEffect, proficiency: u8) -> (RunState, EventBus) {
    let content = content(gem("stone", effect, 1, proficiency), idle_enemy(50));
    let mut run = RunState::new(config(), content, "tester", 9).expect("new run");
    let mut events = EventBus::default();
    run.start_battle(&mut events).expect("start battle");
    run.state.hp = 10;
    (run, events)
}

fn enemy_hp_lost(run: &RunState) -> i64 {
    run.battle
        .as_ref()
        .map(|enemy| enemy.hp_max - enemy.hp)
        .unwrap_or(0)
}

fn player_hp(run: &RunState) -> i64 {
    run.state.hp
}

fn enemy_poison(run: &RunState) -> i64 {
    run.battle.as_ref().map(|enemy| enemy.poison).unwrap_or(0)
}

fn player_shield(run: &RunState) -> i64 {
    run.state.shield
}

macro_rules! sure_cast_case {
    ($name:ident, $effect:expr, $metric:ident) => {
        #[test]
        fn $name() {
            let (mut run, mut events) = battle_run($effect, 100);
            let before = $metric(&run);
            let play = run.play_gem(0, &mut events).expect("play");
            assert!(play.success);
            assert_eq!(play.amount, 7);
            assert_eq!($metric(&run) - before, 7);
            assert_eq!(run.state.stamina, 4);
            assert_eq!(run.state.gems_played, 1);
        }
    };
}

sure_cast_case!(damage_wounds_the_foe, GemEffect::Damage, enemy_hp_lost);
sure_cast_case!(heal_restores_player_hp, GemEffect::Heal, player_hp);
sure_cast_case!(poison_stacks_on_the_foe, GemEffect::Poison, enemy_poison);
sure_cast_case!(shield_raises_player_guard, GemEffect::Shield, player_shield);

macro_rules! fizzle_case {
    ($name:ident, $effect:expr, $metric:ident) => {
        #[test]
        fn $name() {
            let (mut run, mut events) = battle_run($effect, 0);
            let before = $metric(&run);
            let play = run.play_gem(0, &mut events).expect("play");
            assert!(!play.success);
            assert_eq!($metric(&run), before);
            assert_eq!(run.state.stamina, 4);
            assert_eq!(run.state.gems_fizzled, 1);
            assert_eq!(run.satchel.discard.len(), 1);
        }
    };
}

fizzle_case!(fizzled_damage_spends_but_misses, GemEffect::Damage, enemy_hp_lost);
fizzle_case!(fizzled_heal_spends_but_misses, GemEffect::Heal, player_hp);
fizzle_case!(fizzled_poison_spends_but_misses, GemEffect::Poison, enemy_poison);
fizzle_case!(fizzled_shield_spends_but_misses, GemEffect::Shield, player_shield);

#[test]
fn successful_cast_trains_the_gem() {
    let (mut run, mut events) = battle_run(GemEffect::Damage, 100);
    run.play_gem(0, &mut events).expect("play");
    let trained = run.satchel.discard.last().expect("discarded gem");
    assert_eq!(trained.proficiency, 105);
}

#[test]
fn fizzled_cast_leaves_proficiency_alone() {
    let (mut run, mut events) = battle_run(GemEffect::Damage, 0);
    run.play_gem(0, &mut events).expect("play");
    let gem = run.satchel.discard.last().expect("discarded gem");
    assert_eq!(gem.proficiency, 0);
}

#[test]
fn casting_needs_stamina() {
    let content = content(gem("boulder", GemEffect::Damage, 9, 100), idle_enemy(50));
    let mut run = RunState::new(config(), content, "tester", 9).expect("new run");
    let mut events = EventBus::default();
    run.start_battle(&mut events).expect("start battle");
    let err = run.play_gem(0, &mut events).expect_err("too costly");
    assert!(matches!(err, RunError::NotEnoughStamina));
    assert_eq!(run.hand.len(), 3);
}

#[test]
fn casting_needs_a_valid_hand_index() {
    let (mut run, mut events) = battle_run(GemEffect::Damage, 100);
    let err = run.play_gem(9, &mut events).expect_err("out of range");
    assert!(matches!(err, RunError::InvalidGemIndex));
}

#[test]
fn casting_outside_battle_is_rejected() {
    let content = content(gem("stone", GemEffect::Damage, 1, 100), idle_enemy(50));
    let mut run = RunState::new(config(), content, "tester", 9).expect("new run");
    let mut events = EventBus::default();
    let err = run.play_gem(0, &mut events).expect_err("no battle yet");
    assert!(matches!(err, RunError::InvalidStage(_)));
}

#[test]
fn upgraded_gems_hit_harder() {
    let (mut run, mut events) = battle_run(GemEffect::Damage, 100);
    for gem in &mut run.hand {
        gem.level = 3;
    }
    let play = run.play_gem(0, &mut events).expect("play");
    assert_eq!(play.amount, 11);
    assert_eq!(enemy_hp_lost(&run), 11);
}

#[test]
fn favored_color_raises_starting_proficiency() {
    let mut favored = gem("sapphire", GemEffect::Shield, 1, 80);
    favored.color = GemColor::Blue;
    let content = content(favored, idle_enemy(50));
    let run = RunState::new(config(), content, "tester", 9).expect("new run");
    assert!(run
        .satchel
        .draw
        .iter()
        .all(|instance| instance.proficiency == 90));
}

#[test]
fn unknown_class_is_reported() {
    let content = content(gem("stone", GemEffect::Damage, 1, 100), idle_enemy(50));
    let err = RunState::new(config(), content, "nobody", 9).expect_err("unknown class");
    assert!(matches!(err, RunError::UnknownClass(_)));
}
