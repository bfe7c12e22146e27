use anyhow::{bail, Context};
use gemwitch_core::{
    BattleRule, CampRule, ClassDef, Content, DayRule, EconomyRule, EnemyDef, GameConfig, GemDef,
    Phase, PhaseRule, ProficiencyRule, ShopRule,
};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load the rule tables from the asset directory, one file per table.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let phases: Vec<PhaseRule> = load_json(dir.join("phases.json"))?;
    let days: Vec<DayRule> = load_json(dir.join("days.json"))?;
    let battle: BattleRule = load_json(dir.join("battle.json"))?;
    let proficiency: ProficiencyRule = load_json(dir.join("proficiency.json"))?;
    let camp: CampRule = load_json(dir.join("camp.json"))?;
    let economy: EconomyRule = load_json(dir.join("economy.json"))?;
    let shop: ShopRule = load_json(dir.join("shop.json"))?;

    Ok(GameConfig {
        phases,
        days,
        battle,
        proficiency,
        camp,
        economy,
        shop,
    })
}

/// Load the gem, enemy and class definitions from `<dir>/content/`.
pub fn load_content(dir: &Path) -> anyhow::Result<Content> {
    let base = dir.join("content");
    let gems: Vec<GemDef> = load_json(base.join("gems.json"))?;
    let enemies: Vec<EnemyDef> = load_json(base.join("enemies.json"))?;
    let classes: Vec<ClassDef> = load_json(base.join("classes.json"))?;
    Ok(Content {
        gems,
        enemies,
        classes,
    })
}

/// Load everything a run needs and refuse data a run could dead-end on.
pub fn load_assets(dir: &Path) -> anyhow::Result<(GameConfig, Content)> {
    let config = load_game_config(dir)?;
    let content = load_content(dir)?;
    validate(&config, &content)?;
    Ok((config, content))
}

/// Cross-check the rule tables against the content. Every stage a run can
/// reach must be able to produce a battle, and every id reference must
/// resolve.
pub fn validate(config: &GameConfig, content: &Content) -> anyhow::Result<()> {
    if config.battle.hand_size == 0 {
        bail!("battle.hand_size must be at least 1");
    }
    if config.battle.max_gem_level == 0 {
        bail!("battle.max_gem_level must be at least 1");
    }
    for phase in [Phase::Dawn, Phase::Dusk, Phase::Dark] {
        if config.phase_rule(phase).is_none() {
            bail!("no rule for phase {:?}", phase);
        }
    }
    let Some(last) = config.last_day() else {
        bail!("day table is empty");
    };
    for day in 1..=last {
        if config.day_rule(day).is_none() {
            bail!("day table skips day {}", day);
        }
    }
    if !config.days.iter().any(|rule| rule.witch) {
        bail!("no witch day in the day table");
    }

    if content.gems.is_empty() {
        bail!("no gems defined");
    }
    let mut gem_ids = HashSet::new();
    for gem in &content.gems {
        if gem.id.trim().is_empty() {
            bail!("gem id cannot be empty");
        }
        if !gem_ids.insert(gem.id.as_str()) {
            bail!("duplicate gem id {}", gem.id);
        }
    }
    if !content.gems.iter().any(|gem| gem.weight > 0) {
        bail!("every gem has weight 0, the shop cannot stock");
    }

    let mut enemy_ids = HashSet::new();
    for enemy in &content.enemies {
        if enemy.id.trim().is_empty() {
            bail!("enemy id cannot be empty");
        }
        if !enemy_ids.insert(enemy.id.as_str()) {
            bail!("duplicate enemy id {}", enemy.id);
        }
        if enemy.actions.is_empty() {
            bail!("enemy {} has no actions", enemy.id);
        }
    }
    if !content.enemies.iter().any(|enemy| enemy.witch) {
        bail!("no witch enemy defined");
    }
    for rule in &config.phases {
        let found = content
            .enemies
            .iter()
            .any(|enemy| enemy.tier == rule.tier && !enemy.witch);
        if !found {
            bail!("no tier {} enemy for phase {:?}", rule.tier, rule.phase);
        }
    }

    if content.classes.is_empty() {
        bail!("no classes defined");
    }
    let mut class_ids = HashSet::new();
    for class in &content.classes {
        if class.id.trim().is_empty() {
            bail!("class id cannot be empty");
        }
        if !class_ids.insert(class.id.as_str()) {
            bail!("duplicate class id {}", class.id);
        }
        if class.max_hp <= 0 {
            bail!("class {} has no health", class.id);
        }
        if class.stamina <= 0 {
            bail!("class {} has no stamina", class.id);
        }
        if class.gems.is_empty() {
            bail!("class {} starts with no gems", class.id);
        }
        for gem_id in &class.gems {
            if content.gem_by_id(gem_id).is_none() {
                bail!("class {} references unknown gem {}", class.id, gem_id);
            }
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
