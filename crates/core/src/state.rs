use crate::ClassDef;
use serde::{Deserialize, Serialize};

/// Time of day. Each day holds three battles, one per phase, with the
/// Dark phase drawing from a harder enemy pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Dawn,
    Dusk,
    Dark,
}

/// Where the run currently sits between player decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Battle,
    Cleanup,
    Shop,
    Camp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub day: u8,
    pub phase: Phase,
    pub stage: Stage,
    pub class_id: String,
    pub hp: i64,
    pub hp_max: i64,
    pub stamina: i64,
    pub stamina_max: i64,
    pub shield: i64,
    pub poison: i64,
    pub zenny: i64,
    pub turn: u32,
    #[serde(default)]
    pub battles_won: u32,
    #[serde(default)]
    pub gems_played: u32,
    #[serde(default)]
    pub gems_fizzled: u32,
    #[serde(default)]
    pub run_outcome: Option<RunOutcome>,
    #[serde(default)]
    pub meta_earned: i64,
}

impl GameState {
    pub fn new(class: &ClassDef) -> Self {
        Self {
            day: 1,
            phase: Phase::Dawn,
            stage: Stage::Setup,
            class_id: class.id.clone(),
            hp: class.max_hp,
            hp_max: class.max_hp,
            stamina: class.stamina,
            stamina_max: class.stamina,
            shield: 0,
            poison: 0,
            zenny: class.zenny,
            turn: 0,
            battles_won: 0,
            gems_played: 0,
            gems_fizzled: 0,
            run_outcome: None,
            meta_earned: 0,
        }
    }

    /// Damage routed through the shield first. Returns what reached hit points.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let absorbed = self.shield.min(amount);
        self.shield -= absorbed;
        let through = amount - absorbed;
        self.hp = (self.hp - through).max(0);
        through
    }

    /// Heal capped at `hp_max`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let healed = amount.min(self.hp_max - self.hp).max(0);
        self.hp += healed;
        healed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GemColor;

    fn class() -> ClassDef {
        ClassDef {
            id: "tester".to_string(),
            name: "Tester".to_string(),
            blurb: String::new(),
            max_hp: 30,
            stamina: 3,
            zenny: 8,
            favored_color: GemColor::Red,
            gems: vec!["pebble".to_string()],
        }
    }

    #[test]
    fn new_state_starts_at_dawn() {
        let state = GameState::new(&class());
        assert_eq!(state.day, 1);
        assert_eq!(state.phase, Phase::Dawn);
        assert_eq!(state.stage, Stage::Setup);
        assert_eq!(state.hp, 30);
        assert_eq!(state.stamina, 3);
        assert_eq!(state.zenny, 8);
        assert!(state.run_outcome.is_none());
    }

    #[test]
    fn shield_absorbs_before_hp() {
        let mut state = GameState::new(&class());
        state.shield = 4;
        let through = state.take_damage(6);
        assert_eq!(through, 2);
        assert_eq!(state.shield, 0);
        assert_eq!(state.hp, 28);
    }

    #[test]
    fn damage_never_drops_hp_below_zero() {
        let mut state = GameState::new(&class());
        state.take_damage(100);
        assert_eq!(state.hp, 0);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut state = GameState::new(&class());
        state.hp = 25;
        assert_eq!(state.heal(10), 5);
        assert_eq!(state.hp, 30);
        assert_eq!(state.heal(10), 0);
    }
}
