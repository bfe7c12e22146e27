use crate::{EnemyDef, GameConfig, GemEffect, Phase, RngState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnemyActionKind {
    Attack,
    Defend,
    Poison,
    Heal,
}

/// One entry in an enemy's scripted action queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnemyAction {
    pub kind: EnemyActionKind,
    pub amount: i64,
}

/// A spawned enemy. Stats and action amounts are fully scaled at spawn,
/// so battle math never consults the rules tables again.
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub def_id: String,
    pub name: String,
    pub witch: bool,
    pub hp: i64,
    pub hp_max: i64,
    pub shield: i64,
    pub poison: i64,
    pub reward: i64,
    pub actions: Vec<EnemyAction>,
    pub action_index: usize,
}

impl EnemyState {
    pub fn spawn(
        def: &EnemyDef,
        config: &GameConfig,
        day: u8,
        phase: Phase,
        rng: &mut RngState,
    ) -> Option<EnemyState> {
        let base_hp = config.enemy_hp_for(def.max_hp, day, phase)?;
        let variance = config.battle.hp_variance_pct;
        let swing = rng.pick_range(-variance, variance);
        let hp = (base_hp + base_hp * swing / 100).max(1);
        let mut actions = Vec::with_capacity(def.actions.len());
        for action in &def.actions {
            let amount = config.enemy_amount_for(action.amount, day, phase)?;
            actions.push(EnemyAction {
                kind: action.kind,
                amount,
            });
        }
        let reward = config.victory_reward(day, phase)?;
        Some(EnemyState {
            def_id: def.id.clone(),
            name: def.name.clone(),
            witch: def.witch,
            hp,
            hp_max: hp,
            shield: 0,
            poison: 0,
            reward,
            actions,
            action_index: 0,
        })
    }

    /// The action the enemy will take on its next turn.
    pub fn next_action(&self) -> Option<&EnemyAction> {
        self.actions.get(self.action_index)
    }

    /// The action after the next one, for frontends that telegraph ahead.
    pub fn following_action(&self) -> Option<&EnemyAction> {
        if self.actions.is_empty() {
            return None;
        }
        self.actions.get((self.action_index + 1) % self.actions.len())
    }

    pub(crate) fn advance_action(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        self.action_index = (self.action_index + 1) % self.actions.len();
    }

    /// Damage routed through the shield first. Returns what reached hit points.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let absorbed = self.shield.min(amount);
        self.shield -= absorbed;
        let through = amount - absorbed;
        self.hp = (self.hp - through).max(0);
        through
    }

    pub fn heal(&mut self, amount: i64) -> i64 {
        let healed = amount.min(self.hp_max - self.hp).max(0);
        self.hp += healed;
        healed
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// How a finished battle ended, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// What a single gem cast did, for frontends to summarize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemPlay {
    pub gem: String,
    pub effect: GemEffect,
    pub amount: i64,
    pub success: bool,
}
