use crate::Phase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRule {
    pub phase: Phase,
    pub tier: u8,
    pub hp_mult: f32,
    pub damage_mult: f32,
    pub reward_base: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRule {
    pub day: u8,
    pub hp_mult: f32,
    pub damage_mult: f32,
    pub reward_mult: f32,
    /// The witch replaces the Dark battle on days marked with this.
    #[serde(default)]
    pub witch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRule {
    pub hand_size: usize,
    pub max_gem_level: u32,
    pub hp_variance_pct: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProficiencyRule {
    pub gain_on_success: u8,
    pub max: u8,
    pub favored_bonus: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampRule {
    pub rest_heal_pct: i64,
    pub train_gain: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyRule {
    pub interest_step: i64,
    pub interest_per: i64,
    pub interest_cap: i64,
    pub meta_per_day: i64,
    pub meta_victory_bonus: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRule {
    pub gem_slots: u8,
    pub restock_base: i64,
    pub restock_step: i64,
    pub heal_price: i64,
    pub heal_amount: i64,
    pub discard_price: i64,
    pub upgrade_base: i64,
    pub upgrade_per_level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub phases: Vec<PhaseRule>,
    pub days: Vec<DayRule>,
    pub battle: BattleRule,
    pub proficiency: ProficiencyRule,
    pub camp: CampRule,
    pub economy: EconomyRule,
    pub shop: ShopRule,
}

impl GameConfig {
    pub fn phase_rule(&self, phase: Phase) -> Option<&PhaseRule> {
        self.phases.iter().find(|rule| rule.phase == phase)
    }

    pub fn day_rule(&self, day: u8) -> Option<&DayRule> {
        self.days.iter().find(|rule| rule.day == day)
    }

    pub fn last_day(&self) -> Option<u8> {
        self.days.iter().map(|rule| rule.day).max()
    }

    /// Enemy hit points after day and phase scaling, before spawn variance.
    pub fn enemy_hp_for(&self, base: i64, day: u8, phase: Phase) -> Option<i64> {
        let day_rule = self.day_rule(day)?;
        let phase_rule = self.phase_rule(phase)?;
        let scaled = base as f32 * day_rule.hp_mult * phase_rule.hp_mult;
        Some((scaled.round() as i64).max(1))
    }

    /// Enemy action amount after day and phase scaling, never below 1.
    pub fn enemy_amount_for(&self, base: i64, day: u8, phase: Phase) -> Option<i64> {
        let day_rule = self.day_rule(day)?;
        let phase_rule = self.phase_rule(phase)?;
        let scaled = base as f32 * day_rule.damage_mult * phase_rule.damage_mult;
        Some((scaled.round() as i64).max(1))
    }

    pub fn victory_reward(&self, day: u8, phase: Phase) -> Option<i64> {
        let day_rule = self.day_rule(day)?;
        let phase_rule = self.phase_rule(phase)?;
        Some((phase_rule.reward_base as f32 * day_rule.reward_mult).round() as i64)
    }

    pub fn upgrade_price(&self, level: u32) -> i64 {
        self.shop.upgrade_base + self.shop.upgrade_per_level * i64::from(level.saturating_sub(1))
    }
}
