use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GemColor {
    Red,
    Blue,
    Green,
    Purple,
}

/// What a gem does when it lands. Exactly one effect per gem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GemEffect {
    Damage,
    Heal,
    Poison,
    Shield,
}

/// A gem as content defines it: stamina cost, one effect, and how the
/// effect amount grows with upgrade levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GemDef {
    pub id: String,
    pub name: String,
    pub color: GemColor,
    pub cost: i64,
    pub effect: GemEffect,
    pub power: i64,
    pub growth: i64,
    pub proficiency: u8,
    pub price: i64,
    pub weight: u32,
}

impl GemDef {
    /// Effect amount at a given level. Level 1 is the base `power`.
    pub fn amount_at(&self, level: u32) -> i64 {
        self.power + self.growth * i64::from(level.saturating_sub(1))
    }
}

/// One gem owned during a run. Level and proficiency stick with the
/// instance for the whole run, not with the definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GemInstance {
    pub id: u32,
    pub def_id: String,
    pub level: u32,
    pub proficiency: u8,
}

impl GemInstance {
    pub fn new(id: u32, def: &GemDef, proficiency: u8) -> Self {
        Self {
            id,
            def_id: def.id.clone(),
            level: 1,
            proficiency,
        }
    }

    /// Raise proficiency by `gain`, never past `cap`.
    pub fn train(&mut self, gain: u8, cap: u8) {
        self.proficiency = self.proficiency.saturating_add(gain).min(cap);
    }
}
