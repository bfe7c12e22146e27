use crate::{EnemyAction, GemColor, GemDef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub tier: u8,
    pub max_hp: i64,
    pub actions: Vec<EnemyAction>,
    #[serde(default)]
    pub witch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    pub id: String,
    pub name: String,
    pub blurb: String,
    pub max_hp: i64,
    pub stamina: i64,
    pub zenny: i64,
    pub favored_color: GemColor,
    pub gems: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Content {
    pub gems: Vec<GemDef>,
    pub enemies: Vec<EnemyDef>,
    pub classes: Vec<ClassDef>,
}

impl Content {
    pub fn gem_by_id(&self, id: &str) -> Option<&GemDef> {
        self.gems.iter().find(|gem| gem.id == id)
    }

    pub fn enemy_by_id(&self, id: &str) -> Option<&EnemyDef> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn class_by_id(&self, id: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|class| class.id == id)
    }

    /// Weighted pick over the whole gem pool. Zero-weight gems never show up.
    pub fn pick_gem<'a>(&'a self, rng: &mut crate::RngState) -> Option<&'a GemDef> {
        pick_weighted(self.gems.iter().map(|gem| (gem, gem.weight)), rng)
    }

    /// Uniform pick among ordinary enemies of a tier. Witches never spawn here.
    pub fn pick_enemy<'a>(&'a self, tier: u8, rng: &mut crate::RngState) -> Option<&'a EnemyDef> {
        let indices: Vec<usize> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.tier == tier && !enemy.witch)
            .map(|(idx, _)| idx)
            .collect();
        pick_index(&indices, rng).map(|idx| &self.enemies[idx])
    }

    pub fn pick_witch<'a>(&'a self, rng: &mut crate::RngState) -> Option<&'a EnemyDef> {
        let indices: Vec<usize> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.witch)
            .map(|(idx, _)| idx)
            .collect();
        pick_index(&indices, rng).map(|idx| &self.enemies[idx])
    }
}

fn pick_weighted<T>(
    items: impl Iterator<Item = (T, u32)>,
    rng: &mut crate::RngState,
) -> Option<T> {
    let pool: Vec<(T, u32)> = items.filter(|(_, weight)| *weight > 0).collect();
    let total: u64 = pool.iter().map(|(_, weight)| u64::from(*weight)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.next_u64() % total;
    for (item, weight) in pool {
        let weight = u64::from(weight);
        if roll < weight {
            return Some(item);
        }
        roll -= weight;
    }
    None
}

fn pick_index(items: &[usize], rng: &mut crate::RngState) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let idx = (rng.next_u64() % items.len() as u64) as usize;
    items.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnemyActionKind, GemEffect, RngState};

    fn gem(id: &str, weight: u32) -> GemDef {
        GemDef {
            id: id.to_string(),
            name: id.to_string(),
            color: GemColor::Red,
            cost: 1,
            effect: GemEffect::Damage,
            power: 5,
            growth: 2,
            proficiency: 70,
            price: 4,
            weight,
        }
    }

    fn enemy(id: &str, tier: u8, witch: bool) -> EnemyDef {
        EnemyDef {
            id: id.to_string(),
            name: id.to_string(),
            tier,
            max_hp: 10,
            actions: vec![EnemyAction {
                kind: EnemyActionKind::Attack,
                amount: 3,
            }],
            witch,
        }
    }

    fn content() -> Content {
        Content {
            gems: vec![gem("ember", 0), gem("frost", 5)],
            enemies: vec![
                enemy("rat", 1, false),
                enemy("wolf", 1, false),
                enemy("knight", 2, false),
                enemy("witch", 3, true),
            ],
            classes: Vec::new(),
        }
    }

    #[test]
    fn lookups_find_by_id() {
        let content = content();
        assert!(content.gem_by_id("frost").is_some());
        assert!(content.gem_by_id("opal").is_none());
        assert!(content.enemy_by_id("witch").is_some());
    }

    #[test]
    fn zero_weight_gems_never_offered() {
        let content = content();
        let mut rng = RngState::from_seed(7);
        for _ in 0..40 {
            let picked = content.pick_gem(&mut rng).expect("pick");
            assert_eq!(picked.id, "frost");
        }
    }

    #[test]
    fn enemy_pick_respects_tier_and_skips_witch() {
        let content = content();
        let mut rng = RngState::from_seed(7);
        for _ in 0..40 {
            let picked = content.pick_enemy(1, &mut rng).expect("pick");
            assert_eq!(picked.tier, 1);
            assert!(!picked.witch);
        }
        assert!(content.pick_enemy(3, &mut rng).is_none());
        assert_eq!(content.pick_witch(&mut rng).map(|e| e.id.as_str()), Some("witch"));
    }
}
