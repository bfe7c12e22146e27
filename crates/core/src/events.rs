use crate::{EnemyActionKind, GemEffect, Phase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusTarget {
    Player,
    Enemy,
}

/// Everything observable that the rules do, in the order it happened.
/// Payloads carry display-ready names so frontends never need lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    BattleStarted {
        day: u8,
        phase: Phase,
        enemy: String,
        hp: i64,
    },
    HandDrawn { count: usize },
    GemPlayed {
        gem: String,
        effect: GemEffect,
        amount: i64,
        success: bool,
        stamina_left: i64,
    },
    TurnEnded { turn: u32 },
    EnemyActed {
        enemy: String,
        kind: EnemyActionKind,
        amount: i64,
    },
    PoisonTick {
        target: StatusTarget,
        amount: i64,
        hp: i64,
    },
    BattleWon {
        enemy: String,
        reward: i64,
        zenny: i64,
    },
    ShopEntered { offers: usize, restock_cost: i64 },
    ShopRestocked {
        offers: usize,
        cost: i64,
        zenny: i64,
    },
    GemBought {
        gem: String,
        cost: i64,
        zenny: i64,
    },
    GemDiscarded {
        gem: String,
        cost: i64,
        zenny: i64,
    },
    GemUpgraded {
        gem: String,
        level: u32,
        cost: i64,
        zenny: i64,
    },
    Healed {
        amount: i64,
        cost: i64,
        hp: i64,
    },
    CampEntered { interest: i64, zenny: i64 },
    CampRested { healed: i64, hp: i64 },
    CampTrained { gem: String, proficiency: u8 },
    DayStarted { day: u8 },
    RunEnded {
        victory: bool,
        day: u8,
        meta: i64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
