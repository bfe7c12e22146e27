use crate::{
    Content, EnemyState, GameConfig, GameState, GemInstance, Phase, RngState, Satchel, ShopState,
    Stage,
};
use thiserror::Error;

mod battle;
mod camp;
mod shop;
mod state;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("missing config for phase {0:?}")]
    MissingPhaseRule(Phase),
    #[error("missing config for day {0}")]
    MissingDayRule(u8),
    #[error("invalid stage: {0:?}")]
    InvalidStage(Stage),
    #[error("the run is already over")]
    RunOver,
    #[error("no battle in progress")]
    NoBattle,
    #[error("battle not won")]
    BattleNotWon,
    #[error("invalid gem index")]
    InvalidGemIndex,
    #[error("invalid shop offer index")]
    InvalidOfferIndex,
    #[error("not enough zenny")]
    NotEnoughZenny,
    #[error("not enough stamina")]
    NotEnoughStamina,
    #[error("gem already at max level")]
    GemMaxLevel,
    #[error("health already full")]
    HealthFull,
    #[error("cannot discard the last gem")]
    LastGem,
    #[error("shop not available")]
    ShopNotAvailable,
    #[error("unknown class {0}")]
    UnknownClass(String),
    #[error("unknown gem {0}")]
    UnknownGem(String),
    #[error("no enemy defined for tier {0}")]
    NoEnemyForTier(u8),
    #[error("no witch defined")]
    NoWitch,
}

/// One whole run, from class pick to victory or defeat. All mutation goes
/// through the operation methods in the `run` submodules; every operation
/// checks the stage first and reports what it did on the event bus.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub content: Content,
    pub rng: RngState,
    pub satchel: Satchel,
    pub hand: Vec<GemInstance>,
    pub state: GameState,
    pub battle: Option<EnemyState>,
    pub shop: Option<ShopState>,
    next_gem_id: u32,
}
