use super::*;
use crate::*;

impl RunState {
    pub fn new(
        config: GameConfig,
        content: Content,
        class_id: &str,
        seed: u64,
    ) -> Result<Self, RunError> {
        let class = content
            .class_by_id(class_id)
            .ok_or_else(|| RunError::UnknownClass(class_id.to_string()))?
            .clone();
        let state = GameState::new(&class);
        let mut run = Self {
            config,
            content,
            rng: RngState::from_seed(seed),
            satchel: Satchel::default(),
            hand: Vec::new(),
            state,
            battle: None,
            shop: None,
            next_gem_id: 1,
        };
        for def_id in &class.gems {
            let def = run
                .content
                .gem_by_id(def_id)
                .ok_or_else(|| RunError::UnknownGem(def_id.clone()))?
                .clone();
            let proficiency = run.starting_proficiency(&def);
            let id = run.alloc_gem_id();
            run.satchel.draw.push(GemInstance::new(id, &def, proficiency));
        }
        Ok(run)
    }

    /// Base proficiency for a freshly acquired gem, with the class bonus
    /// for its favored color folded in.
    pub(super) fn starting_proficiency(&self, def: &GemDef) -> u8 {
        let mut proficiency = def.proficiency;
        if let Some(class) = self.content.class_by_id(&self.state.class_id) {
            if class.favored_color == def.color {
                proficiency = proficiency.saturating_add(self.config.proficiency.favored_bonus);
            }
        }
        proficiency.min(self.config.proficiency.max)
    }

    pub(super) fn alloc_gem_id(&mut self) -> u32 {
        let id = self.next_gem_id;
        self.next_gem_id = self.next_gem_id.saturating_add(1);
        id
    }

    pub(super) fn ensure_live(&self) -> Result<(), RunError> {
        if self.state.run_outcome.is_some() {
            return Err(RunError::RunOver);
        }
        Ok(())
    }

    pub(super) fn require_stage(&self, stage: Stage) -> Result<(), RunError> {
        if self.state.stage != stage {
            return Err(RunError::InvalidStage(self.state.stage));
        }
        Ok(())
    }

    pub fn gem_def(&self, instance: &GemInstance) -> Result<&GemDef, RunError> {
        self.content
            .gem_by_id(&instance.def_id)
            .ok_or_else(|| RunError::UnknownGem(instance.def_id.clone()))
    }

    /// How the current battle stands, if one is (or just was) on the field.
    pub fn battle_outcome(&self) -> Option<BattleOutcome> {
        if self.state.hp <= 0 {
            return Some(BattleOutcome::Lost);
        }
        match &self.battle {
            Some(enemy) if !enemy.is_alive() => Some(BattleOutcome::Won),
            _ => None,
        }
    }
}
