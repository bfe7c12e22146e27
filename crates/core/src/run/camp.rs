use super::*;
use crate::*;

impl RunState {
    /// Sleep the night away, healing a share of max hp, then break camp.
    pub fn camp_rest(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Camp)?;
        let heal = self.state.hp_max * self.config.camp.rest_heal_pct / 100;
        let healed = self.state.heal(heal);
        events.push(Event::CampRested {
            healed,
            hp: self.state.hp,
        });
        self.break_camp(events)
    }

    /// Spend the night drilling one gem instead of sleeping. Training is
    /// the only way to raise proficiency without a successful cast.
    pub fn camp_train(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Camp)?;
        let cap = self.config.proficiency.max;
        let gain = self.config.camp.train_gain;
        let gem = self
            .satchel
            .draw
            .get_mut(index)
            .ok_or(RunError::InvalidGemIndex)?;
        gem.train(gain, cap);
        let proficiency = gem.proficiency;
        let def_id = gem.def_id.clone();
        let name = self
            .content
            .gem_by_id(&def_id)
            .map(|def| def.name.clone())
            .unwrap_or(def_id);
        events.push(Event::CampTrained {
            gem: name,
            proficiency,
        });
        self.break_camp(events)
    }

    fn break_camp(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.advance_phase()?;
        self.state.stage = Stage::Setup;
        events.push(Event::DayStarted {
            day: self.state.day,
        });
        Ok(())
    }
}
