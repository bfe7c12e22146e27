use super::*;
use crate::*;

impl RunState {
    /// Spawn the enemy for the current day and phase and open the battle.
    /// Witch days replace the Dark battle with the witch herself.
    pub fn start_battle(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Setup)?;
        let day = self.state.day;
        let phase = self.state.phase;
        let day_rule = self
            .config
            .day_rule(day)
            .ok_or(RunError::MissingDayRule(day))?;
        let tier = self
            .config
            .phase_rule(phase)
            .ok_or(RunError::MissingPhaseRule(phase))?
            .tier;
        let witch_battle = day_rule.witch && phase == Phase::Dark;
        let def = if witch_battle {
            self.content.pick_witch(&mut self.rng).ok_or(RunError::NoWitch)?
        } else {
            self.content
                .pick_enemy(tier, &mut self.rng)
                .ok_or(RunError::NoEnemyForTier(tier))?
        }
        .clone();
        let enemy = EnemyState::spawn(&def, &self.config, day, phase, &mut self.rng)
            .ok_or(RunError::MissingPhaseRule(phase))?;

        self.state.stamina = self.state.stamina_max;
        self.state.shield = 0;
        self.state.poison = 0;
        self.state.turn = 1;
        let leftovers = std::mem::take(&mut self.hand);
        self.satchel.discard(leftovers);
        self.shop = None;
        self.satchel.gather();
        self.satchel.shuffle(&mut self.rng);

        let name = enemy.name.clone();
        let hp = enemy.hp;
        self.battle = Some(enemy);
        self.state.stage = Stage::Battle;
        events.push(Event::BattleStarted {
            day,
            phase,
            enemy: name,
            hp,
        });
        self.draw_hand(events);
        Ok(())
    }

    /// Cast the gem at `index` in the hand. Stamina is spent and the gem
    /// goes to the discard pile whether or not the cast lands; only a
    /// successful cast applies the effect and trains proficiency.
    pub fn play_gem(&mut self, index: usize, events: &mut EventBus) -> Result<GemPlay, RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Battle)?;
        if self.battle.is_none() {
            return Err(RunError::NoBattle);
        }
        let instance = self.hand.get(index).ok_or(RunError::InvalidGemIndex)?;
        let def = self.gem_def(instance)?.clone();
        if def.cost > self.state.stamina {
            return Err(RunError::NotEnoughStamina);
        }
        self.state.stamina -= def.cost;
        let mut gem = self.hand.remove(index);
        let amount = def.amount_at(gem.level);
        let success = self.rng.roll_percent(gem.proficiency);
        if success {
            self.apply_gem_effect(def.effect, amount);
            gem.train(
                self.config.proficiency.gain_on_success,
                self.config.proficiency.max,
            );
            self.state.gems_played = self.state.gems_played.saturating_add(1);
        } else {
            self.state.gems_fizzled = self.state.gems_fizzled.saturating_add(1);
        }
        self.satchel.discard(vec![gem]);
        events.push(Event::GemPlayed {
            gem: def.name.clone(),
            effect: def.effect,
            amount,
            success,
            stamina_left: self.state.stamina,
        });
        self.check_victory(events);
        Ok(GemPlay {
            gem: def.name,
            effect: def.effect,
            amount,
            success,
        })
    }

    /// Close the player's turn: unplayed gems are discarded, the enemy
    /// resolves its queued action, then upkeep runs and a new hand is drawn.
    pub fn end_turn(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Battle)?;
        if self.battle.is_none() {
            return Err(RunError::NoBattle);
        }
        let leftovers = std::mem::take(&mut self.hand);
        self.satchel.discard(leftovers);
        events.push(Event::TurnEnded {
            turn: self.state.turn,
        });

        self.enemy_turn(events);
        if self.state.run_outcome.is_some() || self.state.stage != Stage::Battle {
            return Ok(());
        }

        // player upkeep: shield fades, poison bites, stamina returns
        self.state.shield = 0;
        if self.state.poison > 0 {
            let bite = self.state.poison;
            self.state.hp = (self.state.hp - bite).max(0);
            self.state.poison -= 1;
            events.push(Event::PoisonTick {
                target: StatusTarget::Player,
                amount: bite,
                hp: self.state.hp,
            });
            if self.state.hp == 0 {
                self.end_run(RunOutcome::Defeat, events);
                return Ok(());
            }
        }
        self.state.stamina = self.state.stamina_max;
        self.state.turn = self.state.turn.saturating_add(1);
        self.draw_hand(events);
        Ok(())
    }

    /// Move to the next battle slot: Dawn to Dusk to Dark within a day,
    /// Dark rolling over to the next day's Dawn.
    pub(super) fn advance_phase(&mut self) -> Result<(), RunError> {
        let (next_day, next_phase) = match self.state.phase {
            Phase::Dawn => (self.state.day, Phase::Dusk),
            Phase::Dusk => (self.state.day, Phase::Dark),
            Phase::Dark => (self.state.day.saturating_add(1), Phase::Dawn),
        };
        if self.config.day_rule(next_day).is_none() {
            return Err(RunError::MissingDayRule(next_day));
        }
        self.state.day = next_day;
        self.state.phase = next_phase;
        Ok(())
    }

    fn draw_hand(&mut self, events: &mut EventBus) {
        let want = self.config.battle.hand_size;
        if self.satchel.draw.len() < want {
            self.satchel.reshuffle_discard(&mut self.rng);
        }
        let mut gems = self.satchel.draw_gems(want);
        let count = gems.len();
        self.hand.append(&mut gems);
        events.push(Event::HandDrawn { count });
    }

    fn apply_gem_effect(&mut self, effect: GemEffect, amount: i64) {
        match effect {
            GemEffect::Damage => {
                if let Some(enemy) = self.battle.as_mut() {
                    enemy.take_damage(amount);
                }
            }
            GemEffect::Heal => {
                self.state.heal(amount);
            }
            GemEffect::Poison => {
                if let Some(enemy) = self.battle.as_mut() {
                    enemy.poison += amount;
                }
            }
            GemEffect::Shield => {
                self.state.shield += amount;
            }
        }
    }

    /// The enemy's half of the turn. Its shield drops, its poison ticks,
    /// then the next queued action resolves in array order.
    fn enemy_turn(&mut self, events: &mut EventBus) {
        let mut poison_tick = None;
        let mut acted = None;
        if let Some(enemy) = self.battle.as_mut() {
            enemy.shield = 0;
            if enemy.poison > 0 {
                let bite = enemy.poison;
                enemy.hp = (enemy.hp - bite).max(0);
                enemy.poison -= 1;
                poison_tick = Some((bite, enemy.hp));
            }
            if enemy.is_alive() {
                if let Some(action) = enemy.next_action().cloned() {
                    enemy.advance_action();
                    acted = Some((action, enemy.name.clone()));
                }
            }
        }
        if let Some((bite, hp)) = poison_tick {
            events.push(Event::PoisonTick {
                target: StatusTarget::Enemy,
                amount: bite,
                hp,
            });
        }
        let Some((action, name)) = acted else {
            // poison finished the foe before it could act
            self.check_victory(events);
            return;
        };
        match action.kind {
            EnemyActionKind::Attack => {
                self.state.take_damage(action.amount);
            }
            EnemyActionKind::Defend => {
                if let Some(enemy) = self.battle.as_mut() {
                    enemy.shield += action.amount;
                }
            }
            EnemyActionKind::Poison => {
                self.state.poison += action.amount;
            }
            EnemyActionKind::Heal => {
                if let Some(enemy) = self.battle.as_mut() {
                    enemy.heal(action.amount);
                }
            }
        }
        events.push(Event::EnemyActed {
            enemy: name,
            kind: action.kind,
            amount: action.amount,
        });
        if self.state.hp == 0 {
            self.end_run(RunOutcome::Defeat, events);
        }
    }

    /// Settle the battle if the enemy just died. Pays the reward, moves to
    /// Cleanup, and ends the whole run when the dead enemy was the witch.
    pub(super) fn check_victory(&mut self, events: &mut EventBus) {
        let Some(enemy) = self.battle.as_ref() else {
            return;
        };
        if enemy.is_alive() {
            return;
        }
        let name = enemy.name.clone();
        let reward = enemy.reward;
        let witch = enemy.witch;
        self.state.zenny += reward;
        self.state.battles_won = self.state.battles_won.saturating_add(1);
        self.state.stage = Stage::Cleanup;
        events.push(Event::BattleWon {
            enemy: name,
            reward,
            zenny: self.state.zenny,
        });
        if witch {
            self.end_run(RunOutcome::Victory, events);
        }
    }

    pub(super) fn end_run(&mut self, outcome: RunOutcome, events: &mut EventBus) {
        let victory = outcome == RunOutcome::Victory;
        let meta = self.meta_for_run(victory);
        self.state.run_outcome = Some(outcome);
        self.state.meta_earned = meta;
        events.push(Event::RunEnded {
            victory,
            day: self.state.day,
            meta,
        });
    }

    /// Meta zenny banked for the profile: a trickle per day survived plus
    /// a bonus for actually slaying the witch.
    fn meta_for_run(&self, victory: bool) -> i64 {
        let economy = &self.config.economy;
        let mut meta = economy.meta_per_day * i64::from(self.state.day);
        if victory {
            meta += economy.meta_victory_bonus;
        }
        meta.max(0)
    }
}
