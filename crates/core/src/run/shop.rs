use super::*;
use crate::*;

impl RunState {
    /// Open the shop after a won battle. The corpse is cleared, the satchel
    /// gathered so gems can be addressed by a single index, and the shelf
    /// stocked once for free.
    pub fn enter_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        if self.state.stage != Stage::Cleanup {
            return Err(RunError::BattleNotWon);
        }
        self.battle = None;
        let leftovers = std::mem::take(&mut self.hand);
        self.satchel.discard(leftovers);
        self.satchel.gather();
        let shop = ShopState::generate(&self.config.shop, &self.content, &mut self.rng);
        let offers = shop.offers.len();
        let restock_cost = shop.restock_cost;
        self.shop = Some(shop);
        self.state.stage = Stage::Shop;
        events.push(Event::ShopEntered {
            offers,
            restock_cost,
        });
        Ok(())
    }

    pub fn restock_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Shop)?;
        let cost = self
            .shop
            .as_ref()
            .ok_or(RunError::ShopNotAvailable)?
            .restock_cost;
        if self.state.zenny < cost {
            return Err(RunError::NotEnoughZenny);
        }
        self.state.zenny -= cost;
        let shop = self.shop.as_mut().ok_or(RunError::ShopNotAvailable)?;
        shop.restock(&self.config.shop, &self.content, &mut self.rng);
        let offers = shop.offers.len();
        events.push(Event::ShopRestocked {
            offers,
            cost,
            zenny: self.state.zenny,
        });
        Ok(())
    }

    pub fn buy_gem(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Shop)?;
        let shop = self.shop.as_mut().ok_or(RunError::ShopNotAvailable)?;
        let price = shop
            .offers
            .get(index)
            .map(|offer| offer.price)
            .ok_or(RunError::InvalidOfferIndex)?;
        if self.state.zenny < price {
            return Err(RunError::NotEnoughZenny);
        }
        let offer = shop.take_offer(index).ok_or(RunError::InvalidOfferIndex)?;
        self.state.zenny -= price;
        let def = self
            .content
            .gem_by_id(&offer.def_id)
            .ok_or_else(|| RunError::UnknownGem(offer.def_id.clone()))?
            .clone();
        let proficiency = self.starting_proficiency(&def);
        let id = self.alloc_gem_id();
        self.satchel.draw.push(GemInstance::new(id, &def, proficiency));
        events.push(Event::GemBought {
            gem: def.name,
            cost: price,
            zenny: self.state.zenny,
        });
        Ok(())
    }

    /// Pay the fee to throw a gem away for good. The satchel can never be
    /// emptied this way.
    pub fn discard_gem(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Shop)?;
        if index >= self.satchel.draw.len() {
            return Err(RunError::InvalidGemIndex);
        }
        if self.satchel.draw.len() <= 1 {
            return Err(RunError::LastGem);
        }
        let fee = self.config.shop.discard_price;
        if self.state.zenny < fee {
            return Err(RunError::NotEnoughZenny);
        }
        self.state.zenny -= fee;
        let gem = self.satchel.draw.remove(index);
        let name = self
            .content
            .gem_by_id(&gem.def_id)
            .map(|def| def.name.clone())
            .unwrap_or(gem.def_id);
        events.push(Event::GemDiscarded {
            gem: name,
            cost: fee,
            zenny: self.state.zenny,
        });
        Ok(())
    }

    pub fn upgrade_gem(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Shop)?;
        let gem = self
            .satchel
            .draw
            .get(index)
            .ok_or(RunError::InvalidGemIndex)?;
        if gem.level >= self.config.battle.max_gem_level {
            return Err(RunError::GemMaxLevel);
        }
        let price = self.config.upgrade_price(gem.level);
        if self.state.zenny < price {
            return Err(RunError::NotEnoughZenny);
        }
        self.state.zenny -= price;
        let gem = self
            .satchel
            .draw
            .get_mut(index)
            .ok_or(RunError::InvalidGemIndex)?;
        gem.level += 1;
        let level = gem.level;
        let def_id = gem.def_id.clone();
        let name = self
            .content
            .gem_by_id(&def_id)
            .map(|def| def.name.clone())
            .unwrap_or(def_id);
        events.push(Event::GemUpgraded {
            gem: name,
            level,
            cost: price,
            zenny: self.state.zenny,
        });
        Ok(())
    }

    pub fn buy_heal(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Shop)?;
        if self.state.hp >= self.state.hp_max {
            return Err(RunError::HealthFull);
        }
        let price = self.config.shop.heal_price;
        if self.state.zenny < price {
            return Err(RunError::NotEnoughZenny);
        }
        self.state.zenny -= price;
        let healed = self.state.heal(self.config.shop.heal_amount);
        events.push(Event::Healed {
            amount: healed,
            cost: price,
            hp: self.state.hp,
        });
        Ok(())
    }

    /// Close the shop. After Dawn and Dusk the run moves straight to the
    /// next battle; after Dark the day winds down at camp and savings pay
    /// interest once.
    pub fn leave_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_live()?;
        self.require_stage(Stage::Shop)?;
        self.shop = None;
        if self.state.phase == Phase::Dark {
            let interest = self.interest_earned();
            self.state.zenny += interest;
            self.state.stage = Stage::Camp;
            events.push(Event::CampEntered {
                interest,
                zenny: self.state.zenny,
            });
            return Ok(());
        }
        self.advance_phase()?;
        self.state.stage = Stage::Setup;
        Ok(())
    }

    fn interest_earned(&self) -> i64 {
        let economy = &self.config.economy;
        if economy.interest_step <= 0 || economy.interest_per <= 0 {
            return 0;
        }
        let steps = (self.state.zenny / economy.interest_step).max(0);
        let cap_steps = economy.interest_cap / economy.interest_per;
        steps.min(cap_steps) * economy.interest_per
    }
}
