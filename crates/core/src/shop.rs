use crate::{Content, RngState, ShopRule};

/// A gem waiting on the shop shelf.
#[derive(Debug, Clone)]
pub struct GemOffer {
    pub def_id: String,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone)]
pub struct ShopState {
    pub offers: Vec<GemOffer>,
    pub restock_cost: i64,
}

impl ShopState {
    pub fn generate(rule: &ShopRule, content: &Content, rng: &mut RngState) -> Self {
        Self {
            offers: generate_offers(rule, content, rng),
            restock_cost: rule.restock_base,
        }
    }

    /// Replace the shelf with fresh picks. Each restock costs more than the last.
    pub fn restock(&mut self, rule: &ShopRule, content: &Content, rng: &mut RngState) {
        self.offers = generate_offers(rule, content, rng);
        self.restock_cost += rule.restock_step;
    }

    pub fn take_offer(&mut self, index: usize) -> Option<GemOffer> {
        if index < self.offers.len() {
            Some(self.offers.remove(index))
        } else {
            None
        }
    }
}

fn generate_offers(rule: &ShopRule, content: &Content, rng: &mut RngState) -> Vec<GemOffer> {
    let mut offers = Vec::new();
    for _ in 0..rule.gem_slots {
        if let Some(def) = content.pick_gem(rng) {
            offers.push(GemOffer {
                def_id: def.id.clone(),
                name: def.name.clone(),
                price: def.price,
            });
        }
    }
    offers
}
