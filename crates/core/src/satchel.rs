use crate::{GemInstance, RngState};

/// The gems a run owns, split into a draw pile and a discard pile.
#[derive(Debug, Default, Clone)]
pub struct Satchel {
    pub draw: Vec<GemInstance>,
    pub discard: Vec<GemInstance>,
}

impl Satchel {
    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_gems(&mut self, count: usize) -> Vec<GemInstance> {
        let mut gems = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(gem) = self.draw.pop() {
                gems.push(gem);
            } else {
                break;
            }
        }
        gems
    }

    pub fn discard(&mut self, mut gems: Vec<GemInstance>) {
        self.discard.append(&mut gems);
    }

    pub fn reshuffle_discard(&mut self, rng: &mut RngState) {
        if self.discard.is_empty() {
            return;
        }
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }

    /// Fold the discard pile back into draw without shuffling. Shop and
    /// camp operations index the collection through `draw` afterwards.
    pub fn gather(&mut self) {
        self.draw.append(&mut self.discard);
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
