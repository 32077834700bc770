//! Drop events and drop-table rolling.

use rand::Rng;

use crate::species_registry::DropEntry;

/// A transient item yield from a gather or a kill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub item_type: String,
    pub amount: u32,
}

impl DropEvent {
    pub fn new(item_type: impl Into<String>, amount: u32) -> Self {
        Self {
            item_type: item_type.into(),
            amount,
        }
    }
}

/// Roll every entry independently against its drop chance.
///
/// A kill can yield none, some, or all of the listed drops.
pub fn roll_drops(table: &[DropEntry], rng: &mut impl Rng) -> Vec<DropEvent> {
    table
        .iter()
        .filter(|entry| entry.amount > 0 && rng.gen::<f32>() < entry.drop_chance)
        .map(|entry| DropEvent::new(entry.item_type.clone(), entry.amount))
        .collect()
}
