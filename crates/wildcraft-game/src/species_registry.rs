//! Creature species definitions.
//!
//! Provides a registry of known species with their stats, behavior class,
//! drop tables and spawn weights. Supports the built-in wildlife table and
//! custom tables parsed from JSON.

use std::sync::Arc;

use rand::Rng;
use serde::Deserialize;

use crate::error::GameError;

/// Default reaction profile of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorClass {
    /// Never attacks; flees when hurt.
    Passive,
    /// Ignores the player until hurt.
    Neutral,
    /// Hunts the player on sight.
    Aggressive,
}

/// A single entry in a species drop table. Each entry is rolled independently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DropEntry {
    pub item_type: String,
    pub amount: u32,
    /// Probability in `[0, 1]` that this entry drops.
    #[serde(default = "default_drop_chance")]
    pub drop_chance: f32,
}

fn default_drop_chance() -> f32 {
    1.0
}

/// Definition of a creature species.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesDefinition {
    /// Registry identifier, e.g. `"wolf"`.
    pub id: String,
    /// Display name, e.g. `"Wolf"`.
    pub display_name: String,
    pub behavior: BehaviorClass,
    /// Health a freshly spawned creature starts with.
    pub health: f32,
    pub max_health: f32,
    /// Chase speed (units/second).
    pub speed: f32,
    pub wander_speed: f32,
    pub flee_speed: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub detection_range: f32,
    pub attack_cooldown_ms: u64,
    /// Whether a neutral creature retaliates instead of fleeing when hurt.
    #[serde(default)]
    pub aggro_on_hit: bool,
    #[serde(default)]
    pub drops: Vec<DropEntry>,
    /// Relative weight for random population spawns. Zero never spawns.
    #[serde(default)]
    pub spawn_weight: u32,
}

impl SpeciesDefinition {
    /// Health of a freshly spawned creature, never above `max_health`.
    pub fn starting_health(&self) -> f32 {
        self.health.min(self.max_health)
    }

    fn validate(&self) -> Result<(), GameError> {
        let stats = [
            ("health", self.health),
            ("max_health", self.max_health),
            ("speed", self.speed),
            ("wander_speed", self.wander_speed),
            ("flee_speed", self.flee_speed),
            ("attack_damage", self.attack_damage),
            ("attack_range", self.attack_range),
            ("detection_range", self.detection_range),
        ];
        for (field, value) in stats {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidStat {
                    owner: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        for drop in &self.drops {
            if !(0.0..=1.0).contains(&drop.drop_chance) {
                return Err(GameError::InvalidDropChance {
                    owner: self.id.clone(),
                    item: drop.item_type.clone(),
                    chance: drop.drop_chance,
                });
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SpeciesFile {
    species: Vec<SpeciesDefinition>,
}

/// Registry of creature species. Definitions are shared read-only with live creatures.
#[derive(Debug, Clone)]
pub struct SpeciesRegistry {
    species: Vec<Arc<SpeciesDefinition>>,
}

impl Default for SpeciesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeciesRegistry {
    /// Build the registry with the built-in wildlife table.
    pub fn new() -> Self {
        let species = vec![
            SpeciesDefinition {
                id: "rabbit".into(),
                display_name: "Rabbit".into(),
                behavior: BehaviorClass::Passive,
                health: 10.0,
                max_health: 10.0,
                speed: 4.0,
                wander_speed: 1.5,
                flee_speed: 7.0,
                attack_damage: 0.0,
                attack_range: 0.0,
                detection_range: 8.0,
                attack_cooldown_ms: 0,
                aggro_on_hit: false,
                drops: vec![
                    drop("raw_meat", 1, 1.0),
                    drop("hide", 1, 0.5),
                ],
                spawn_weight: 40,
            },
            SpeciesDefinition {
                id: "deer".into(),
                display_name: "Deer".into(),
                behavior: BehaviorClass::Passive,
                health: 30.0,
                max_health: 30.0,
                speed: 5.0,
                wander_speed: 1.5,
                flee_speed: 8.0,
                attack_damage: 0.0,
                attack_range: 0.0,
                detection_range: 15.0,
                attack_cooldown_ms: 0,
                aggro_on_hit: false,
                drops: vec![
                    drop("raw_meat", 3, 1.0),
                    drop("hide", 2, 0.8),
                    drop("bone", 1, 0.5),
                ],
                spawn_weight: 30,
            },
            SpeciesDefinition {
                id: "boar".into(),
                display_name: "Boar".into(),
                behavior: BehaviorClass::Neutral,
                health: 40.0,
                max_health: 40.0,
                speed: 4.5,
                wander_speed: 1.2,
                flee_speed: 6.0,
                attack_damage: 8.0,
                attack_range: 2.0,
                detection_range: 12.0,
                attack_cooldown_ms: 1500,
                aggro_on_hit: true,
                drops: vec![
                    drop("raw_meat", 4, 1.0),
                    drop("hide", 1, 0.7),
                    drop("tusk", 1, 0.3),
                ],
                spawn_weight: 15,
            },
            SpeciesDefinition {
                id: "wolf".into(),
                display_name: "Wolf".into(),
                behavior: BehaviorClass::Aggressive,
                health: 50.0,
                max_health: 50.0,
                speed: 5.5,
                wander_speed: 2.0,
                flee_speed: 6.5,
                attack_damage: 10.0,
                attack_range: 2.0,
                detection_range: 25.0,
                attack_cooldown_ms: 1000,
                aggro_on_hit: true,
                drops: vec![
                    drop("raw_meat", 2, 1.0),
                    drop("wolf_pelt", 1, 0.6),
                    drop("bone", 2, 0.4),
                ],
                spawn_weight: 10,
            },
            SpeciesDefinition {
                id: "bear".into(),
                display_name: "Bear".into(),
                behavior: BehaviorClass::Aggressive,
                health: 120.0,
                max_health: 120.0,
                speed: 4.0,
                wander_speed: 1.0,
                flee_speed: 5.0,
                attack_damage: 25.0,
                attack_range: 2.5,
                detection_range: 20.0,
                attack_cooldown_ms: 2000,
                aggro_on_hit: true,
                drops: vec![
                    drop("raw_meat", 6, 1.0),
                    drop("bear_pelt", 1, 0.8),
                    drop("bone", 3, 0.6),
                ],
                spawn_weight: 5,
            },
        ];
        Self {
            species: species.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build a registry from explicit definitions, validating each one.
    pub fn from_definitions(defs: Vec<SpeciesDefinition>) -> Result<Self, GameError> {
        let mut reg = Self {
            species: Vec::with_capacity(defs.len()),
        };
        for def in defs {
            reg.register_species(def)?;
        }
        Ok(reg)
    }

    /// Parse a registry from JSON: `{"species": [ {...}, ... ]}`.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let file: SpeciesFile = serde_json::from_str(json)?;
        Self::from_definitions(file.species)
    }

    /// Look up a species by its identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<SpeciesDefinition>> {
        self.species.iter().find(|s| s.id == id)
    }

    /// All known species definitions.
    pub fn all(&self) -> &[Arc<SpeciesDefinition>] {
        &self.species
    }

    /// Register a custom species.
    pub fn register_species(&mut self, def: SpeciesDefinition) -> Result<(), GameError> {
        def.validate()?;
        if self.get(&def.id).is_some() {
            return Err(GameError::DuplicateId(def.id));
        }
        self.species.push(Arc::new(def));
        Ok(())
    }

    /// Sum of all spawn weights.
    pub fn total_spawn_weight(&self) -> u64 {
        self.species.iter().map(|s| s.spawn_weight as u64).sum()
    }

    /// Pick a species by cumulative spawn weight. `None` when every weight is zero.
    pub fn pick_weighted(&self, rng: &mut impl Rng) -> Option<&Arc<SpeciesDefinition>> {
        let total = self.total_spawn_weight();
        if total == 0 {
            return None;
        }

        let mut roll = rng.gen_range(0..total);
        for species in &self.species {
            let weight = species.spawn_weight as u64;
            if roll < weight {
                return Some(species);
            }
            roll -= weight;
        }
        None
    }
}

fn drop(item_type: &str, amount: u32, drop_chance: f32) -> DropEntry {
    DropEntry {
        item_type: item_type.into(),
        amount,
        drop_chance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn custom(id: &str, weight: u32) -> SpeciesDefinition {
        SpeciesDefinition {
            id: id.into(),
            display_name: id.into(),
            behavior: BehaviorClass::Passive,
            health: 10.0,
            max_health: 10.0,
            speed: 1.0,
            wander_speed: 1.0,
            flee_speed: 1.0,
            attack_damage: 0.0,
            attack_range: 0.0,
            detection_range: 5.0,
            attack_cooldown_ms: 0,
            aggro_on_hit: false,
            drops: Vec::new(),
            spawn_weight: weight,
        }
    }

    #[test]
    fn registry_has_builtin_species() {
        let reg = SpeciesRegistry::new();
        assert_eq!(reg.all().len(), 5);
    }

    #[test]
    fn get_wolf() {
        let reg = SpeciesRegistry::new();
        let wolf = reg.get("wolf").unwrap();
        assert_eq!(wolf.display_name, "Wolf");
        assert_eq!(wolf.behavior, BehaviorClass::Aggressive);
        assert_eq!(wolf.detection_range, 25.0);
    }

    #[test]
    fn get_unknown_none() {
        let reg = SpeciesRegistry::new();
        assert!(reg.get("dragon").is_none());
    }

    #[test]
    fn builtin_drop_chances_valid() {
        let reg = SpeciesRegistry::new();
        for s in reg.all() {
            assert!(s.validate().is_ok(), "{} failed validation", s.id);
        }
    }

    #[test]
    fn register_rejects_duplicate() {
        let mut reg = SpeciesRegistry::new();
        let err = reg.register_species(custom("wolf", 1)).unwrap_err();
        assert!(matches!(err, GameError::DuplicateId(id) if id == "wolf"));
    }

    #[test]
    fn register_rejects_bad_drop_chance() {
        let mut def = custom("moth", 1);
        def.drops.push(drop("dust", 1, 1.5));
        let err = SpeciesRegistry::from_definitions(vec![def]).unwrap_err();
        assert!(matches!(err, GameError::InvalidDropChance { .. }));
    }

    #[test]
    fn register_rejects_negative_speed() {
        let mut def = custom("snail", 1);
        def.speed = -1.0;
        let err = SpeciesRegistry::from_definitions(vec![def]).unwrap_err();
        assert!(matches!(err, GameError::InvalidStat { field: "speed", .. }));
    }

    #[test]
    fn parse_json_registry() {
        let json = r#"{
            "species": [{
                "id": "fox",
                "display_name": "Fox",
                "behavior": "neutral",
                "health": 15, "max_health": 15,
                "speed": 5, "wander_speed": 2, "flee_speed": 7,
                "attack_damage": 4, "attack_range": 1.5, "detection_range": 10,
                "attack_cooldown_ms": 800,
                "aggro_on_hit": true,
                "drops": [{"item_type": "fur", "amount": 1, "drop_chance": 0.5}],
                "spawn_weight": 3
            }]
        }"#;
        let reg = SpeciesRegistry::from_json(json).unwrap();
        let fox = reg.get("fox").unwrap();
        assert_eq!(fox.behavior, BehaviorClass::Neutral);
        assert!(fox.aggro_on_hit);
        assert_eq!(fox.drops[0].item_type, "fur");
        assert_eq!(fox.spawn_weight, 3);
    }

    #[test]
    fn parse_json_defaults_drop_chance() {
        let json = r#"{"species": [{
            "id": "crab", "display_name": "Crab", "behavior": "passive",
            "health": 5, "max_health": 5, "speed": 1, "wander_speed": 1,
            "flee_speed": 2, "attack_damage": 0, "attack_range": 0,
            "detection_range": 3, "attack_cooldown_ms": 0,
            "drops": [{"item_type": "shell", "amount": 1}]
        }]}"#;
        let reg = SpeciesRegistry::from_json(json).unwrap();
        let crab = reg.get("crab").unwrap();
        assert_eq!(crab.drops[0].drop_chance, 1.0);
        assert_eq!(crab.spawn_weight, 0);
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(
            SpeciesRegistry::from_json("{not json"),
            Err(GameError::Json(_))
        ));
    }

    #[test]
    fn starting_health_capped_at_max() {
        let mut def = custom("slime", 1);
        def.health = 50.0;
        def.max_health = 20.0;
        assert_eq!(def.starting_health(), 20.0);
    }

    #[test]
    fn weighted_pick_never_selects_zero_weight() {
        let reg = SpeciesRegistry::from_definitions(vec![
            custom("never", 0),
            custom("always", 5),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(reg.pick_weighted(&mut rng).unwrap().id, "always");
        }
    }

    #[test]
    fn weighted_pick_all_zero_none() {
        let reg = SpeciesRegistry::from_definitions(vec![custom("a", 0), custom("b", 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(reg.pick_weighted(&mut rng).is_none());
    }

    #[test]
    fn weighted_pick_frequencies_converge() {
        let reg = SpeciesRegistry::from_definitions(vec![
            custom("a", 1),
            custom("b", 3),
            custom("c", 6),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 100_000;
        let mut counts = [0u32; 3];
        for _ in 0..draws {
            match reg.pick_weighted(&mut rng).unwrap().id.as_str() {
                "a" => counts[0] += 1,
                "b" => counts[1] += 1,
                _ => counts[2] += 1,
            }
        }
        let expected = [0.1, 0.3, 0.6];
        for (count, want) in counts.iter().zip(expected) {
            let freq = *count as f64 / draws as f64;
            assert!((freq - want).abs() < 0.01, "freq {freq} vs {want}");
        }
    }
}
