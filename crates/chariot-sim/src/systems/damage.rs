//! Damage application and death collection.

use std::collections::HashMap;

use hecs::{Entity, World};

use chariot_core::components::Enemy;
use chariot_core::enums::EnemyType;
use chariot_core::events::GameEvent;
use chariot_core::types::Position;

use crate::weapons::DamageApplication;

/// Marks an enemy destroyed by ramming the player. Such kills drop nothing.
#[derive(Debug, Clone, Copy)]
pub struct ContactKill;

/// An enemy removed this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadEnemy {
    pub enemy_id: u32,
    pub enemy_type: EnemyType,
    pub position: Position,
    pub contact: bool,
}

/// Apply damage in order. Hits on enemies that are gone or already dead are
/// skipped; health never drops below zero.
pub fn apply(world: &mut World, damage: &[DamageApplication], events: &mut Vec<GameEvent>) {
    if damage.is_empty() {
        return;
    }
    let index: HashMap<u32, Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, enemy)| (enemy.enemy_id, entity))
        .collect();

    for hit in damage {
        let Some(&entity) = index.get(&hit.enemy_id) else {
            continue;
        };
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            continue;
        };
        if !enemy.is_alive() {
            continue;
        }
        let dealt = hit.amount.min(enemy.health);
        enemy.health -= dealt;
        events.push(GameEvent::EnemyDamaged {
            enemy_id: hit.enemy_id,
            amount: dealt,
            source: hit.source,
        });
    }
}

/// Despawn every enemy at zero health and report them, ordered by id.
pub fn take_dead(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> Vec<DeadEnemy> {
    despawn_buffer.clear();
    let mut dead = Vec::new();

    for (entity, (pos, enemy, contact)) in
        world.query_mut::<(&Position, &Enemy, Option<&ContactKill>)>()
    {
        if !enemy.is_alive() {
            dead.push(DeadEnemy {
                enemy_id: enemy.enemy_id,
                enemy_type: enemy.enemy_type,
                position: *pos,
                contact: contact.is_some(),
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    dead.sort_by_key(|d| d.enemy_id);
    dead
}
