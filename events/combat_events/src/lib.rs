use bevy::prelude::*;

pub struct CombatEventsPlugin;

impl Plugin for CombatEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DamageRequest>()
            .register_type::<DotRequest>()
            .register_type::<ProjectileHit>()
            .register_type::<EnemyKilled>();
    }
}

/// Direct damage to apply to `target`.
///
/// This is an **Observer** event (triggered via `commands.trigger`). Damage
/// dealt to a `Caster` is additionally reported as `CasterDamaged`.
#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct DamageRequest {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
}

impl Default for DamageRequest {
    fn default() -> Self {
        Self {
            source: Entity::PLACEHOLDER,
            target: Entity::PLACEHOLDER,
            amount: 0.0,
        }
    }
}

/// Starts a damage-over-time effect on `target`.
#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct DotRequest {
    pub source: Entity,
    pub target: Entity,
    pub per_second: f32,
    pub duration: f32,
}

impl Default for DotRequest {
    fn default() -> Self {
        Self {
            source: Entity::PLACEHOLDER,
            target: Entity::PLACEHOLDER,
            per_second: 0.0,
            duration: 0.0,
        }
    }
}

#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub damage: f32,
}

impl Default for ProjectileHit {
    fn default() -> Self {
        Self {
            projectile: Entity::PLACEHOLDER,
            target: Entity::PLACEHOLDER,
            damage: 0.0,
        }
    }
}

#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct EnemyKilled {
    pub entity: Entity,
}

impl Default for EnemyKilled {
    fn default() -> Self {
        Self {
            entity: Entity::PLACEHOLDER,
        }
    }
}
