
use {
    bevy::prelude::*,
    caster_components::{Caster, EnergyShield},
    combat_events::{CombatEventsPlugin, DamageRequest, DotRequest, EnemyKilled},
    enemy_components::{Chilled, DamageOverTime, Dead, Enemy, Health},
    skill_events::CasterDamaged,
    system_schedule::GameSchedule,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CombatEventsPlugin)
            .register_type::<Health>()
            .register_type::<DamageOverTime>()
            .register_type::<Chilled>()
            .register_type::<Dead>();

        app.add_observer(apply_damage_observer)
            .add_observer(apply_dot_observer)
            .add_systems(
                Update,
                (
                    despawn_dead_enemies.in_set(GameSchedule::FrameStart),
                    (tick_damage_over_time, tick_chill).in_set(GameSchedule::Effect),
                    mark_dead_enemies.in_set(GameSchedule::FrameEnd),
                ),
            );
    }
}

/// Applies direct damage. Energy shield soaks damage before health, and
/// every hit on a caster is reported as `CasterDamaged`.
pub fn apply_damage_observer(
    trigger: On<DamageRequest>,
    mut commands: Commands,
    mut targets: Query<(&mut Health, Option<&mut EnergyShield>, Has<Caster>), Without<Dead>>,
) {
    let event = trigger.event();
    if event.amount <= 0.0 {
        return;
    }
    let Ok((mut health, shield, is_caster)) = targets.get_mut(event.target) else {
        return;
    };

    let remaining = match shield {
        Some(mut shield) => shield.absorb(event.amount),
        None => event.amount,
    };
    health.take_damage(remaining);
    debug!(
        target = ?event.target,
        amount = event.amount,
        health = health.current,
        "damage applied"
    );

    if is_caster {
        commands.trigger(CasterDamaged {
            caster: event.target,
            amount: event.amount,
        });
    }
}

pub fn apply_dot_observer(
    trigger: On<DotRequest>,
    mut targets: Query<&mut DamageOverTime, Without<Dead>>,
) {
    let event = trigger.event();
    if let Ok(mut dot) = targets.get_mut(event.target) {
        dot.apply(event.per_second, event.duration);
    }
}

pub fn tick_damage_over_time(
    time: Res<Time>,
    mut query: Query<(&mut DamageOverTime, &mut Health), Without<Dead>>,
) {
    let delta = time.delta_secs();
    for (mut dot, mut health) in query.iter_mut() {
        if dot.is_empty() {
            continue;
        }
        let damage = dot.tick(delta);
        health.take_damage(damage);
    }
}

pub fn tick_chill(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Chilled)>,
) {
    for (entity, mut chilled) in query.iter_mut() {
        if chilled.timer.tick(time.delta()).is_finished() {
            commands.entity(entity).remove::<Chilled>();
        }
    }
}

pub fn mark_dead_enemies(
    mut commands: Commands,
    query: Query<(Entity, &Health), (With<Enemy>, Without<Dead>)>,
) {
    for (entity, health) in query.iter() {
        if health.is_depleted() {
            info!(?entity, "enemy killed");
            commands.trigger(EnemyKilled { entity });
            commands
                .entity(entity)
                .insert(Dead)
                .remove::<(Sprite, Transform)>();
        }
    }
}

/// Removes enemies marked dead on an earlier frame, once `EnemyKilled` observers have run.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    query: Query<Entity, (With<Enemy>, With<Dead>)>,
) {
    for entity in query.iter() {
        trace!(?entity, "despawning dead enemy");
        commands.entity(entity).despawn();
    }
}
