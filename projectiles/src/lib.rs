
use {
    bevy::prelude::*,
    caster_components::EnergyShield,
    combat_events::{DamageRequest, DotRequest, ProjectileHit},
    enemy_components::{Chilled, Dead, Enemy},
    projectile_components::Projectile,
    system_schedule::GameSchedule,
};

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Projectile>().add_systems(
            Update,
            (
                projectile_lifetime_system,
                projectile_tracking_system,
                projectile_movement_system,
                projectile_collision_system,
                projectile_area_damage_system,
            )
                .chain()
                .in_set(GameSchedule::PerformAction),
        );
    }
}

type Hostiles<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform), (With<Enemy>, Without<Dead>, Without<Projectile>)>;

/// Despawns projectiles whose lifetime ran out. Expiry has no side effects.
pub fn projectile_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Projectile)>,
) {
    let delta = time.delta_secs();
    for (entity, mut projectile) in projectiles.iter_mut() {
        if projectile.tick_lifetime(delta) {
            trace!(?entity, "projectile expired");
            commands.entity(entity).despawn();
        }
    }
}

/// Bends tracking projectiles towards the nearest hostile they have not hit yet.
pub fn projectile_tracking_system(
    mut projectiles: Query<(&mut Projectile, &Transform)>,
    hostiles: Hostiles,
) {
    for (mut projectile, transform) in projectiles.iter_mut() {
        let Some(range) = projectile.params.tracking_range else {
            continue;
        };
        if projectile.remaining_lifetime <= 0.0 {
            continue;
        }

        let position = transform.translation.truncate();
        let mut closest: Option<(Vec2, f32)> = None;
        for (entity, hostile_transform) in hostiles.iter() {
            if projectile.has_hit(entity) {
                continue;
            }
            let target = hostile_transform.translation.truncate();
            let distance = position.distance(target);
            if distance < range && closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((target, distance));
            }
        }

        if let Some((target, _)) = closest {
            projectile.steer_towards(position, target);
        }
    }
}

pub fn projectile_movement_system(
    time: Res<Time>,
    mut projectiles: Query<(&mut Transform, &Projectile)>,
) {
    let delta = time.delta_secs();
    for (mut transform, projectile) in projectiles.iter_mut() {
        if projectile.remaining_lifetime <= 0.0 {
            continue;
        }
        transform.translation += projectile.displacement(delta).extend(0.0);
    }
}

/// Applies the direct-hit bundle once per target: damage, damage over time,
/// chill and life leech. Non-piercing projectiles stop at their first hit.
pub fn projectile_collision_system(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &Transform, &mut Projectile)>,
    hostiles: Hostiles,
    mut shields: Query<&mut EnergyShield>,
) {
    for (projectile_entity, projectile_transform, mut projectile) in projectiles.iter_mut() {
        if projectile.remaining_lifetime <= 0.0 {
            continue;
        }
        let position = projectile_transform.translation.truncate();

        for (target, target_transform) in hostiles.iter() {
            let distance = position.distance(target_transform.translation.truncate());
            if distance >= projectile.params.hit_radius || !projectile.register_hit(target) {
                continue;
            }

            let params = &projectile.params;
            commands.trigger(DamageRequest {
                source: projectile.source,
                target,
                amount: params.damage,
            });
            if params.dot_damage > 0.0 {
                commands.trigger(DotRequest {
                    source: projectile.source,
                    target,
                    per_second: params.dot_damage,
                    duration: params.dot_duration,
                });
            }
            if let Some(chill) = params.chill {
                commands
                    .entity(target)
                    .try_insert(Chilled::new(chill.slow_factor, chill.duration));
            }

            let leech = projectile.leech_amount();
            if leech > 0.0
                && let Ok(mut shield) = shields.get_mut(projectile.source)
            {
                let gained = shield.grant(leech);
                trace!(source = ?projectile.source, gained, "life leech");
            }

            commands.trigger(ProjectileHit {
                projectile: projectile_entity,
                target,
                damage: params.damage,
            });

            if !params.piercing {
                commands.entity(projectile_entity).despawn();
                break;
            }
        }
    }
}

/// Continuous damage around projectiles with an area radius.
///
/// Targets already hit directly by the projectile are skipped.
pub fn projectile_area_damage_system(
    mut commands: Commands,
    time: Res<Time>,
    projectiles: Query<(&Transform, &Projectile)>,
    hostiles: Hostiles,
) {
    let delta = time.delta_secs();
    for (transform, projectile) in projectiles.iter() {
        let Some(radius) = projectile.params.area_damage_radius else {
            continue;
        };
        let amount = projectile.params.dot_damage * delta;
        if amount <= 0.0 || projectile.remaining_lifetime <= 0.0 {
            continue;
        }

        let position = transform.translation.truncate();
        for (target, target_transform) in hostiles.iter() {
            if projectile.has_hit(target)
                || position.distance(target_transform.translation.truncate()) > radius
            {
                continue;
            }
            commands.trigger(DamageRequest {
                source: projectile.source,
                target,
                amount,
            });
        }
    }
}
