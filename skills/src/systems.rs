use {
    crate::{
        cast::{Cast, CastContext},
        slot::SkillSlot,
    },
    bevy::prelude::*,
    caster_components::{AimPoint, Caster, Mana},
    combat_events::{DamageRequest, DotRequest},
    enemy_components::{Dead, Enemy},
    skill_components::{EquippedLoadout, ResourcePool},
    skill_events::{CasterDamaged, SkillCast, SkillCastRequested},
    skills_assets::{LoadoutDefinition, LoadoutMap, SkillDefinition, SkillMap},
};

type CasterQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut SkillSlot,
        &'static Transform,
        Option<&'static AimPoint>,
        Option<&'static mut Mana>,
    ),
    With<Caster>,
>;

type HostileQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform), (With<Enemy>, Without<Dead>)>;

/// Replaces `EquippedLoadout` requests with a wired `SkillSlot` once every
/// referenced asset is loaded.
pub fn build_pending_loadouts(
    mut commands: Commands,
    pending: Query<(Entity, &EquippedLoadout), Without<SkillSlot>>,
    loadout_map: Res<LoadoutMap>,
    loadouts: Res<Assets<LoadoutDefinition>>,
    skill_map: Res<SkillMap>,
    skills: Res<Assets<SkillDefinition>>,
) {
    for (entity, equipped) in &pending {
        let Some(handle) = loadout_map.handles.get(&equipped.0) else {
            error!(loadout = %equipped.0, "unknown loadout");
            commands.entity(entity).remove::<EquippedLoadout>();
            continue;
        };
        let Some(loadout) = loadouts.get(handle) else {
            continue;
        };
        let skills_pending = loadout.slots.iter().flatten().any(|id| {
            skill_map
                .handles
                .get(id)
                .is_some_and(|handle| !skills.contains(handle.id()))
        });
        if skills_pending {
            continue;
        }

        match SkillSlot::from_loadout(loadout, |id| {
            skill_map.handles.get(id).and_then(|handle| skills.get(handle))
        }) {
            Ok(slot) => {
                info!(
                    loadout = %loadout.id,
                    ?entity,
                    skills = slot.iter().count(),
                    "loadout equipped"
                );
                commands.entity(entity).insert(slot);
            }
            Err(err) => {
                error!(loadout = %loadout.id, ?entity, %err, "failed to build loadout");
                commands.entity(entity).remove::<EquippedLoadout>();
            }
        }
    }
}

pub fn tick_skill_slots(time: Res<Time>, mut slots: Query<&mut SkillSlot>) {
    let delta = time.delta_secs();
    for mut slot in &mut slots {
        slot.update(delta);
    }
}

pub fn regenerate_mana(time: Res<Time>, mut pools: Query<&mut Mana>) {
    let delta = time.delta_secs();
    for mut mana in &mut pools {
        if mana.current < mana.max {
            mana.regenerate(delta);
        }
    }
}

fn hostile_snapshot(hostiles: &HostileQuery) -> Vec<(Entity, Vec2)> {
    hostiles
        .iter()
        .map(|(entity, transform)| (entity, transform.translation.truncate()))
        .collect()
}

/// Handles the `SkillCastRequested` event.
pub fn handle_cast_request(
    trigger: On<SkillCastRequested>,
    mut commands: Commands,
    mut casters: CasterQuery,
    hostiles: HostileQuery,
) {
    let event = trigger.event();
    let Ok((mut slot, transform, aim, mut mana)) = casters.get_mut(event.caster) else {
        warn!(caster = ?event.caster, "cast requested by entity without a skill slot");
        return;
    };

    let hostiles = hostile_snapshot(&hostiles);
    let ctx = CastContext::new(event.caster, transform.translation.truncate())
        .with_pointer(aim.and_then(|aim| aim.0))
        .with_hostiles(&hostiles);
    let pool = mana
        .as_deref_mut()
        .map(|mana| mana as &mut dyn ResourcePool);

    if let Some(cast) = slot.trigger_skill(event.slot, &ctx, pool) {
        spawn_cast(&mut commands, cast);
    }
}

/// Handles the `CasterDamaged` event by forwarding it to the caster's slot.
pub fn handle_caster_damaged(
    trigger: On<CasterDamaged>,
    mut commands: Commands,
    mut casters: CasterQuery,
    hostiles: HostileQuery,
) {
    let event = trigger.event();
    let Ok((mut slot, transform, aim, mut mana)) = casters.get_mut(event.caster) else {
        return;
    };

    let hostiles = hostile_snapshot(&hostiles);
    let ctx = CastContext::new(event.caster, transform.translation.truncate())
        .with_pointer(aim.and_then(|aim| aim.0))
        .with_hostiles(&hostiles);
    let pool = mana
        .as_deref_mut()
        .map(|mana| mana as &mut dyn ResourcePool);

    for cast in slot.on_hit(event.amount, &ctx, pool) {
        spawn_cast(&mut commands, cast);
    }
}

/// Spawns the projectiles of a cast and resolves its area strikes.
fn spawn_cast(commands: &mut Commands, cast: Cast) {
    let mut projectiles = Vec::with_capacity(cast.projectiles.len());
    for projectile in cast.projectiles {
        let size = projectile.params.hit_radius * 2.0;
        let entity = commands
            .spawn((
                Name::new(format!("{} projectile", cast.skill)),
                Sprite {
                    color: Color::srgb(0.9, 0.4, 1.0),
                    custom_size: Some(Vec2::splat(size)),
                    ..default()
                },
                Transform::from_translation(cast.origin.extend(1.0)),
                projectile,
            ))
            .id();
        projectiles.push(entity);
    }

    for strike in &cast.strikes {
        debug!(
            skill = %cast.skill,
            targets = strike.targets.len(),
            radius = strike.radius,
            "area strike"
        );
        for &target in &strike.targets {
            commands.trigger(DamageRequest {
                source: cast.caster,
                target,
                amount: strike.damage,
            });
            if strike.dot_damage > 0.0 {
                commands.trigger(DotRequest {
                    source: cast.caster,
                    target,
                    per_second: strike.dot_damage,
                    duration: strike.dot_duration,
                });
            }
        }
    }

    commands.trigger(SkillCast {
        caster: cast.caster,
        skill: cast.skill,
        projectiles,
    });
}
