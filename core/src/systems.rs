use {
    bevy::{prelude::*, window::PrimaryWindow},
    caster_components::{AimPoint, Caster, EnergyShield, Mana},
    combat_events::{DamageRequest, EnemyKilled},
    enemy_components::{Chilled, ContactDamage, Enemy, Health, MovementSpeed},
    rand::Rng,
    skill_components::EquippedLoadout,
    skill_events::SkillCastRequested,
};

const ARENA_HALF_EXTENT: f32 = 350.0;
const ENEMY_COUNT: usize = 6;
const CAST_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

pub fn spawn_arena(mut commands: Commands) {
    info!("spawning arena");
    commands.spawn((
        Name::new("Player"),
        Caster,
        Health::new(200.0),
        Mana::new(100.0, 10.0),
        EnergyShield::new(50.0),
        AimPoint::default(),
        EquippedLoadout("default".to_string()),
        Sprite::from_color(Color::srgb(0.3, 0.6, 1.0), Vec2::splat(24.0)),
        Transform::default(),
    ));

    let mut rng = rand::rng();
    for _ in 0..ENEMY_COUNT {
        spawn_enemy(&mut commands, random_edge_position(&mut rng));
    }
}

fn spawn_enemy(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        Name::new("Enemy"),
        Enemy,
        Health::new(60.0),
        MovementSpeed(40.0),
        ContactDamage {
            damage: 6.0,
            radius: 20.0,
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        },
        Sprite::from_color(Color::srgb(0.8, 0.2, 0.2), Vec2::splat(20.0)),
        Transform::from_translation(position.extend(0.0)),
    ));
}

fn random_edge_position(rng: &mut impl Rng) -> Vec2 {
    let along = rng.random_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT);
    let edge = if rng.random_bool(0.5) {
        ARENA_HALF_EXTENT
    } else {
        -ARENA_HALF_EXTENT
    };
    if rng.random_bool(0.5) {
        Vec2::new(edge, along)
    } else {
        Vec2::new(along, edge)
    }
}

pub fn respawn_enemy(trigger: On<EnemyKilled>, mut commands: Commands) {
    debug!(killed = ?trigger.event().entity, "respawning enemy");
    spawn_enemy(&mut commands, random_edge_position(&mut rand::rng()));
}

pub fn update_aim_point(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut casters: Query<&mut AimPoint, With<Caster>>,
) {
    let (Ok(window), Ok((camera, camera_transform))) = (windows.single(), cameras.single()) else {
        return;
    };

    let pointer = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());
    for mut aim in casters.iter_mut() {
        aim.0 = pointer;
    }
}

pub fn read_cast_keys(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    casters: Query<Entity, With<Caster>>,
) {
    for (slot, key) in CAST_KEYS.iter().enumerate() {
        if !keys.just_pressed(*key) {
            continue;
        }
        for caster in casters.iter() {
            commands.trigger(SkillCastRequested { caster, slot });
        }
    }
}

pub fn chase_caster(
    time: Res<Time>,
    casters: Query<&Transform, (With<Caster>, Without<Enemy>)>,
    mut enemies: Query<(&mut Transform, &MovementSpeed, Option<&Chilled>), With<Enemy>>,
) {
    let Ok(target) = casters.single() else {
        return;
    };
    let target = target.translation.truncate();

    for (mut transform, speed, chilled) in enemies.iter_mut() {
        let position = transform.translation.truncate();
        let slow = chilled.map_or(1.0, |chill| chill.slow_factor);
        let step = (target - position).normalize_or_zero() * speed.0 * slow * time.delta_secs();
        transform.translation += step.extend(0.0);
    }
}

pub fn contact_damage(
    mut commands: Commands,
    time: Res<Time>,
    casters: Query<(Entity, &Transform), (With<Caster>, Without<Enemy>)>,
    mut enemies: Query<(Entity, &Transform, &mut ContactDamage), With<Enemy>>,
) {
    for (enemy, transform, mut contact) in enemies.iter_mut() {
        contact.timer.tick(time.delta());
        if !contact.timer.just_finished() {
            continue;
        }

        let position = transform.translation.truncate();
        for (caster, caster_transform) in casters.iter() {
            if caster_transform.translation.truncate().distance(position) <= contact.radius {
                commands.trigger(DamageRequest {
                    source: enemy,
                    target: caster,
                    amount: contact.damage,
                });
            }
        }
    }
}
