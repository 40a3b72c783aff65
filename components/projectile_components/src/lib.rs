use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
};

/// Fraction of the way the flight direction turns towards a tracked target each frame.
pub const TRACKING_BLEND: f32 = 0.1;

/// Seconds a damage-over-time effect lasts when a definition does not say otherwise.
pub const DEFAULT_DOT_DURATION: f32 = 3.0;

pub const DEFAULT_LIFETIME: f32 = 5.0;

pub const DEFAULT_HIT_RADIUS: f32 = 12.0;

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChillParams {
    /// Movement speed multiplier while chilled
    pub slow_factor: f32,
    pub duration: f32,
}

/// Tunables a projectile skill hands to every projectile it fires.
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    pub speed: f32,
    pub damage: f32,
    /// Damage per second, used for both the on-hit DoT and the area tick
    pub dot_damage: f32,
    pub dot_duration: f32,
    /// Share of direct damage granted to the caster's energy shield
    pub life_leech_percent: f32,
    pub tracking_range: Option<f32>,
    pub area_damage_radius: Option<f32>,
    pub hit_radius: f32,
    pub lifetime: f32,
    pub piercing: bool,
    pub chill: Option<ChillParams>,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            speed: 300.0,
            damage: 0.0,
            dot_damage: 0.0,
            dot_duration: DEFAULT_DOT_DURATION,
            life_leech_percent: 0.0,
            tracking_range: None,
            area_damage_radius: None,
            hit_radius: DEFAULT_HIT_RADIUS,
            lifetime: DEFAULT_LIFETIME,
            piercing: false,
            chill: None,
        }
    }
}

/// A projectile in flight.
///
/// `hit_targets` records everything this projectile already damaged by
/// direct collision; a target is never directly hit twice by the same instance.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Projectile {
    /// Caster that fired the projectile, receives life leech
    pub source: Entity,
    /// Unit flight direction
    pub direction: Vec2,
    pub params: ProjectileParams,
    pub remaining_lifetime: f32,
    #[reflect(ignore)]
    hit_targets: HashSet<Entity>,
}

impl Projectile {
    pub fn launch(source: Entity, direction: Vec2, params: &ProjectileParams) -> Self {
        Self {
            source,
            direction: direction.normalize_or_zero(),
            params: params.clone(),
            remaining_lifetime: params.lifetime,
            hit_targets: HashSet::new(),
        }
    }

    /// Counts the lifetime down. Returns true once the projectile has expired.
    pub fn tick_lifetime(&mut self, delta: f32) -> bool {
        self.remaining_lifetime -= delta;
        self.remaining_lifetime <= 0.0
    }

    /// Turns the flight direction part of the way towards `target`.
    /// Leaves the direction alone when the blend would degenerate.
    pub fn steer_towards(&mut self, position: Vec2, target: Vec2) {
        let Some(wanted) = (target - position).try_normalize() else {
            return;
        };
        if let Some(blended) = self.direction.lerp(wanted, TRACKING_BLEND).try_normalize() {
            self.direction = blended;
        }
    }

    pub fn displacement(&self, delta: f32) -> Vec2 {
        self.direction * self.params.speed * delta
    }

    /// Records a direct hit. Returns false if `target` was already hit.
    pub fn register_hit(&mut self, target: Entity) -> bool {
        self.hit_targets.insert(target)
    }

    pub fn has_hit(&self, target: Entity) -> bool {
        self.hit_targets.contains(&target)
    }

    pub fn hit_count(&self) -> usize {
        self.hit_targets.len()
    }

    pub fn leech_amount(&self) -> f32 {
        self.params.damage * self.params.life_leech_percent
    }
}
