use {bevy::prelude::*, projectile_components::Projectile};

/// Everything a skill needs to know about the world when it is cast.
///
/// The caster is passed explicitly on every call instead of being remembered
/// by the skill between casts.
#[derive(Debug, Clone, Copy)]
pub struct CastContext<'a> {
    pub caster: Entity,
    /// Caster position, projectiles start here
    pub origin: Vec2,
    /// World position the caster points at, if any
    pub pointer: Option<Vec2>,
    /// Snapshot of live hostiles and their positions
    pub hostiles: &'a [(Entity, Vec2)],
}

impl<'a> CastContext<'a> {
    pub fn new(caster: Entity, origin: Vec2) -> Self {
        Self {
            caster,
            origin,
            pointer: None,
            hostiles: &[],
        }
    }

    pub fn with_pointer(mut self, pointer: Option<Vec2>) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_hostiles(mut self, hostiles: &'a [(Entity, Vec2)]) -> Self {
        self.hostiles = hostiles;
        self
    }

    /// Closest hostile within `radius` of `center`.
    pub fn nearest_hostile(&self, center: Vec2, radius: f32) -> Option<(Entity, Vec2)> {
        self.hostiles
            .iter()
            .map(|(entity, position)| (*entity, *position, center.distance(*position)))
            .filter(|(_, _, distance)| *distance <= radius)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(entity, position, _)| (entity, position))
    }

    pub fn hostiles_within(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        self.hostiles
            .iter()
            .filter(|(_, position)| center.distance(*position) <= radius)
            .map(|(entity, _)| *entity)
            .collect()
    }
}

/// Instant damage dealt to every hostile caught in an area when a skill is cast.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaStrike {
    pub center: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub dot_damage: f32,
    pub dot_duration: f32,
    pub targets: Vec<Entity>,
}

/// Result of a successful cast. The ECS layer turns it into entities and events.
#[derive(Debug, Clone)]
pub struct Cast {
    pub skill: String,
    pub caster: Entity,
    pub origin: Vec2,
    pub projectiles: Vec<Projectile>,
    pub strikes: Vec<AreaStrike>,
}

impl Cast {
    pub fn new(skill: impl Into<String>, ctx: &CastContext) -> Self {
        Self {
            skill: skill.into(),
            caster: ctx.caster,
            origin: ctx.origin,
            projectiles: Vec::new(),
            strikes: Vec::new(),
        }
    }
}
