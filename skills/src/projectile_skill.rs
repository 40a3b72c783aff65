use {
    crate::cast::{AreaStrike, CastContext},
    bevy::prelude::*,
    projectile_components::{Projectile, ProjectileParams},
    skills_assets::{AimMode, ImpactBurst, MultishotSettings},
};

/// Fan-out capability of a projectile skill.
///
/// While disabled the skill fires a single projectile; once enabled it fires
/// `count` projectiles spread `step_degrees` apart and centred on the aim.
#[derive(Debug, Clone, PartialEq)]
pub struct Multishot {
    enabled: bool,
    pub count: u32,
    pub step_degrees: f32,
}

impl Multishot {
    pub fn new(count: u32, step_degrees: f32) -> Self {
        Self {
            enabled: false,
            count,
            step_degrees,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Angular offsets in degrees, e.g. `[-15, 0, 15]` for three shots 15° apart.
    pub fn offsets(&self) -> Vec<f32> {
        if !self.enabled || self.count <= 1 {
            return vec![0.0];
        }
        let half_span = self.step_degrees * (self.count - 1) as f32 / 2.0;
        (0..self.count)
            .map(|i| i as f32 * self.step_degrees - half_span)
            .collect()
    }

    pub fn directions(&self, base: Vec2) -> Vec<Vec2> {
        self.offsets()
            .into_iter()
            .map(|degrees| Vec2::from_angle(degrees.to_radians()).rotate(base))
            .collect()
    }
}

impl From<MultishotSettings> for Multishot {
    fn from(settings: MultishotSettings) -> Self {
        Self::new(settings.count, settings.step_degrees)
    }
}

/// Capability of skills that can fire a fan of projectiles.
///
/// Supports query skills for this instead of matching on what kind of skill they are.
pub trait MultiProjectile {
    fn multishot(&self) -> &Multishot;

    fn multishot_mut(&mut self) -> &mut Multishot;

    fn enable_multi_projectiles(&mut self) {
        self.multishot_mut().enable();
    }

    fn disable_multi_projectiles(&mut self) {
        self.multishot_mut().disable();
    }

    fn is_multi_projectile_enabled(&self) -> bool {
        self.multishot().is_enabled()
    }
}

/// An active effect that fires projectiles along an aim direction.
#[derive(Debug, Clone)]
pub struct ProjectileSkill {
    pub params: ProjectileParams,
    pub aim: AimMode,
    pub multishot: Multishot,
    pub impact: Option<ImpactBurst>,
}

impl ProjectileSkill {
    pub fn new(params: ProjectileParams) -> Self {
        Self {
            params,
            aim: AimMode::default(),
            multishot: MultishotSettings::default().into(),
            impact: None,
        }
    }

    pub fn with_aim(mut self, aim: AimMode) -> Self {
        self.aim = aim;
        self
    }

    pub fn with_multishot(mut self, multishot: Multishot) -> Self {
        self.multishot = multishot;
        self
    }

    pub fn with_impact(mut self, impact: Option<ImpactBurst>) -> Self {
        self.impact = impact;
        self
    }

    /// World position the skill is aimed at.
    pub fn aim_target(&self, ctx: &CastContext) -> Option<Vec2> {
        match self.aim {
            AimMode::Pointer => ctx.pointer,
            AimMode::NearestHostile { search_radius } => ctx
                .nearest_hostile(ctx.origin, search_radius)
                .map(|(_, position)| position),
        }
    }

    /// Unit direction from the caster towards the aim target.
    /// `None` when there is nothing to aim at or the target sits on the caster.
    pub fn aim_direction(&self, ctx: &CastContext) -> Option<Vec2> {
        self.aim_target(ctx)
            .and_then(|target| (target - ctx.origin).try_normalize())
    }

    pub fn create_projectiles(&self, source: Entity, direction: Vec2) -> Vec<Projectile> {
        self.multishot
            .directions(direction)
            .into_iter()
            .map(|direction| Projectile::launch(source, direction, &self.params))
            .collect()
    }

    /// Area strike around the aim target, for skills with an impact burst.
    pub fn impact_strike(&self, ctx: &CastContext) -> Option<AreaStrike> {
        let impact = self.impact?;
        let center = self.aim_target(ctx)?;
        Some(AreaStrike {
            center,
            radius: impact.radius,
            damage: impact.damage,
            dot_damage: impact.dot_damage,
            dot_duration: impact.dot_duration,
            targets: ctx.hostiles_within(center, impact.radius),
        })
    }
}

impl MultiProjectile for ProjectileSkill {
    fn multishot(&self) -> &Multishot {
        &self.multishot
    }

    fn multishot_mut(&mut self) -> &mut Multishot {
        &mut self.multishot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(a.distance(b) < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_fan_is_centred_on_aim() {
        let mut multishot = Multishot::new(3, 15.0);
        assert_eq!(multishot.offsets(), vec![0.0]);

        multishot.enable();
        assert_eq!(multishot.offsets(), vec![-15.0, 0.0, 15.0]);

        let directions = multishot.directions(Vec2::X);
        assert_eq!(directions.len(), 3);
        assert_close(directions[0], Vec2::from_angle((-15.0f32).to_radians()));
        assert_close(directions[1], Vec2::X);
        assert_close(directions[2], Vec2::from_angle(15.0f32.to_radians()));
    }

    #[test]
    fn test_even_count_has_no_centre_shot() {
        let mut multishot = Multishot::new(4, 10.0);
        multishot.enable();
        assert_eq!(multishot.offsets(), vec![-15.0, -5.0, 5.0, 15.0]);
    }

    #[test]
    fn test_aim_resolution() {
        let skill = ProjectileSkill::new(ProjectileParams::default());
        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO);
        assert_eq!(skill.aim_direction(&ctx), None);

        let ctx = ctx.with_pointer(Some(Vec2::new(0.0, 40.0)));
        assert_eq!(skill.aim_direction(&ctx), Some(Vec2::Y));

        let ctx = ctx.with_pointer(Some(Vec2::ZERO));
        assert_eq!(skill.aim_direction(&ctx), None);
    }

    #[test]
    fn test_multi_projectile_toggles_fan() {
        let mut skill = ProjectileSkill::new(ProjectileParams::default());
        assert!(!skill.is_multi_projectile_enabled());

        skill.enable_multi_projectiles();
        assert!(skill.is_multi_projectile_enabled());
        assert_eq!(skill.create_projectiles(Entity::PLACEHOLDER, Vec2::X).len(), 3);

        skill.disable_multi_projectiles();
        assert_eq!(skill.create_projectiles(Entity::PLACEHOLDER, Vec2::X).len(), 1);
    }

    #[test]
    fn test_impact_strike_centres_on_aim_target() {
        let mut world = World::new();
        let inside = world.spawn_empty().id();
        let outside = world.spawn_empty().id();
        let hostiles = [(inside, Vec2::new(110.0, 0.0)), (outside, Vec2::new(400.0, 0.0))];

        let skill = ProjectileSkill::new(ProjectileParams::default()).with_impact(Some(ImpactBurst {
            radius: 50.0,
            damage: 25.0,
            dot_damage: 10.0,
            dot_duration: 3.0,
        }));
        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO).with_hostiles(&hostiles);
        assert!(skill.impact_strike(&ctx).is_none(), "nothing to aim at");

        let ctx = ctx.with_pointer(Some(Vec2::new(100.0, 0.0)));
        let strike = skill.impact_strike(&ctx).expect("impact burst configured");
        assert_eq!(strike.center, Vec2::new(100.0, 0.0));
        assert_eq!(strike.targets, vec![inside]);
        assert_eq!(strike.dot_damage, 10.0);
    }

    #[test]
    fn test_nearest_hostile_aim_ignores_pointer() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let hostiles = [(far, Vec2::new(90.0, 0.0)), (near, Vec2::new(0.0, -30.0))];

        let skill = ProjectileSkill::new(ProjectileParams::default())
            .with_aim(AimMode::NearestHostile { search_radius: 100.0 });
        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO)
            .with_pointer(Some(Vec2::new(0.0, 50.0)))
            .with_hostiles(&hostiles);
        assert_eq!(skill.aim_direction(&ctx), Some(Vec2::NEG_Y));

        let out_of_reach = ProjectileSkill::new(ProjectileParams::default())
            .with_aim(AimMode::NearestHostile { search_radius: 10.0 });
        assert_eq!(out_of_reach.aim_direction(&ctx), None);
    }
}
