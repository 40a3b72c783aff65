use bevy::prelude::*;

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
#[require(DamageOverTime)]
pub struct Enemy;

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Dead;

#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// A single damage-over-time effect.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct DotInstance {
    pub per_second: f32,
    pub remaining: f32,
}

/// Active damage-over-time effects. Stacks: each application runs on its own.
#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component, Default)]
pub struct DamageOverTime(pub Vec<DotInstance>);

impl DamageOverTime {
    pub fn apply(&mut self, per_second: f32, duration: f32) {
        if per_second <= 0.0 || duration <= 0.0 {
            return;
        }
        self.0.push(DotInstance {
            per_second,
            remaining: duration,
        });
    }

    /// Advances every effect by `delta` and returns the damage dealt this frame.
    /// Expired effects are dropped; a final partial tick only counts the time left.
    pub fn tick(&mut self, delta: f32) -> f32 {
        let mut damage = 0.0;
        for dot in &mut self.0 {
            let step = delta.min(dot.remaining);
            damage += dot.per_second * step;
            dot.remaining -= step;
        }
        self.0.retain(|dot| dot.remaining > 0.0);
        damage
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Movement slow applied by chilling projectiles.
#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component, Default)]
pub struct Chilled {
    /// Multiplier applied to movement speed (0.5 = half speed)
    pub slow_factor: f32,
    pub timer: Timer,
}

impl Chilled {
    pub fn new(slow_factor: f32, duration: f32) -> Self {
        Self {
            slow_factor,
            timer: Timer::from_seconds(duration, TimerMode::Once),
        }
    }
}

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct MovementSpeed(pub f32);

/// Damage dealt to casters standing within `radius`, at most once per timer period.
#[derive(Component, Reflect, Default, Debug)]
#[reflect(Component, Default)]
pub struct ContactDamage {
    pub damage: f32,
    pub radius: f32,
    pub timer: Timer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_runs_for_its_duration() {
        let mut dot = DamageOverTime::default();
        dot.apply(10.0, 3.0);

        let mut total = 0.0;
        for _ in 0..4 {
            total += dot.tick(1.0);
        }
        assert_eq!(total, 30.0);
        assert!(dot.is_empty());
    }

    #[test]
    fn test_dot_stacks_and_ignores_empty_effects() {
        let mut dot = DamageOverTime::default();
        dot.apply(10.0, 2.0);
        dot.apply(5.0, 1.0);
        dot.apply(0.0, 5.0);
        assert_eq!(dot.0.len(), 2);

        assert_eq!(dot.tick(1.0), 15.0);
        assert_eq!(dot.0.len(), 1);
    }

    #[test]
    fn test_health_never_negative() {
        let mut health = Health::new(20.0);
        health.take_damage(25.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_depleted());
    }
}
