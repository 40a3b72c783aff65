use {bevy::prelude::*, skill_components::ResourcePool};

/// An entity that owns a `SkillSlot` and casts its skills.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Caster;

#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component, Default)]
pub struct Mana {
    pub current: f32,
    pub max: f32,
    pub regen_per_second: f32,
}

impl Mana {
    pub fn new(max: f32, regen_per_second: f32) -> Self {
        Self {
            current: max,
            max,
            regen_per_second,
        }
    }

    pub fn regenerate(&mut self, delta: f32) {
        self.current = (self.current + self.regen_per_second * delta).min(self.max);
    }
}

impl ResourcePool for Mana {
    fn available(&self) -> f32 {
        self.current
    }

    fn consume(&mut self, amount: f32) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }
}

/// Absorbs damage before health; filled by life leech.
#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component, Default)]
pub struct EnergyShield {
    pub current: f32,
    pub max: f32,
}

impl EnergyShield {
    pub fn new(max: f32) -> Self {
        Self { current: 0.0, max }
    }

    /// Adds `amount`, capped at `max`. Returns how much was actually gained.
    pub fn grant(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Soaks as much of `damage` as possible and returns the remainder.
    pub fn absorb(&mut self, damage: f32) -> f32 {
        let soaked = damage.min(self.current);
        self.current -= soaked;
        damage - soaked
    }
}

/// World position the caster is pointing at (cursor for the player).
#[derive(Component, Reflect, Default, Debug, Clone, Copy)]
#[reflect(Component, Default)]
pub struct AimPoint(pub Option<Vec2>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mana_consume_is_all_or_nothing() {
        let mut mana = Mana::new(30.0, 0.0);
        assert!(mana.consume(20.0));
        assert_eq!(mana.current, 10.0);
        assert!(!mana.consume(15.0));
        assert_eq!(mana.current, 10.0);
    }

    #[test]
    fn test_mana_regen_caps_at_max() {
        let mut mana = Mana::new(50.0, 10.0);
        mana.current = 45.0;
        mana.regenerate(1.0);
        assert_eq!(mana.current, 50.0);
    }

    #[test]
    fn test_shield_grant_and_absorb() {
        let mut shield = EnergyShield::new(10.0);
        assert_eq!(shield.grant(4.0), 4.0);
        assert_eq!(shield.grant(10.0), 6.0);
        assert_eq!(shield.current, 10.0);

        assert_eq!(shield.absorb(3.0), 0.0);
        assert_eq!(shield.absorb(12.0), 5.0);
        assert_eq!(shield.current, 0.0);
    }
}
