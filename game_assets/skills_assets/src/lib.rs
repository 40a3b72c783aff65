use {
    bevy::{platform::collections::HashMap, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    projectile_components::ProjectileParams,
    serde::{Deserialize, Serialize},
};

pub struct SkillsAssetsPlugin;

impl Plugin for SkillsAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RonAssetPlugin::<SkillDefinition>::new(&["skill.ron"]),
            RonAssetPlugin::<LoadoutDefinition>::new(&["loadout.ron"]),
        ))
        .init_resource::<SkillMap>()
        .init_resource::<LoadoutMap>()
        .register_type::<SkillKindDefinition>()
        .register_type::<AimMode>()
        .register_type::<MultishotSettings>()
        .register_type::<ImpactBurst>();
    }
}

/// Top-level skill definition loaded from `.skill.ron`.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// Unique identifier (e.g., "fireball", "cast_on_damage_taken")
    pub id: String,
    /// Display name shown in UI
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Cooldown in seconds (0 = no cooldown)
    #[serde(default)]
    pub cooldown_secs: f32,
    #[serde(default)]
    pub mana_cost: f32,
    #[serde(default)]
    pub has_reservation: bool,
    #[serde(default)]
    pub is_channeling: bool,
    pub kind: SkillKindDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum SkillKindDefinition {
    /// Active skill that fires projectiles along its aim direction
    Projectile {
        projectile: ProjectileParams,
        #[serde(default)]
        aim: AimMode,
        #[serde(default)]
        multishot: MultishotSettings,
        /// Extra strike around the aim point on every cast
        #[serde(default)]
        impact: Option<ImpactBurst>,
    },
    /// Strikes every hostile around the caster; fires by itself when the caster is hit
    Retaliation { radius: f32, damage: f32 },
    /// Support: casts linked skills once enough damage was taken
    CastOnDamageTaken {
        #[serde(default = "default_threshold")]
        threshold: f32,
    },
    /// Support: linked projectile skills fire in a fan
    MultipleProjectiles,
}

fn default_threshold() -> f32 {
    10.0
}

/// Where a projectile skill points when cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect, Default)]
#[reflect(Serialize, Deserialize)]
pub enum AimMode {
    /// Towards the caster's `AimPoint`
    #[default]
    Pointer,
    /// Towards the closest hostile within `search_radius`
    NearestHostile { search_radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
#[serde(default)]
pub struct MultishotSettings {
    pub count: u32,
    pub step_degrees: f32,
}

impl Default for MultishotSettings {
    fn default() -> Self {
        Self {
            count: 3,
            step_degrees: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub struct ImpactBurst {
    pub radius: f32,
    pub damage: f32,
    #[serde(default)]
    pub dot_damage: f32,
    #[serde(default = "default_dot_duration")]
    pub dot_duration: f32,
}

fn default_dot_duration() -> f32 {
    projectile_components::DEFAULT_DOT_DURATION
}

/// Ordered skill slots and support links loaded from `.loadout.ron`.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct LoadoutDefinition {
    pub id: String,
    /// Skill id per slot; the list length is the slot capacity
    pub slots: Vec<Option<String>>,
    #[serde(default)]
    pub links: Vec<SupportLink>,
}

/// Links the support in slot `support` to the active skill in slot `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportLink {
    pub support: usize,
    pub active: usize,
}

/// Resource mapping skill IDs to asset handles.
#[derive(Resource, Default)]
pub struct SkillMap {
    pub handles: HashMap<String, Handle<SkillDefinition>>,
}

/// Resource mapping loadout IDs to asset handles.
#[derive(Resource, Default)]
pub struct LoadoutMap {
    pub handles: HashMap<String, Handle<LoadoutDefinition>>,
}
