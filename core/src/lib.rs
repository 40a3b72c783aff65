use {
    bevy::prelude::*, combat::CombatPlugin, loading::LoadingManagerPlugin,
    projectiles::ProjectilesPlugin, skills::SkillsPlugin, states::GameState,
    system_schedule::{GameSchedule, SystemSchedulePlugin},
};

mod systems;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_plugins((
                SystemSchedulePlugin,
                LoadingManagerPlugin,
                SkillsPlugin,
                ProjectilesPlugin,
                CombatPlugin,
            ))
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Running), systems::spawn_arena)
            .add_systems(
                Update,
                (
                    systems::update_aim_point.in_set(GameSchedule::FrameStart),
                    systems::read_cast_keys.in_set(GameSchedule::ResolveIntent),
                    (systems::chase_caster, systems::contact_damage)
                        .chain()
                        .in_set(GameSchedule::PerformAction),
                )
                    .run_if(in_state(GameState::Running)),
            )
            .add_observer(systems::respawn_enemy);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
