mod resources;

use {
    crate::resources::{LoadoutsFolderHandle, SkillsFolderHandle},
    bevy::{asset::LoadedFolder, platform::collections::HashMap, prelude::*},
    skills_assets::{LoadoutDefinition, LoadoutMap, SkillDefinition, SkillMap},
    states::GameState,
};

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_skill_assets, load_loadout_assets))
            .add_systems(
                Update,
                check_assets_loaded.run_if(in_state(GameState::Loading)),
            );
    }
}

fn load_skill_assets(mut cmd: Commands, asset_server: Res<AssetServer>) {
    info!("started loading skill definitions");
    let handle = asset_server.load_folder("skills");
    cmd.insert_resource(SkillsFolderHandle(handle));
}

fn load_loadout_assets(mut cmd: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load_folder("loadouts");
    cmd.insert_resource(LoadoutsFolderHandle(handle));
}

fn check_assets_loaded(
    mut next_state: ResMut<NextState<GameState>>,
    mut skill_map: ResMut<SkillMap>,
    mut loadout_map: ResMut<LoadoutMap>,
    asset_server: Res<AssetServer>,
    skills_folder: Res<SkillsFolderHandle>,
    loadouts_folder: Res<LoadoutsFolderHandle>,
    folders: Res<Assets<LoadedFolder>>,
    skills: Res<Assets<SkillDefinition>>,
    loadouts: Res<Assets<LoadoutDefinition>>,
) {
    if !asset_server.is_loaded_with_dependencies(skills_folder.0.id())
        || !asset_server.is_loaded_with_dependencies(loadouts_folder.0.id())
    {
        return;
    }

    let (Some(skill_folder), Some(loadout_folder)) = (
        folders.get(skills_folder.0.id()),
        folders.get(loadouts_folder.0.id()),
    ) else {
        error!("asset folders reported loaded but are missing");
        return;
    };

    skill_map.handles = index_folder(skill_folder, &skills, |skill| &skill.id);
    loadout_map.handles = index_folder(loadout_folder, &loadouts, |loadout| &loadout.id);
    info!(
        skills = skill_map.handles.len(),
        loadouts = loadout_map.handles.len(),
        "assets loaded"
    );

    next_state.set(GameState::Running);
}

/// Maps every asset of type `A` in `folder` by the id it declares.
///
/// Files of other types are skipped. When two files declare the same id
/// the first one wins.
pub fn index_folder<A: Asset>(
    folder: &LoadedFolder,
    assets: &Assets<A>,
    id_of: impl Fn(&A) -> &String,
) -> HashMap<String, Handle<A>> {
    let mut map = HashMap::new();
    for untyped_handle in folder.handles.iter().cloned() {
        let Ok(handle) = untyped_handle.try_typed::<A>() else {
            continue;
        };
        let Some(asset) = assets.get(&handle) else {
            warn!(?handle, "asset in folder is not loaded");
            continue;
        };

        let id = id_of(asset).clone();
        if map.contains_key(&id) {
            warn!(%id, "duplicate asset id, keeping the first definition");
            continue;
        }
        debug!(%id, "indexed asset");
        map.insert(id, handle);
    }
    map
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        projectile_components::ProjectileParams,
        skills_assets::{AimMode, MultishotSettings, SkillKindDefinition},
    };

    fn skill(id: &str, display_name: &str) -> SkillDefinition {
        SkillDefinition {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: String::new(),
            cooldown_secs: 1.0,
            mana_cost: 0.0,
            has_reservation: false,
            is_channeling: false,
            kind: SkillKindDefinition::Projectile {
                projectile: ProjectileParams::default(),
                aim: AimMode::Pointer,
                multishot: MultishotSettings::default(),
                impact: None,
            },
        }
    }

    #[test]
    fn test_index_folder_keys_by_declared_id() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<SkillDefinition>()
            .init_asset::<LoadoutDefinition>();

        let mut skills = app.world_mut().resource_mut::<Assets<SkillDefinition>>();
        let fireball = skills.add(skill("fireball", "Fireball"));
        let duplicate = skills.add(skill("fireball", "Fireball Copy"));
        let ice_bolt = skills.add(skill("ice_bolt", "Ice Bolt"));

        let mut loadouts = app.world_mut().resource_mut::<Assets<LoadoutDefinition>>();
        let loadout = loadouts.add(LoadoutDefinition {
            id: "default".to_string(),
            slots: vec![Some("fireball".to_string())],
            links: vec![],
        });

        let folder = LoadedFolder {
            handles: vec![
                fireball.clone().untyped(),
                loadout.untyped(),
                duplicate.untyped(),
                ice_bolt.clone().untyped(),
            ],
        };

        let skills = app.world().resource::<Assets<SkillDefinition>>();
        let map = index_folder(&folder, skills, |skill| &skill.id);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("fireball"), Some(&fireball));
        assert_eq!(map.get("ice_bolt"), Some(&ice_bolt));
    }
}
