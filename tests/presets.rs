use std::fs;

use impactsim::{
    config::EngineConfig, Engine, EngineError, Material, PresetLoader, ScenarioKind,
};
use tempfile::tempdir;

fn shipped_presets() -> PresetLoader {
    PresetLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/presets"))
}

#[test]
fn every_shipped_preset_computes() {
    let presets = shipped_presets().load_all().unwrap();
    assert_eq!(presets.len(), 6);

    let engine = Engine::new(EngineConfig::default()).unwrap();
    for preset in &presets {
        let params = preset.parameters().unwrap();
        let result = engine.compute_seeded(&params, 7).unwrap();
        assert!(!result.layers.is_empty(), "{}", preset.name);
    }
}

#[test]
fn find_by_file_stem_or_name() {
    let loader = shipped_presets();
    let meteor = loader.find("meteor_crater").unwrap();
    assert_eq!(meteor.name, "Meteor Crater");
    let params = meteor.parameters().unwrap();
    assert_eq!(params.material, Material::Iron);
    assert_eq!(params.scenario, ScenarioKind::Ground);

    let chicxulub = loader.find("chicxulub").unwrap();
    assert_eq!(chicxulub.parameters().unwrap().scenario, ScenarioKind::Water);
    assert_eq!(loader.find("Tunguska").unwrap().impact.size, 50.0);
    assert!(loader.find("vesta").is_err());
}

#[test]
fn minimal_preset_uses_request_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("custom.yaml"),
        "name: Custom\nimpact:\n  lat: 10\n  lon: 20\n  size: 30\n  speed: 17\n  angle: 60\n",
    )
    .unwrap();

    let preset = PresetLoader::new(dir.path()).load("custom.yaml").unwrap();
    assert_eq!(preset.description, None);
    let params = preset.parameters().unwrap();
    assert_eq!(params.material, Material::Stone);
    assert_eq!(params.scenario, ScenarioKind::Ground);
}

#[test]
fn bad_material_in_preset_surfaces_on_parameters() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "name: Bad\nimpact:\n  lat: 0\n  lon: 0\n  size: 30\n  speed: 17\n  angle: 60\n  material: wood\n",
    )
    .unwrap();

    let preset = PresetLoader::new(dir.path()).load("bad.yaml").unwrap();
    assert!(matches!(
        preset.parameters(),
        Err(EngineError::UnknownMaterial { .. })
    ));
}

#[test]
fn malformed_preset_names_the_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.yaml"), "name: [unclosed").unwrap();
    let err = PresetLoader::new(dir.path()).load("broken.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("broken.yaml"));
}

#[test]
fn shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.yaml");
    let config = EngineConfig::from_yaml(path).unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.rng.seed, None);
}

#[test]
fn seeded_config_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine.yaml");
    let mut config = EngineConfig::default();
    config.rng.seed = Some(99);
    config.to_yaml(&path).unwrap();

    let loaded = EngineConfig::from_yaml(&path).unwrap();
    assert_eq!(loaded.rng.seed, Some(99));
    assert_eq!(loaded, config);
}
