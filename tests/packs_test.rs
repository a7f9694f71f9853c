//! Pack registry tests
//!
//! Builtin packs loaded from a directory, manual packs registered at runtime.

mod utils;

use fable_lib::modules::packs::ManifestType;
use fable_lib::shared::{CompositeId, EngineConfig};
use fable_lib::Engine;
use std::fs;
use std::sync::Arc;
use utils::{factories::{CharacterFactory, ManifestFactory}, helpers};

const VTUBERS: &str = r#"{
    "id": "vtubers",
    "title": "Vtubers",
    "media": {
        "new": [{ "id": "hololive", "title": { "english": "Hololive" }, "popularity": 40000 }]
    },
    "characters": {
        "new": [{
            "id": "1",
            "name": { "english": "Gawr Gura" },
            "media": [{ "role": "MAIN", "mediaId": "hololive" }]
        }],
        "conflicts": ["anilist:5"]
    }
}"#;

fn config_with_packs(dir: &std::path::Path) -> EngineConfig {
    EngineConfig {
        packs_dir: Some(dir.to_path_buf()),
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn test_engine_loads_builtin_packs() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("vtubers.json"), VTUBERS).unwrap();

    let engine = Engine::from_config(&config_with_packs(dir.path())).unwrap();

    let builtin = engine.registry().list(Some(ManifestType::Builtin));
    assert_eq!(builtin.len(), 1);
    assert_eq!(builtin[0].display_title(), "Vtubers");

    let characters = engine
        .search()
        .characters_by_ids(&["vtubers:1".to_string()], None)
        .await
        .unwrap();

    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].info.pack_id.as_deref(), Some("vtubers"));
    assert!(engine
        .resolver()
        .conflicts()
        .is_disabled(&CompositeId::parse("5"), None));
}

#[test]
fn test_engine_rejects_broken_pack() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    assert!(Engine::from_config(&config_with_packs(dir.path())).is_err());
}

#[tokio::test]
async fn test_manual_pack_stays_in_its_guild() {
    let remote = Arc::new(helpers::FakeCatalog::new());
    let engine = helpers::build_engine(remote.clone());

    let manifest = ManifestFactory::new("guild-pack")
        .character(CharacterFactory::new("1", "Local Hero").build())
        .build();
    engine.registry().register(manifest, Some("guild-1"));

    assert_eq!(engine.registry().list_for(Some("guild-1"), None).len(), 1);
    assert!(engine.registry().list_for(Some("guild-2"), None).is_empty());

    let ids = vec!["guild-pack:1".to_string()];
    let inside = engine.search().characters_by_ids(&ids, Some("guild-1")).await.unwrap();
    let outside = engine.search().characters_by_ids(&ids, Some("guild-2")).await.unwrap();

    assert_eq!(inside.len(), 1);
    assert!(outside.is_empty());
    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn test_conflict_hides_remote_record() {
    let remote = Arc::new(
        helpers::FakeCatalog::new()
            .with_character(CharacterFactory::new("1", "Replaced").build())
            .with_character(CharacterFactory::new("2", "Kept").build()),
    );
    let engine = helpers::build_engine(remote.clone());

    engine
        .registry()
        .register(ManifestFactory::new("fixes").conflicts_character("anilist:1").build(), None);

    let characters = engine
        .search()
        .characters_by_ids(&["1".to_string(), "2".to_string()], None)
        .await
        .unwrap();

    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].info.id, "2");
    assert_eq!(remote.call_count(), 1);

    engine.registry().clear();

    let characters = engine
        .search()
        .characters_by_ids(&["1".to_string()], None)
        .await
        .unwrap();

    assert_eq!(characters.len(), 1);
}
