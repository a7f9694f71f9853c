//! Aggregation across packs and the remote catalog

mod utils;

use fable_lib::modules::catalog::domain::{
    CharacterRecord, CharacterRole, MediaRecord, MediaRelation, MediaRelationRef,
};
use fable_lib::modules::catalog::AggregateOptions;
use fable_lib::Engine;
use std::sync::Arc;
use utils::{
    factories::{CharacterFactory, ManifestFactory, MediaFactory},
    helpers::{self, FakeCatalog},
};

fn engine_with_pack(remote: Arc<FakeCatalog>) -> Engine {
    let engine = helpers::build_engine(remote);

    let manifest = ManifestFactory::new("pack")
        .media(
            MediaFactory::new("m1", "Local Show")
                .relation(MediaRelation::Sequel, "anilist:10")
                .relation(MediaRelation::Prequel, "m2")
                .character(CharacterRole::Main, "c1")
                .character(CharacterRole::Supporting, "anilist:20")
                .build(),
        )
        .media(MediaFactory::new("m2", "Local Prequel").build())
        .character(
            CharacterFactory::new("c1", "Local Lead")
                .appears_in(CharacterRole::Main, "m1")
                .appears_in(CharacterRole::Background, "anilist:10")
                .build(),
        )
        .build();

    engine.registry().register(manifest, None);
    engine
}

async fn local_media(engine: &Engine, id: &str) -> MediaRecord {
    let mut media = engine
        .search()
        .media_by_ids(&[id.to_string()], None)
        .await
        .unwrap();
    MediaRecord::from(media.remove(0))
}

#[tokio::test]
async fn test_media_mixes_local_and_remote_edges() {
    let remote = Arc::new(
        FakeCatalog::new()
            .with_media(MediaFactory::new("10", "Remote Sequel").build())
            .with_character(CharacterFactory::new("20", "Remote Sidekick").build()),
    );
    let engine = engine_with_pack(remote.clone());

    let record = local_media(&engine, "pack:m1").await;
    let media = engine
        .aggregator()
        .media(record, &AggregateOptions::for_guild(None))
        .await
        .unwrap();

    let relations: Vec<_> = media
        .relations
        .edges
        .iter()
        .map(|edge| (edge.relation, edge.node.info.composite_id().unwrap().to_string()))
        .collect();
    assert_eq!(
        relations,
        vec![
            (MediaRelation::Sequel, "anilist:10".to_string()),
            (MediaRelation::Prequel, "pack:m2".to_string()),
        ]
    );

    let characters: Vec<_> = media
        .characters
        .edges
        .iter()
        .map(|edge| (edge.role, edge.node.info.id.clone()))
        .collect();
    assert_eq!(
        characters,
        vec![
            (CharacterRole::Main, "c1".to_string()),
            (CharacterRole::Supporting, "20".to_string()),
        ]
    );

    // one media lookup and one character lookup
    assert_eq!(remote.call_count(), 2);
}

#[tokio::test]
async fn test_character_edges_respect_end() {
    let remote = Arc::new(FakeCatalog::new().with_media(MediaFactory::new("10", "Remote").build()));
    let engine = engine_with_pack(remote.clone());

    let mut characters = engine
        .search()
        .characters_by_ids(&["pack:c1".to_string()], None)
        .await
        .unwrap();
    let record = CharacterRecord::from(characters.remove(0));

    let character = engine
        .aggregator()
        .character(record, &AggregateOptions::for_guild(None).with_end(1))
        .await
        .unwrap();

    assert_eq!(character.media.edges.len(), 1);
    assert_eq!(character.primary_edge().unwrap().node.info.id, "m1");
    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn test_remote_outage_drops_only_remote_side() {
    let remote = Arc::new(FakeCatalog::new().failing());
    let engine = helpers::build_engine(remote.clone());

    let manifest = ManifestFactory::new("pack")
        .media(
            MediaFactory::new("m1", "Local Show")
                .relation(MediaRelation::Sequel, "anilist:10")
                .character(CharacterRole::Main, "c1")
                .build(),
        )
        .character(CharacterFactory::new("c1", "Local Lead").build())
        .build();
    engine.registry().register(manifest, None);

    let record = local_media(&engine, "pack:m1").await;
    let media = engine
        .aggregator()
        .media(record, &AggregateOptions::for_guild(None))
        .await
        .unwrap();

    assert!(media.relations.edges.is_empty());
    assert_eq!(media.characters.edges.len(), 1);
}

#[tokio::test]
async fn test_remote_outage_with_nothing_resolved_fails() {
    let remote = Arc::new(FakeCatalog::new().failing());
    let engine = helpers::build_engine(remote);

    let manifest = ManifestFactory::new("pack")
        .media(
            MediaFactory::new("m1", "Local Show")
                .relation(MediaRelation::Sequel, "anilist:10")
                .build(),
        )
        .build();
    engine.registry().register(manifest, None);

    let record = local_media(&engine, "pack:m1").await;
    let result = engine
        .aggregator()
        .media(record, &AggregateOptions::for_guild(None))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_edge_nodes_keep_their_own_references() {
    let remote = Arc::new(FakeCatalog::new());
    let engine = helpers::build_engine(remote.clone());

    let manifest = ManifestFactory::new("pack")
        .media(
            MediaFactory::new("m1", "Local Show")
                .relation(MediaRelation::Sequel, "m2")
                .build(),
        )
        .media(
            MediaFactory::new("m2", "Local Sequel")
                .relation(MediaRelation::Prequel, "m1")
                .relation(MediaRelation::SideStory, "anilist:30")
                .build(),
        )
        .build();
    engine.registry().register(manifest, None);

    let record = local_media(&engine, "pack:m1").await;
    let media = engine
        .aggregator()
        .media(record, &AggregateOptions::for_guild(None))
        .await
        .unwrap();

    assert_eq!(media.relations.edges.len(), 1);
    let node = &media.relations.edges[0].node;
    assert_eq!(node.info.id, "m2");
    assert_eq!(
        node.relations,
        vec![
            MediaRelationRef {
                relation: MediaRelation::Prequel,
                media_id: "m1".to_string(),
            },
            MediaRelationRef {
                relation: MediaRelation::SideStory,
                media_id: "anilist:30".to_string(),
            },
        ]
    );

    // nested references are never followed
    assert_eq!(remote.call_count(), 0);
}
