//! Store-level smoke tests for catalog writes, listing and the seed command.

use std::collections::HashSet;

use drakor::config::Config;
use drakor::db::{DramaFilter, DramaInput, DramaListQuery, DramaWriteError, GenreRef, Store};
use drakor::domain::{ActorRole, DramaId, DramaSort, DramaStatus, Pagination};
use drakor::entities::{drama_actors, drama_genres, dramas};
use drakor::services::{DramaService, SeaOrmDramaService};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

fn temp_db_url(tag: &str) -> String {
    let path = std::env::temp_dir().join(format!("drakor-{tag}-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}", path.display())
}

async fn temp_store(tag: &str) -> Store {
    Store::with_pool_options(&temp_db_url(tag), 1, 1)
        .await
        .expect("failed to open store")
}

fn input(title: &str, genre_ids: Vec<i32>, actors: Vec<(i32, ActorRole)>) -> DramaInput {
    DramaInput {
        title: title.to_string(),
        synopsis: None,
        poster_url: None,
        year: 2016,
        total_seasons: 1,
        status: DramaStatus::Ongoing,
        source_url: None,
        genre_ids,
        actors,
    }
}

#[tokio::test]
async fn smoke_duplicate_association_ids_collapse() {
    let store = temp_store("dupes").await;
    let fantasy = store.create_genre("Fantasy", "fantasy").await.unwrap();
    let romance = store.create_genre("Romance", "romance").await.unwrap();
    let actor = store.create_actor("Gong Yoo", None).await.unwrap();

    let id = store
        .create_drama(
            &input(
                "Goblin",
                vec![fantasy.id, fantasy.id, romance.id],
                vec![(actor.id, ActorRole::Main), (actor.id, ActorRole::Support)],
            ),
            None,
        )
        .await
        .unwrap();

    let genres = store.get_drama_genres(id).await.unwrap();
    assert_eq!(genres.len(), 2);

    let cast = store.get_drama_cast(id).await.unwrap();
    assert_eq!(cast.len(), 1);
    assert_eq!(cast[0].1, ActorRole::Main);
}

#[tokio::test]
async fn smoke_failed_update_keeps_previous_state() {
    let store = temp_store("rollback").await;
    let fantasy = store.create_genre("Fantasy", "fantasy").await.unwrap();
    let actor = store.create_actor("Kim Go-eun", None).await.unwrap();

    let id = store
        .create_drama(
            &input("Goblin", vec![fantasy.id], vec![(actor.id, ActorRole::Main)]),
            None,
        )
        .await
        .unwrap();

    let result = store
        .update_drama(
            id,
            &input("Renamed", vec![fantasy.id], vec![(9999, ActorRole::Main)]),
        )
        .await;
    assert!(matches!(result, Err(DramaWriteError::MissingActor(9999))));

    let drama = store.get_drama(id).await.unwrap().unwrap();
    assert_eq!(drama.title, "Goblin");
    assert_eq!(store.get_drama_cast(id).await.unwrap().len(), 1);
    assert_eq!(store.get_drama_genres(id).await.unwrap().len(), 1);

    let missing = store
        .update_drama(DramaId::new(4242), &input("Nope", vec![fantasy.id], vec![]))
        .await;
    assert!(matches!(missing, Err(DramaWriteError::NotFound(_))));
}

#[tokio::test]
async fn smoke_list_counts_filtered_set() {
    let store = temp_store("list").await;
    let romance = store.create_genre("Romance", "romance").await.unwrap();
    let action = store.create_genre("Action", "action").await.unwrap();

    for i in 0..5 {
        store
            .create_drama(&input(&format!("Romance {i}"), vec![romance.id], vec![]), None)
            .await
            .unwrap();
    }
    store
        .create_drama(&input("Action Hero", vec![action.id], vec![]), None)
        .await
        .unwrap();

    let query = DramaListQuery {
        filter: DramaFilter {
            genre: GenreRef::parse("romance"),
            ..Default::default()
        },
        sort: DramaSort::Oldest,
        window: Pagination::new(Some(3), Some(2), 10, 100),
    };
    let (items, total) = store.list_dramas(&query).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Romance 4");

    let beyond = DramaListQuery {
        window: Pagination::new(Some(9), Some(2), 10, 100),
        ..query
    };
    let (items, total) = store.list_dramas(&beyond).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 5);
}

#[tokio::test]
async fn smoke_seed_is_idempotent() {
    let mut config = Config::default();
    config.general.database_path = temp_db_url("seed");

    drakor::cli::cmd_seed(&config).await.unwrap();
    drakor::cli::cmd_seed(&config).await.unwrap();

    let store = Store::new(&config.general.database_path).await.unwrap();
    assert_eq!(store.list_genres().await.unwrap().len(), 6);
    assert!(store.get_user_by_email("user@drakor.local").await.unwrap().is_some());

    let (dramas, total) = store.list_dramas(&DramaListQuery::default()).await.unwrap();
    assert_eq!(total, 2);

    let goblin = dramas
        .iter()
        .find(|d| d.title.starts_with("Goblin"))
        .expect("seeded Goblin");
    let goblin_id = DramaId::new(goblin.id);

    let slugs: Vec<String> = store
        .get_drama_genres(goblin_id)
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.slug)
        .collect();
    assert_eq!(slugs, vec!["fantasy", "romance"]);

    let seasons = store.list_seasons(goblin_id).await.unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(store.list_episodes(seasons[0].id).await.unwrap().len(), 1);
}

async fn set_view_count(store: &Store, id: DramaId, views: i64) {
    dramas::Entity::update_many()
        .col_expr(dramas::Column::ViewCount, Expr::value(views))
        .filter(dramas::Column::Id.eq(id.value()))
        .exec(&store.conn)
        .await
        .unwrap();
}

fn titles(items: &[dramas::Model]) -> Vec<&str> {
    items.iter().map(|d| d.title.as_str()).collect()
}

#[tokio::test]
async fn smoke_missing_actor_on_create_leaves_nothing() {
    let store = temp_store("create-rollback").await;
    let fantasy = store.create_genre("Fantasy", "fantasy").await.unwrap();

    let result = store
        .create_drama(
            &input("Goblin", vec![fantasy.id], vec![(9999, ActorRole::Main)]),
            None,
        )
        .await;
    assert!(matches!(result, Err(DramaWriteError::MissingActor(9999))));

    let (_, total) = store.list_dramas(&DramaListQuery::default()).await.unwrap();
    assert_eq!(total, 0);
    assert_eq!(dramas::Entity::find().count(&store.conn).await.unwrap(), 0);
    assert_eq!(
        drama_genres::Entity::find().count(&store.conn).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn smoke_popular_and_latest_order_rows() {
    let store = temp_store("sorts").await;
    let genre = store.create_genre("Romance", "romance").await.unwrap();

    let mut ids = Vec::new();
    for title in ["First", "Second", "Third"] {
        ids.push(
            store
                .create_drama(&input(title, vec![genre.id], vec![]), None)
                .await
                .unwrap(),
        );
    }
    set_view_count(&store, ids[0], 0).await;
    set_view_count(&store, ids[1], 50).await;
    set_view_count(&store, ids[2], 10).await;

    let popular = DramaListQuery {
        sort: DramaSort::from_key(Some("popular")),
        ..Default::default()
    };
    let (items, _) = store.list_dramas(&popular).await.unwrap();
    assert_eq!(titles(&items), vec!["Second", "Third", "First"]);

    let (items, _) = store.list_dramas(&DramaListQuery::default()).await.unwrap();
    assert_eq!(titles(&items), vec!["Third", "Second", "First"]);

    let unknown = DramaListQuery {
        sort: DramaSort::from_key(Some("trending")),
        ..Default::default()
    };
    let (items, _) = store.list_dramas(&unknown).await.unwrap();
    assert_eq!(titles(&items), vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn smoke_pages_cover_filtered_set_once() {
    let store = temp_store("pages").await;
    let romance = store.create_genre("Romance", "romance").await.unwrap();
    let action = store.create_genre("Action", "action").await.unwrap();

    let mut expected = HashSet::new();
    for i in 0..7 {
        let id = store
            .create_drama(&input(&format!("Romance {i}"), vec![romance.id], vec![]), None)
            .await
            .unwrap();
        expected.insert(id.value());
    }
    for i in 0..2 {
        store
            .create_drama(&input(&format!("Action {i}"), vec![action.id], vec![]), None)
            .await
            .unwrap();
    }

    // Every rating and view count is 0, so only the id tie-break separates rows.
    for sort in [
        DramaSort::Popular,
        DramaSort::Rating,
        DramaSort::Oldest,
        DramaSort::Latest,
    ] {
        let mut seen = Vec::new();
        let mut page = 1;
        loop {
            let query = DramaListQuery {
                filter: DramaFilter {
                    genre: Some(GenreRef::Id(romance.id)),
                    ..Default::default()
                },
                sort,
                window: Pagination::new(Some(page), Some(3), 10, 100),
            };
            let (items, total) = store.list_dramas(&query).await.unwrap();
            assert_eq!(total, 7, "{sort:?}");
            if items.is_empty() {
                break;
            }
            seen.extend(items.iter().map(|d| d.id));
            page += 1;
        }

        assert_eq!(page, 4, "{sort:?}");
        assert_eq!(seen.len(), 7, "{sort:?}");
        assert_eq!(seen.iter().copied().collect::<HashSet<_>>(), expected, "{sort:?}");
    }
}

#[tokio::test]
async fn smoke_unknown_stored_role_reads_as_support() {
    let store = temp_store("role").await;
    let genre = store.create_genre("Fantasy", "fantasy").await.unwrap();
    let actor = store.create_actor("Lee Dong-wook", None).await.unwrap();
    let id = store
        .create_drama(
            &input("Goblin", vec![genre.id], vec![(actor.id, ActorRole::Main)]),
            None,
        )
        .await
        .unwrap();

    drama_actors::Entity::update_many()
        .col_expr(drama_actors::Column::Role, Expr::value("cameo"))
        .filter(drama_actors::Column::DramaId.eq(id.value()))
        .exec(&store.conn)
        .await
        .unwrap();

    let cast = store.get_drama_cast(id).await.unwrap();
    assert_eq!(cast.len(), 1);
    assert_eq!(cast[0].0.id, actor.id);
    assert_eq!(cast[0].1, ActorRole::Support);
}

#[tokio::test]
async fn smoke_unreadable_cast_yields_empty_collection() {
    let store = temp_store("lenient").await;
    let genre = store.create_genre("Fantasy", "fantasy").await.unwrap();
    let actor = store.create_actor("Gong Yoo", None).await.unwrap();
    let id = store
        .create_drama(
            &input("Goblin", vec![genre.id], vec![(actor.id, ActorRole::Main)]),
            None,
        )
        .await
        .unwrap();

    store
        .conn
        .execute_unprepared("DROP TABLE drama_actors")
        .await
        .unwrap();
    assert!(store.get_drama_cast(id).await.is_err());

    let service = SeaOrmDramaService::new(store.clone());
    let drama = service.get(id).await.unwrap();
    assert_eq!(drama.title, "Goblin");
    assert!(drama.actors.is_empty());
    assert_eq!(drama.genres.len(), 1);
    assert_eq!(drama.genres[0].slug, "fantasy");

    assert!(service.get(DramaId::new(4242)).await.is_err());
}
