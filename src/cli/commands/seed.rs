use crate::config::Config;
use crate::db::migrator::DEFAULT_ADMIN_EMAIL;
use crate::db::{DramaInput, DramaListQuery, EpisodeInput, NewUser, Store};
use crate::domain::{DramaStatus, UserRole, slugify};

const SAMPLE_GENRES: [&str; 6] = [
    "Romance",
    "Action",
    "Comedy",
    "Fantasy",
    "Thriller",
    "Historical",
];

const DEMO_EMAIL: &str = "user@drakor.local";
const DEMO_PASSWORD: &str = "password123";

/// Safe to run repeatedly: genres and the demo user are matched by slug
/// and email, and dramas are only added to an empty catalog.
pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    println!("Seeding database...");

    let mut created = 0;
    for name in SAMPLE_GENRES {
        let slug = slugify(name);
        if store.get_genre_by_slug(&slug).await?.is_none() {
            store.create_genre(name, &slug).await?;
            created += 1;
        }
    }
    println!("  Genres: {created} created, {} present", SAMPLE_GENRES.len() - created);

    if store.get_user_by_email(DEMO_EMAIL).await?.is_none() {
        store
            .create_user(
                NewUser {
                    email: DEMO_EMAIL,
                    name: "Regular User",
                    password: DEMO_PASSWORD,
                    role: UserRole::User,
                },
                &config.security,
            )
            .await?;
        println!("  Demo user: {DEMO_EMAIL} / {DEMO_PASSWORD}");
    } else {
        println!("  Demo user already exists");
    }

    let (_, total) = store.list_dramas(&DramaListQuery::default()).await?;
    if total > 0 {
        println!("  Dramas already exist, skipping drama seeding");
        return Ok(());
    }

    let admin_id = store
        .get_user_by_email(DEFAULT_ADMIN_EMAIL)
        .await?
        .map(|u| u.id);

    seed_dramas(&store, admin_id).await?;

    println!("Seeding complete.");
    Ok(())
}

async fn genre_ids(store: &Store, slugs: &[&str]) -> anyhow::Result<Vec<i32>> {
    let mut ids = Vec::with_capacity(slugs.len());
    for slug in slugs {
        if let Some(genre) = store.get_genre_by_slug(slug).await? {
            ids.push(genre.id);
        }
    }
    Ok(ids)
}

async fn seed_dramas(store: &Store, admin_id: Option<i32>) -> anyhow::Result<()> {
    let goblin = DramaInput {
        title: "Goblin: The Lonely and Great God".to_string(),
        synopsis: Some("In ancient times, an invincible general is betrayed...".to_string()),
        poster_url: None,
        year: 2016,
        total_seasons: 1,
        status: DramaStatus::Completed,
        source_url: None,
        genre_ids: genre_ids(store, &["fantasy", "romance"]).await?,
        actors: Vec::new(),
    };
    let goblin_id = store.create_drama(&goblin, admin_id).await?;

    let season = store.create_season(goblin_id, 1, "Season 1").await?;
    store
        .create_episode(
            season.id,
            EpisodeInput {
                episode_number: 1,
                title: "Episode 1".to_string(),
                video_url: "https://sample-videos.com/video321/mp4/720/big_buck_bunny_720p_1mb.mp4"
                    .to_string(),
                duration: 3600,
                thumbnail_url: None,
                source_url: None,
            },
            admin_id,
        )
        .await?;
    println!("  Drama: {} (1 season, 1 episode)", goblin.title);

    let queen = DramaInput {
        title: "Queen of Tears".to_string(),
        synopsis: Some(
            "The queen of department stores and the prince of supermarkets...".to_string(),
        ),
        poster_url: None,
        year: 2024,
        total_seasons: 1,
        status: DramaStatus::Ongoing,
        source_url: None,
        genre_ids: genre_ids(store, &["romance", "comedy"]).await?,
        actors: Vec::new(),
    };
    store.create_drama(&queen, admin_id).await?;
    println!("  Drama: {}", queen.title);

    Ok(())
}
