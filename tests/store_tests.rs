//! Integration tests for the store facade against a throwaway database.

use screenlog::Store;
use screenlog::db::StoreError;
use screenlog::models::media::{Genre, MediaType, Movie, Show};
use screenlog::models::profile::{Profile, ProfileUpdate};
use screenlog::models::watched::{WatchStatus, WatchedShowUpdate};

async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("screenlog-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

fn test_movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: Some("An overview".to_string()),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        release_date: Some("1999-03-31".to_string()),
        vote_average: Some(8.2),
        genre_ids: vec![28, 878],
        genres: Some(vec![Genre {
            id: 28,
            name: "Action".to_string(),
        }]),
    }
}

fn test_show(id: i64, name: &str) -> Show {
    Show {
        id,
        name: name.to_string(),
        overview: None,
        poster_path: None,
        backdrop_path: None,
        first_air_date: Some("2008-01-20".to_string()),
        vote_average: Some(9.0),
        genre_ids: vec![18],
        genres: None,
        number_of_seasons: Some(5),
        number_of_episodes: Some(62),
    }
}

async fn test_profile(store: &Store, name: &str) -> Profile {
    let profile = Profile::new(name);
    store.set_profile(&profile).await.expect("set_profile");
    profile
}

#[tokio::test]
async fn double_add_replaces_watched_movie() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let movie = test_movie(603, "The Matrix");

    store
        .add_watched_movie(&alex.id, &movie, 3, Some("first pass"))
        .await
        .unwrap();
    store
        .add_watched_movie(&alex.id, &movie, 5, None)
        .await
        .unwrap();

    let watched = store.get_watched_movies(&alex.id).await.unwrap();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0].rating, 5);
    assert_eq!(watched[0].notes, None);
    assert_eq!(watched[0].movie.title, "The Matrix");
}

#[tokio::test]
async fn cache_upsert_keeps_latest_row() {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let store = temp_store().await;

    let mut movie = test_movie(603, "The Matrix");
    movie.overview = Some("old synopsis".to_string());
    store.cache_movie(&movie).await.unwrap();

    movie.overview = Some("new synopsis".to_string());
    store.cache_movie(&movie).await.unwrap();

    let cached = store.get_cached_movie(603).await.unwrap().unwrap();
    assert_eq!(cached.overview.as_deref(), Some("new synopsis"));

    let count = screenlog::entities::prelude::CachedMovies::find()
        .count(&store.conn)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn missing_cache_row_is_none_not_error() {
    let store = temp_store().await;
    assert!(store.get_cached_movie(999).await.unwrap().is_none());
    assert!(store.get_cached_show(999).await.unwrap().is_none());
}

#[tokio::test]
async fn cached_metadata_round_trips() {
    let store = temp_store().await;

    let movie = test_movie(603, "The Matrix");
    store.cache_movie(&movie).await.unwrap();
    assert_eq!(store.get_cached_movie(603).await.unwrap().unwrap(), movie);

    let show = test_show(1396, "Breaking Bad");
    store.cache_show(&show).await.unwrap();
    let cached = store.get_cached_show(1396).await.unwrap().unwrap();
    assert_eq!(cached, show);
    assert!(cached.genres.is_none());
}

#[tokio::test]
async fn delete_profile_cascades_only_its_rows() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let brook = test_profile(&store, "Brook").await;

    let movie = test_movie(603, "The Matrix");
    let show = test_show(1396, "Breaking Bad");

    for profile in [&alex, &brook] {
        store
            .add_watched_movie(&profile.id, &movie, 4, None)
            .await
            .unwrap();
        store
            .add_watched_show(&profile.id, &show, 0, WatchStatus::Watching, &[1, 2], None)
            .await
            .unwrap();
        store
            .add_to_watchlist_movie(&profile.id, &movie, 0, None)
            .await
            .unwrap();
    }

    assert!(store.delete_profile(&alex.id).await.unwrap());

    assert!(store.get_watched_movies(&alex.id).await.unwrap().is_empty());
    assert!(store.get_watched_shows(&alex.id).await.unwrap().is_empty());
    assert!(store.get_watchlist(&alex.id).await.unwrap().is_empty());

    assert_eq!(store.get_watched_movies(&brook.id).await.unwrap().len(), 1);
    assert_eq!(store.get_watched_shows(&brook.id).await.unwrap().len(), 1);
    assert_eq!(store.get_watchlist(&brook.id).await.unwrap().len(), 1);

    // Shared cache rows survive the cascade.
    assert!(store.get_cached_movie(603).await.unwrap().is_some());
    assert!(store.get_cached_show(1396).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_last_profile_leaves_empty_store() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;

    assert!(store.delete_profile(&alex.id).await.unwrap());
    assert!(store.get_all_profiles().await.unwrap().is_empty());

    // A second delete is a no-op.
    assert!(!store.delete_profile(&alex.id).await.unwrap());
}

#[tokio::test]
async fn episode_list_round_trips_in_order() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let show = test_show(1396, "Breaking Bad");

    let episodes = vec![3, 1, 7, 2];
    store
        .add_watched_show(&alex.id, &show, 0, WatchStatus::Watching, &episodes, None)
        .await
        .unwrap();

    let watched = store.get_watched_shows(&alex.id).await.unwrap();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0].episodes_watched, episodes);
}

#[tokio::test]
async fn watchlist_join_populates_exactly_one_side() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;

    store
        .add_to_watchlist_movie(&alex.id, &test_movie(603, "The Matrix"), 0, None)
        .await
        .unwrap();
    store
        .add_to_watchlist_show(&alex.id, &test_show(1396, "Breaking Bad"), 0, None)
        .await
        .unwrap();

    let items = store.get_watchlist(&alex.id).await.unwrap();
    assert_eq!(items.len(), 2);

    for item in &items {
        match item.item_type {
            MediaType::Movie => {
                assert!(item.movie.is_some());
                assert!(item.show.is_none());
            }
            MediaType::Tv => {
                assert!(item.show.is_some());
                assert!(item.movie.is_none());
            }
        }
    }
}

#[tokio::test]
async fn watchlist_readd_replaces_not_duplicates() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let movie = test_movie(603, "The Matrix");

    store
        .add_to_watchlist_movie(&alex.id, &movie, 0, None)
        .await
        .unwrap();
    store
        .add_to_watchlist_movie(&alex.id, &movie, 2, Some("rewatch"))
        .await
        .unwrap();

    let items = store.get_watchlist(&alex.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].priority, 2);
    assert_eq!(items[0].notes.as_deref(), Some("rewatch"));
}

#[tokio::test]
async fn update_watched_show_patches_fields() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let show = test_show(1396, "Breaking Bad");

    store
        .add_watched_show(&alex.id, &show, 0, WatchStatus::Watching, &[1], None)
        .await
        .unwrap();

    let patch = WatchedShowUpdate {
        status: Some(WatchStatus::Completed),
        episodes_watched: Some(vec![1, 2, 3]),
        rating: Some(9),
        notes: None,
    };
    assert!(store.update_watched_show(&alex.id, 1396, &patch).await.unwrap());

    let watched = store.get_watched_shows(&alex.id).await.unwrap();
    assert_eq!(watched[0].status, WatchStatus::Completed);
    assert_eq!(watched[0].episodes_watched, vec![1, 2, 3]);
    assert_eq!(watched[0].rating, 9);

    // Patching a row that does not exist reports false, not an error.
    assert!(!store.update_watched_show(&alex.id, 404, &patch).await.unwrap());
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;

    let err = store
        .update_watched_show(&alex.id, 1396, &WatchedShowUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::EmptyUpdate)
    ));

    let err = store
        .update_profile(&alex.id, &ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::EmptyUpdate)
    ));
}

#[tokio::test]
async fn updating_missing_profile_fails_without_creating() {
    let store = temp_store().await;

    let patch = ProfileUpdate {
        name: Some("Nobody".to_string()),
        ..Default::default()
    };
    let err = store.update_profile("ghost", &patch).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::ProfileNotFound(id)) if id == "ghost"
    ));
    assert!(store.get_all_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn profiles_are_ordered_by_name() {
    let store = temp_store().await;
    test_profile(&store, "Zoe").await;
    test_profile(&store, "Alex").await;
    test_profile(&store, "Mika").await;

    let names: Vec<String> = store
        .get_all_profiles()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Alex", "Mika", "Zoe"]);
}

#[tokio::test]
async fn api_key_setting_is_global_and_upserted() {
    let store = temp_store().await;

    assert!(store.get_api_key().await.unwrap().is_none());
    store.set_api_key("first").await.unwrap();
    store.set_api_key("second").await.unwrap();
    assert_eq!(store.get_api_key().await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn malformed_episode_list_surfaces_as_corruption() {
    use sea_orm::{ConnectionTrait, Statement};

    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let show = test_show(1396, "Breaking Bad");

    store
        .add_watched_show(&alex.id, &show, 0, WatchStatus::Watching, &[1, 2], None)
        .await
        .unwrap();

    let backend = store.conn.get_database_backend();
    store
        .conn
        .execute(Statement::from_sql_and_values(
            backend,
            "UPDATE watched_shows SET episodes_watched = '[1, 2,' WHERE show_id = ?",
            [1396i64.into()],
        ))
        .await
        .unwrap();

    let err = store.get_watched_shows(&alex.id).await.unwrap_err();
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Corrupted { table, column, .. }) => {
            assert_eq!(*table, "watched_shows");
            assert_eq!(*column, "episodes_watched");
        }
        other => panic!("expected Corrupted, got {other:?}"),
    }
}

#[tokio::test]
async fn clear_user_data_leaves_profile_and_cache() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let movie = test_movie(603, "The Matrix");

    store
        .add_watched_movie(&alex.id, &movie, 4, None)
        .await
        .unwrap();
    store
        .add_to_watchlist_show(&alex.id, &test_show(1396, "Breaking Bad"), 0, None)
        .await
        .unwrap();

    store.clear_user_data(&alex.id).await.unwrap();

    assert!(store.get_watched_movies(&alex.id).await.unwrap().is_empty());
    assert!(store.get_watchlist(&alex.id).await.unwrap().is_empty());
    assert_eq!(store.get_all_profiles().await.unwrap().len(), 1);
    assert!(store.get_cached_movie(603).await.unwrap().is_some());
}

#[tokio::test]
async fn clear_wipes_everything() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    store.set_api_key("key").await.unwrap();
    store
        .add_watched_movie(&alex.id, &test_movie(603, "The Matrix"), 0, None)
        .await
        .unwrap();

    store.clear().await.unwrap();

    assert!(store.get_all_profiles().await.unwrap().is_empty());
    assert!(store.get_api_key().await.unwrap().is_none());
    assert!(store.get_cached_movie(603).await.unwrap().is_none());
}

#[tokio::test]
async fn watched_lists_are_newest_first() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;

    store
        .add_watched_movie(&alex.id, &test_movie(1, "First"), 0, None)
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store
        .add_watched_movie(&alex.id, &test_movie(2, "Second"), 0, None)
        .await
        .unwrap();

    let watched = store.get_watched_movies(&alex.id).await.unwrap();
    assert_eq!(watched[0].movie.title, "Second");
    assert_eq!(watched[1].movie.title, "First");
}

#[tokio::test]
async fn finish_requires_a_watchlist_entry() {
    let store = temp_store().await;
    let alex = test_profile(&store, "Alex").await;
    let movie = test_movie(603, "The Matrix");

    // Cached because it was watched once, but never put on the list.
    store
        .add_watched_movie(&alex.id, &movie, 7, None)
        .await
        .unwrap();
    store.remove_watched_movie(&alex.id, 603).await.unwrap();

    assert!(
        !store
            .finish_watchlist_item(&alex.id, MediaType::Movie, 603)
            .await
            .unwrap()
    );
    assert!(store.get_watched_movies(&alex.id).await.unwrap().is_empty());

    store
        .add_to_watchlist_movie(&alex.id, &movie, 0, None)
        .await
        .unwrap();
    assert!(
        store
            .finish_watchlist_item(&alex.id, MediaType::Movie, 603)
            .await
            .unwrap()
    );
    assert!(store.get_watchlist(&alex.id).await.unwrap().is_empty());

    let watched = store.get_watched_movies(&alex.id).await.unwrap();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0].rating, 0);
}
