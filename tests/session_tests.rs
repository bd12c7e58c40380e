//! Session-level tests: profile lifecycle, active-profile pointer, and the
//! end-to-end watchlist-to-watched flow.

use std::path::PathBuf;

use screenlog::models::media::{MediaType, Movie};
use screenlog::{Session, Store};

struct TestEnv {
    db_url: String,
    data_dir: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let data_dir =
            std::env::temp_dir().join(format!("screenlog-session-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&data_dir).expect("create test dir");
        let db_url = format!("sqlite:{}", data_dir.join("screenlog.db").display());
        Self { db_url, data_dir }
    }

    async fn session(&self) -> Session {
        let store = Store::new(&self.db_url).await.expect("open store");
        Session::open(store, &self.data_dir)
            .await
            .expect("open session")
    }
}

fn matrix() -> Movie {
    Movie {
        id: 603,
        title: "The Matrix".to_string(),
        overview: None,
        poster_path: None,
        backdrop_path: None,
        release_date: Some("1999-03-31".to_string()),
        vote_average: Some(8.2),
        genre_ids: vec![28, 878],
        genres: None,
    }
}

#[tokio::test]
async fn fresh_store_needs_profile_creation() {
    let env = TestEnv::new();
    let session = env.session().await;

    assert!(session.needs_profile_creation());
    assert!(session.active().is_none());
    assert!(session.require_active().is_err());
}

#[tokio::test]
async fn first_profile_becomes_active() {
    let env = TestEnv::new();
    let mut session = env.session().await;

    let alex = session.create_profile("Alex").await.unwrap();
    assert!(!session.needs_profile_creation());
    assert_eq!(session.active().unwrap().id, alex.id);

    // A second profile does not steal the active slot.
    session.create_profile("Brook").await.unwrap();
    assert_eq!(session.active().unwrap().id, alex.id);
}

#[tokio::test]
async fn active_profile_survives_reopen() {
    let env = TestEnv::new();

    let brook_id = {
        let mut session = env.session().await;
        session.create_profile("Alex").await.unwrap();
        let brook = session.create_profile("Brook").await.unwrap();
        session.switch_profile(&brook.id).unwrap();
        brook.id
    };

    let session = env.session().await;
    assert_eq!(session.active().unwrap().id, brook_id);
}

#[tokio::test]
async fn stale_pointer_falls_back_alphabetically() {
    let env = TestEnv::new();

    let mut session = env.session().await;
    session.create_profile("Brook").await.unwrap();
    let zoe = session.create_profile("Zoe").await.unwrap();
    let alex = session.create_profile("Alex").await.unwrap();
    session.switch_profile(&zoe.id).unwrap();

    // Deleting the active profile re-selects the first remaining by name.
    assert!(session.delete_profile(&zoe.id).await.unwrap());
    assert_eq!(session.active().unwrap().id, alex.id);
}

#[tokio::test]
async fn switch_by_login_works() {
    let env = TestEnv::new();
    let mut session = env.session().await;

    session.create_profile("Alex").await.unwrap();
    session.create_profile("Jean-Luc Picard").await.unwrap();

    session.switch_profile("jean-luc-picard").unwrap();
    assert_eq!(session.active().unwrap().name, "Jean-Luc Picard");

    assert!(session.switch_profile("nobody").is_err());
}

#[tokio::test]
async fn deleting_last_profile_flips_to_needs_creation() {
    let env = TestEnv::new();
    let mut session = env.session().await;

    let alex = session.create_profile("Alex").await.unwrap();
    assert!(session.delete_profile(&alex.id).await.unwrap());

    assert!(session.needs_profile_creation());
    assert!(session.active().is_none());

    // The pointer file is gone too, so a reopen agrees.
    let session = env.session().await;
    assert!(session.needs_profile_creation());
}

#[tokio::test]
async fn watchlist_to_watched_flow() {
    let env = TestEnv::new();
    let mut session = env.session().await;

    let alex = session.create_profile("Alex").await.unwrap();
    let store = session.store();

    store
        .add_to_watchlist_movie(&alex.id, &matrix(), 0, None)
        .await
        .unwrap();

    let items = store.get_watchlist(&alex.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_type, MediaType::Movie);
    assert_eq!(items[0].item_id, 603);

    // Mark watched: the watch row is written before the list entry goes.
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

    assert!(store.update_movie_rating(&alex.id, 603, 5).await.unwrap());
    let watched = store.get_watched_movies(&alex.id).await.unwrap();
    assert_eq!(watched[0].rating, 5);

    // Delete the only profile: back to square one.
    let alex_id = alex.id.clone();
    assert!(session.delete_profile(&alex_id).await.unwrap());
    assert!(session.needs_profile_creation());
    assert!(
        session
            .store()
            .get_all_profiles()
            .await
            .unwrap()
            .is_empty()
    );
}
