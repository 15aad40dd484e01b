//! Integration tests for `SqliteStore` against an in-memory database.

use critics_core::{
  model::{Critic, Movie, Review, Sentiment},
  store::CriticStore,
};

use crate::SqliteStore;

const TWILIGHT: &str = "https://www.rottentomatoes.com/m/twilight";
const EBERT: &str = "https://www.rottentomatoes.com/critic/roger-ebert";
const KERMODE: &str = "https://www.rottentomatoes.com/critic/mark-kermode";

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn twilight() -> Movie {
  Movie {
    url:             TWILIGHT.into(),
    name:            "Twilight (2008)".into(),
    critic_score:    Some(49),
    audience_score:  Some(72),
    genres:          vec![
      "Fantasy".into(),
      "Romance".into(),
      "Drama".into(),
      "Adventure".into(),
    ],
    noobless_score:  None,
    hierarchy_score: None,
  }
}

fn critic(url: &str, name: &str) -> Critic {
  Critic { url: url.into(), name: name.into() }
}

fn review(critic_url: &str, sentiment: Sentiment) -> Review {
  Review {
    movie_url:  TWILIGHT.into(),
    critic_url: critic_url.into(),
    sentiment,
    excerpt:    None,
  }
}

// ─── Movies ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_movie_missing_returns_none() {
  let s = store().await;
  assert!(s.get_movie(TWILIGHT).await.unwrap().is_none());
}

#[tokio::test]
async fn put_and_get_movie() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();

  let fetched = s.get_movie(TWILIGHT).await.unwrap().unwrap();
  assert_eq!(fetched, twilight());
}

#[tokio::test]
async fn second_put_replaces_every_field() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();

  let mut updated = twilight();
  updated.name = "Twilight".into();
  updated.critic_score = Some(50);
  updated.audience_score = None;
  updated.genres = vec!["Romance".into()];
  s.put_movie(&updated).await.unwrap();

  let fetched = s.get_movie(TWILIGHT).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn same_movie_twice_is_idempotent() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_movie(&twilight()).await.unwrap();

  assert_eq!(s.get_movie(TWILIGHT).await.unwrap(), Some(twilight()));
}

#[tokio::test]
async fn movie_keyed_by_url_not_name() {
  let s = store().await;
  let mut remake = twilight();
  remake.url = "https://www.rottentomatoes.com/m/twilight_2030".into();

  s.put_movie(&twilight()).await.unwrap();
  s.put_movie(&remake).await.unwrap();

  assert!(s.get_movie(TWILIGHT).await.unwrap().is_some());
  assert!(s.get_movie(&remake.url).await.unwrap().is_some());
}

#[tokio::test]
async fn updating_movie_keeps_its_reviews() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();
  s.put_review(&review(EBERT, Sentiment::Positive)).await.unwrap();

  let mut updated = twilight();
  updated.critic_score = Some(51);
  s.put_movie(&updated).await.unwrap();

  assert_eq!(s.list_reviews(TWILIGHT).await.unwrap().len(), 1);
}

// ─── Critics ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn critic_upsert_overwrites_name() {
  let s = store().await;
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();
  s.put_critic(&critic(EBERT, "R. Ebert")).await.unwrap();

  let fetched = s.get_critic(EBERT).await.unwrap().unwrap();
  assert_eq!(fetched.name, "R. Ebert");
}

#[tokio::test]
async fn get_critic_missing_returns_none() {
  let s = store().await;
  assert!(s.get_critic(EBERT).await.unwrap().is_none());
}

// ─── Reviews ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn review_requires_existing_critic() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();

  let err = s
    .put_review(&review(EBERT, Sentiment::Positive))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}

#[tokio::test]
async fn review_requires_existing_movie() {
  let s = store().await;
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();

  assert!(s.put_review(&review(EBERT, Sentiment::Positive)).await.is_err());
}

#[tokio::test]
async fn critic_then_review_is_listed() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();

  let mut r = review(EBERT, Sentiment::Positive);
  r.excerpt = Some("Swoony.".into());
  s.put_review(&r).await.unwrap();

  let listed = s.list_reviews(TWILIGHT).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].critic_name, "Roger Ebert");
  assert_eq!(listed[0].critic_url, EBERT);
  assert!(listed[0].approved);
  assert_eq!(listed[0].excerpt.as_deref(), Some("Swoony."));
}

#[tokio::test]
async fn duplicate_review_last_write_wins() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();

  s.put_review(&review(EBERT, Sentiment::Positive)).await.unwrap();
  s.put_review(&review(EBERT, Sentiment::Negative)).await.unwrap();

  let listed = s.list_reviews(TWILIGHT).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert!(!listed[0].approved);
}

#[tokio::test]
async fn unknown_sentiment_lists_as_not_approved() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();
  s.put_review(&review(EBERT, Sentiment::Unknown)).await.unwrap();

  let listed = s.list_reviews(TWILIGHT).await.unwrap();
  assert!(!listed[0].approved);
}

#[tokio::test]
async fn list_reviews_in_insertion_order() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_critic(&critic(KERMODE, "Mark Kermode")).await.unwrap();
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();

  s.put_review(&review(KERMODE, Sentiment::Negative)).await.unwrap();
  s.put_review(&review(EBERT, Sentiment::Positive)).await.unwrap();

  let names: Vec<_> = s
    .list_reviews(TWILIGHT)
    .await
    .unwrap()
    .into_iter()
    .map(|l| l.critic_name)
    .collect();
  assert_eq!(names, ["Mark Kermode", "Roger Ebert"]);
}

#[tokio::test]
async fn list_reviews_of_other_movie_is_empty() {
  let s = store().await;
  s.put_movie(&twilight()).await.unwrap();
  s.put_critic(&critic(EBERT, "Roger Ebert")).await.unwrap();
  s.put_review(&review(EBERT, Sentiment::Positive)).await.unwrap();

  let other = s
    .list_reviews("https://www.rottentomatoes.com/m/new_moon")
    .await
    .unwrap();
  assert!(other.is_empty());
}

// ─── On-disk store ───────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_file_keeps_data_and_schema_version() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("elite_critics.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.put_movie(&twilight()).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.get_movie(TWILIGHT).await.unwrap(), Some(twilight()));

  let version: i64 = s
    .conn
    .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?))
    .await
    .unwrap();
  assert_eq!(version as usize, crate::schema::MIGRATIONS.len());
}
