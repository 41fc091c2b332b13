use study_stream::StudyError;
use study_stream::db::{
    self, LikeStorage, MediaKind, NewVideo, ProgressStorage, SqlitePool, UserStorage, VideoStorage,
};
use study_stream::service::seed;

async fn memory_pool() -> SqlitePool {
    db::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database")
}

fn legacy_video() -> NewVideo {
    NewVideo {
        title: "Legacy".into(),
        description: None,
        thumbnail: None,
        url: "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4".into(),
        kind: MediaKind::Mp4,
        duration: Some("14:48".into()),
        views: 1,
    }
}

#[tokio::test]
async fn seeding_only_fills_an_empty_catalog() {
    let pool = memory_pool().await;
    let videos = VideoStorage::new(pool);

    assert_eq!(seed::seed_catalog(&videos).await.unwrap(), 5);
    assert_eq!(seed::seed_catalog(&videos).await.unwrap(), 0);
    assert_eq!(videos.count().await.unwrap(), 5);
}

#[tokio::test]
async fn insecure_bucket_urls_are_upgraded() {
    let pool = memory_pool().await;
    let videos = VideoStorage::new(pool);
    let ids = videos.insert_many(vec![legacy_video()]).await.unwrap();

    assert_eq!(seed::upgrade_insecure_urls(&videos).await.unwrap(), 1);
    let video = videos.get(ids[0]).await.unwrap().unwrap();
    assert_eq!(
        video.url,
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4"
    );
    assert_eq!(seed::upgrade_insecure_urls(&videos).await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let users = UserStorage::new(memory_pool().await);
    users.insert("Ada", "ada@example.com", "hash").await.unwrap();
    let err = users
        .insert("Ada again", "ada@example.com", "hash")
        .await
        .unwrap_err();
    assert!(matches!(err, StudyError::Conflict(_)));
    // exact match only
    assert!(users.find_by_email("ADA@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn unlike_never_drives_counter_negative() {
    let pool = memory_pool().await;
    let users = UserStorage::new(pool.clone());
    let videos = VideoStorage::new(pool.clone());
    let likes = LikeStorage::new(pool.clone());

    let user = users.insert("Ada", "ada@example.com", "hash").await.unwrap();
    let video = videos.insert_many(vec![legacy_video()]).await.unwrap()[0];

    assert!(likes.toggle(user, video).await.unwrap());
    assert_eq!(likes.count_for_video(video).await.unwrap(), 1);

    // simulate a counter that already drifted
    sqlx::query("UPDATE videos SET likes = 0 WHERE id = ?")
        .bind(video)
        .execute(&pool)
        .await
        .unwrap();

    assert!(!likes.toggle(user, video).await.unwrap());
    assert_eq!(videos.get(video).await.unwrap().unwrap().likes, 0);
    assert_eq!(likes.count_for_video(video).await.unwrap(), 0);
}

#[tokio::test]
async fn like_on_missing_video_fails_without_side_effects() {
    let pool = memory_pool().await;
    let users = UserStorage::new(pool.clone());
    let likes = LikeStorage::new(pool);

    let user = users.insert("Ada", "ada@example.com", "hash").await.unwrap();
    assert!(matches!(
        likes.toggle(user, 404).await,
        Err(StudyError::DatabaseError(_))
    ));
    assert!(!likes.exists(user, 404).await.unwrap());
}

#[tokio::test]
async fn progress_upsert_keeps_one_row_per_pair() {
    let pool = memory_pool().await;
    let users = UserStorage::new(pool.clone());
    let videos = VideoStorage::new(pool.clone());
    let progress = ProgressStorage::new(pool.clone());

    let user = users.insert("Ada", "ada@example.com", "hash").await.unwrap();
    let video = videos.insert_many(vec![legacy_video()]).await.unwrap()[0];

    assert_eq!(progress.get(user, video).await.unwrap(), None);
    progress.upsert(user, video, 10).await.unwrap();
    progress.upsert(user, video, 5).await.unwrap();
    assert_eq!(progress.get(user, video).await.unwrap(), Some(5));

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM video_progress")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_toggles_all_succeed_and_stay_consistent() {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "study-likes-concurrency-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let database_url = format!("sqlite:{}", temp_path.display());
    let pool = db::connect(&database_url, 5)
        .await
        .expect("failed to open file database");

    let users = UserStorage::new(pool.clone());
    let videos = VideoStorage::new(pool.clone());
    let likes = LikeStorage::new(pool.clone());

    let video_ids = videos
        .insert_many((0..5).map(|_| legacy_video()).collect())
        .await
        .unwrap();
    let mut user_ids = Vec::new();
    for i in 0..20 {
        let email = format!("user{i}@example.com");
        user_ids.push(users.insert("User", &email, "hash").await.unwrap());
    }

    let handles: Vec<_> = user_ids
        .iter()
        .enumerate()
        .map(|(i, &user)| {
            let likes = likes.clone();
            let video = video_ids[i % video_ids.len()];
            tokio::spawn(async move { likes.toggle(user, video).await })
        })
        .collect();

    for handle in handles {
        let liked = handle.await.expect("toggle task panicked");
        assert!(matches!(liked, Ok(true)), "toggle failed: {liked:?}");
    }

    let mut counter_sum = 0;
    for &video in &video_ids {
        let stored = videos.get(video).await.unwrap().unwrap().likes;
        assert_eq!(stored, likes.count_for_video(video).await.unwrap());
        counter_sum += stored;
    }
    assert_eq!(counter_sum, 20);

    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", temp_path.display()));
    }
}
