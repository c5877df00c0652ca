use std::sync::Arc;

use uuid::Uuid;
use vt_core::domain::entities::{AccountUpdate, NewAccount, SubscriptionStatus, Video};
use vt_core::errors::{DomainError, ErrorKind};
use vt_core::repositories::{AccountRepository, ChannelRepository, SessionRegistry};

use super::InMemoryStore;

fn new_account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: format!("{}@x.com", username),
        full_name: username.to_string(),
        avatar_url: format!("https://media.test/{}.png", username),
        cover_image_url: None,
        password_hash: "hash".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find() {
    let store = InMemoryStore::new();
    let created = store.create(new_account("Alice")).await.unwrap();

    assert_eq!(created.username, "alice");
    let by_email = store
        .find_by_email_or_username(Some("alice@x.com"), None)
        .await
        .unwrap();
    let by_username = store
        .find_by_email_or_username(None, Some("alice"))
        .await
        .unwrap();
    assert_eq!(by_email.map(|a| a.id), Some(created.id));
    assert_eq!(by_username.map(|a| a.id), Some(created.id));
    assert!(store
        .find_by_email_or_username(None, None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_rejects_duplicates() {
    let store = InMemoryStore::new();
    store.create(new_account("alice")).await.unwrap();

    let err = store
        .create(NewAccount {
            email: "other@x.com".to_string(),
            ..new_account("alice")
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(store.account_count().await, 1);
}

#[tokio::test]
async fn test_update_fields() {
    let store = InMemoryStore::new();
    let alice = store.create(new_account("alice")).await.unwrap();
    store.create(new_account("bob")).await.unwrap();

    let taken = store
        .update_fields(
            alice.id,
            AccountUpdate {
                email: Some("bob@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(taken.kind(), ErrorKind::Conflict);

    let updated = store
        .update_fields(
            alice.id,
            AccountUpdate {
                full_name: Some("Alice L".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Alice L");
    assert_eq!(updated.email, "alice@x.com");

    let missing = store
        .update_fields(Uuid::new_v4(), AccountUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(missing, DomainError::not_found("User"));
}

#[tokio::test]
async fn test_session_slot() {
    let store = InMemoryStore::new();
    let alice = store.create(new_account("alice")).await.unwrap();

    assert_eq!(store.get(alice.id).await.unwrap(), None);
    store.set_refresh_token(alice.id, "t1").await.unwrap();
    assert!(!store.rotate(alice.id, "stale", "t2").await.unwrap());
    assert!(store.rotate(alice.id, "t1", "t2").await.unwrap());
    assert_eq!(store.get(alice.id).await.unwrap().as_deref(), Some("t2"));

    store.clear(alice.id).await.unwrap();
    store.clear(alice.id).await.unwrap();
    assert_eq!(store.get(alice.id).await.unwrap(), None);
    assert!(!store.rotate(alice.id, "t2", "t3").await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotate_has_one_winner() {
    let store = Arc::new(InMemoryStore::new());
    let alice = store.create(new_account("alice")).await.unwrap();
    store.set_refresh_token(alice.id, "t1").await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.rotate(alice.id, "t1", &format!("n{}", i)).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_channel_profile_counts() {
    let store = InMemoryStore::new();
    let alice = store.create(new_account("alice")).await.unwrap();
    let bob = store.create(new_account("bob")).await.unwrap();
    let carol = store.create(new_account("carol")).await.unwrap();

    store
        .set_subscription(bob.id, alice.id, SubscriptionStatus::Subscribed)
        .await
        .unwrap();
    store
        .set_subscription(carol.id, alice.id, SubscriptionStatus::Subscribed)
        .await
        .unwrap();
    store
        .set_subscription(alice.id, bob.id, SubscriptionStatus::Subscribed)
        .await
        .unwrap();
    let changed = store
        .set_subscription(carol.id, alice.id, SubscriptionStatus::Unsubscribed)
        .await
        .unwrap();
    assert_eq!(changed.status, SubscriptionStatus::Unsubscribed);

    let profile = store
        .channel_profile("alice", Some(bob.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.subscribers_count, 1);
    assert_eq!(profile.subscribed_to_count, 1);
    assert!(profile.is_subscribed);

    let as_carol = store
        .channel_profile("alice", Some(carol.id))
        .await
        .unwrap()
        .unwrap();
    assert!(!as_carol.is_subscribed);
    assert!(store.channel_profile("nobody", None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_watch_history_in_order() {
    let store = InMemoryStore::new();
    let alice = store.create(new_account("alice")).await.unwrap();
    let bob = store.create(new_account("bob")).await.unwrap();

    let first = Video {
        id: Uuid::new_v4(),
        owner_id: bob.id,
        title: "first".to_string(),
        thumbnail_url: "https://media.test/1.png".to_string(),
        duration: 12.5,
    };
    let second = Video {
        id: Uuid::new_v4(),
        title: "second".to_string(),
        ..first.clone()
    };
    store.insert_video(first.clone()).await;
    store.insert_video(second.clone()).await;
    store.record_watch(alice.id, first.id).await.unwrap();
    store.record_watch(alice.id, second.id).await.unwrap();

    let history = store.watch_history(alice.id).await.unwrap();
    let titles: Vec<_> = history.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["first", "second"]);
    assert_eq!(history[0].owner.username, "bob");

    let err = store.record_watch(alice.id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
