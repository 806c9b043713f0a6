//! Behaviour every `LinkStorage` engine must share.
//!
//! Each check expects an empty storage.

#![allow(dead_code)]

use linkshelf_core::{
    LinkId, LinkStorage, NewLink, StorageError, MAX_COMMENT_CHARS, MAX_SHORT_NAME_CHARS,
};
use std::collections::HashSet;
use std::sync::Arc;

fn new_link(short_name: &str) -> NewLink {
    NewLink::new(short_name, format!("https://example.com/{short_name}"))
}

pub async fn round_trip<S: LinkStorage>(storage: &S) {
    let stored = storage
        .insert(NewLink::new("round", "https://example.com/a?b=c").with_comment("note"))
        .await
        .unwrap();

    let by_id = storage.get_one(stored.id).await.unwrap();
    assert_eq!(by_id.id, stored.id);
    assert_eq!(by_id.short_name, "round");
    assert_eq!(by_id.original_url, "https://example.com/a?b=c");
    assert_eq!(by_id.comment, "note");

    let by_name = storage.get_one_by_short_name("round").await.unwrap();
    assert_eq!(by_name, by_id);
}

pub async fn generated_short_name<S: LinkStorage>(storage: &S) {
    let stored = storage.insert(new_link("")).await.unwrap();

    assert!(!stored.short_name.is_empty());
    assert_eq!(
        storage
            .get_one_by_short_name(&stored.short_name)
            .await
            .unwrap()
            .id,
        stored.id
    );
}

pub async fn insert_conflict<S: LinkStorage>(storage: &S) {
    let first = storage.insert(new_link("a")).await.unwrap();

    let err = storage
        .insert(NewLink::new("a", "https://other.example"))
        .await
        .unwrap_err();

    assert!(err.is_conflict(), "{err}");
    assert_eq!(err.conflicting_link(), Some(&first));
}

pub async fn unknown_records<S: LinkStorage>(storage: &S) {
    assert!(storage
        .get_one(LinkId::new(9999))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(storage
        .get_one_by_short_name("missing")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(storage
        .update(new_link("missing").into_link(LinkId::new(9999)))
        .await
        .unwrap_err()
        .is_not_found());
}

pub async fn delete_then_fetch<S: LinkStorage>(storage: &S) {
    let stored = storage.insert(new_link("gone")).await.unwrap();

    storage.delete(stored.id).await.unwrap();

    assert!(storage.get_one(stored.id).await.unwrap_err().is_not_found());
    assert!(storage
        .get_one_by_short_name("gone")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(storage.delete(stored.id).await.unwrap_err().is_not_found());

    let again = storage.insert(new_link("gone")).await.unwrap();
    assert!(again.id > stored.id);
}

pub async fn update_semantics<S: LinkStorage>(storage: &S) {
    let taken = storage.insert(new_link("taken")).await.unwrap();
    let mut link = storage.insert(new_link("mine")).await.unwrap();

    link.short_name = "taken".to_string();
    let err = storage.update(link.clone()).await.unwrap_err();
    assert_eq!(err.conflicting_link(), Some(&taken));

    link.short_name = "renamed".to_string();
    link.original_url = "https://changed.example".to_string();
    link.comment = "changed".to_string();
    storage.update(link.clone()).await.unwrap();

    assert_eq!(storage.get_one(link.id).await.unwrap(), link);
    assert_eq!(storage.get_one_by_short_name("renamed").await.unwrap(), link);
    assert!(storage
        .get_one_by_short_name("mine")
        .await
        .unwrap_err()
        .is_not_found());
}

pub async fn list_totals<S: LinkStorage>(storage: &S) {
    let mut ids = Vec::new();
    for i in 0..11 {
        ids.push(storage.insert(new_link(&format!("l-{i:02}"))).await.unwrap().id);
    }

    let first = storage.paginated_get_all(1, 10).await.unwrap();
    assert_eq!(first.total, 11);
    assert_eq!(
        first.links.iter().map(|l| l.id).collect::<Vec<_>>(),
        ids[..10]
    );

    let second = storage.paginated_get_all(2, 10).await.unwrap();
    assert_eq!(second.total, 11);
    assert_eq!(second.links.len(), 1);
    assert_eq!(second.links[0].id, ids[10]);

    let meta_only = storage.paginated_get_all(1, 0).await.unwrap();
    assert!(meta_only.links.is_empty());
    assert_eq!(meta_only.total, 11);

    storage.delete(ids[3]).await.unwrap();
    let after_delete = storage.paginated_get_all(1, 4).await.unwrap();
    assert_eq!(after_delete.total, 10);
    assert_eq!(
        after_delete.links.iter().map(|l| l.id).collect::<Vec<_>>(),
        [ids[0], ids[1], ids[2], ids[4]]
    );
}

pub async fn uniqueness_under_updates<S: LinkStorage>(storage: &S) {
    let mut links = Vec::new();
    for name in ["x", "y", "z"] {
        links.push(storage.insert(new_link(name)).await.unwrap());
    }

    // x -> y and y -> z collide with the other records, z -> w is free
    for (link, target, holder) in [(0, "y", Some(1)), (1, "z", Some(2)), (2, "w", None)] {
        let mut renamed = links[link].clone();
        renamed.short_name = target.to_string();

        match (storage.update(renamed).await, holder) {
            (Ok(()), None) => {}
            (Err(err), Some(holder)) => {
                assert_eq!(err.conflicting_link(), Some(&links[holder]), "{target}");
            }
            (result, _) => panic!("unexpected outcome renaming to {target}: {result:?}"),
        }
    }

    let page = storage.paginated_get_all(1, 100).await.unwrap();
    let names: Vec<_> = page.links.iter().map(|l| l.short_name.as_str()).collect();
    assert_eq!(names, ["x", "y", "w"]);
    assert!(storage.get_one_by_short_name("z").await.unwrap_err().is_not_found());
}

pub async fn over_length_fields<S: LinkStorage>(storage: &S) {
    let too_long = "a".repeat(MAX_SHORT_NAME_CHARS + 1);
    let err = storage
        .insert(new_link(&too_long))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)), "{err}");

    let err = storage
        .insert(new_link("note").with_comment("c".repeat(MAX_COMMENT_CHARS + 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)), "{err}");
    assert_eq!(storage.paginated_get_all(1, 0).await.unwrap().total, 0);

    let at_limit = "b".repeat(MAX_SHORT_NAME_CHARS);
    let mut stored = storage
        .insert(new_link(&at_limit).with_comment("c".repeat(MAX_COMMENT_CHARS)))
        .await
        .unwrap();
    assert_eq!(
        storage.get_one_by_short_name(&at_limit).await.unwrap(),
        stored
    );

    stored.comment = "c".repeat(MAX_COMMENT_CHARS + 1);
    let err = storage.update(stored.clone()).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)), "{err}");
    assert_eq!(
        storage.get_one(stored.id).await.unwrap().comment,
        "c".repeat(MAX_COMMENT_CHARS)
    );
}

/// Trailing spaces are significant in short names.
pub async fn trailing_space_names<S: LinkStorage>(storage: &S) {
    let plain = storage.insert(new_link("pad")).await.unwrap();
    let padded = storage.insert(new_link("pad ")).await.unwrap();

    assert_ne!(plain.id, padded.id);
    assert_eq!(storage.get_one_by_short_name("pad").await.unwrap(), plain);
    assert_eq!(storage.get_one_by_short_name("pad ").await.unwrap(), padded);
}

pub async fn concurrent_distinct_inserts<S: LinkStorage>(storage: Arc<S>, n: usize) {
    let handles: Vec<_> = (0..n)
        .map(|i| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move { storage.insert(new_link(&format!("c-{i}"))).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }

    assert_eq!(ids.len(), n);
    assert_eq!(storage.paginated_get_all(1, 0).await.unwrap().total, n);
}

pub async fn concurrent_same_name_inserts<S: LinkStorage>(storage: Arc<S>, n: usize) {
    let handles: Vec<_> = (0..n)
        .map(|_| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move { storage.insert(new_link("contended")).await })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) if err.is_conflict() => conflicts += 1,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, n - 1);
    assert_eq!(storage.paginated_get_all(1, 0).await.unwrap().total, 1);
}
