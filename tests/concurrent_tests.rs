//! Concurrent request tests
//!
//! Requests are independent: nothing is deduplicated or serialized on the
//! client side, and the server store must not lose writes.

mod common;

use common::{signed_up, start_server};
use futures_util::future::join_all;
use qrdash::qr::QrRequest;
use std::time::Instant;

#[tokio::test]
async fn test_concurrent_saves_are_all_listed() {
    let server = start_server().await;
    let client = server.client();
    let session = signed_up(&server, "alice").await;

    let start = Instant::now();
    let requests: Vec<QrRequest> = (0..20)
        .map(|i| QrRequest::new(format!("https://example.com/{}", i)))
        .collect();
    let results = join_all(requests.iter().map(|req| client.save_qr(&session, req))).await;

    let saved = results.iter().filter(|r| r.is_ok()).count();
    println!("✓ {} concurrent saves in {:?}", saved, start.elapsed());
    assert_eq!(saved, 20);

    let records = client.list_qr(&session).await.unwrap();
    assert_eq!(records.len(), 20);

    let mut ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20, "ids must be unique");
}

#[tokio::test]
async fn test_concurrent_probes() {
    let server = start_server().await;
    let client = server.client();
    let session = signed_up(&server, "alice").await;

    let hellos = join_all((0..10).map(|_| client.hello(&session))).await;
    let echoes = join_all((0..10).map(|i| client.echo(&session, "n", i))).await;

    assert!(hellos.iter().all(|r| r.is_ok()));
    for (i, echo) in echoes.into_iter().enumerate() {
        assert_eq!(echo.unwrap().number, i as i64);
    }
}

#[tokio::test]
async fn test_concurrent_signups_same_name() {
    let server = start_server().await;
    let client = server.client();

    let attempts = join_all((0..5).map(|_| {
        let client = client.clone();
        async move {
            let mut session = qrdash::SessionStore::in_memory();
            client
                .signup(&mut session, "alice", "a@example.com", "password1")
                .await
                .is_ok()
        }
    }))
    .await;

    assert_eq!(attempts.iter().filter(|ok| **ok).count(), 1);
}

#[tokio::test]
async fn test_concurrent_deletes_of_one_record() {
    let server = start_server().await;
    let client = server.client();
    let session = signed_up(&server, "alice").await;
    client
        .save_qr(&session, &QrRequest::new("https://example.com"))
        .await
        .unwrap();
    let id = client.list_qr(&session).await.unwrap()[0].id;

    let results = join_all((0..5).map(|_| client.delete_qr(&session, id))).await;
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(client.list_qr(&session).await.unwrap().is_empty());
}
