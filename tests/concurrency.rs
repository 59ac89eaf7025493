//! Concurrency tests: parallel clients against one shared store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use batch_store::config::MAX_VALUES;
use batch_store::{Server, StoreClient};
use std::collections::HashSet;
use std::net::SocketAddr;
use tokio::task::JoinSet;

async fn spawn_server() -> SocketAddr {
    let server = Server::bind("127.0.0.1:0").await.expect("bind");
    let addr = server.local_addr().expect("local addr");
    tokio::spawn(server.serve());
    addr
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial_test::serial]
async fn parallel_appends_fill_capacity_without_lost_updates() {
    let addr = spawn_server().await;

    // Eight clients, eight values each: exactly MAX_VALUES in total.
    // Whatever the interleaving, every batch must land contiguously and
    // the store must end exactly full.
    let clients = 8u64;
    let batch_len = (MAX_VALUES as u64) / clients;

    let mut tasks = JoinSet::new();
    for client_id in 0..clients {
        tasks.spawn(async move {
            let mut client = StoreClient::connect(addr).await.unwrap();
            let batch: Vec<u64> = (0..batch_len).map(|j| client_id * 100 + j).collect();
            client.append(&batch).await.unwrap()
        });
    }
    while let Some(result) = tasks.join_next().await {
        let reported_len = result.unwrap();
        assert!(u64::from(reported_len) >= batch_len);
        assert!(reported_len as usize <= MAX_VALUES);
    }

    let mut client = StoreClient::connect(addr).await.unwrap();
    assert_eq!(client.truncate(0).await.unwrap(), MAX_VALUES as u32);

    // The strict bound caps the read one short of the full store.
    let values = client.read(0, MAX_VALUES as u32 - 1).await.unwrap();
    assert_eq!(values.len(), MAX_VALUES - 1);

    // Batches are 8-aligned, so every chunk belongs to exactly one client
    // and runs in submission order; the final chunk is just one short.
    let mut seen_clients = HashSet::new();
    for chunk in values.chunks(batch_len as usize) {
        let base = chunk[0];
        assert_eq!(base % 100, 0, "chunk starts mid-batch: {chunk:?}");
        assert!(base / 100 < clients);
        for (idx, value) in chunk.iter().enumerate() {
            assert_eq!(*value, base + idx as u64, "torn batch: {chunk:?}");
        }
        assert!(seen_clients.insert(base / 100), "batch stored twice");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial_test::serial]
async fn oversubscribed_parallel_appends_never_overflow() {
    let addr = spawn_server().await;

    // Four clients racing to append 20 values each: only three batches fit
    // in 64 slots, so exactly one append must be turned away with the
    // store untouched by it.
    let mut tasks = JoinSet::new();
    for client_id in 0..4u64 {
        tasks.spawn(async move {
            let mut client = StoreClient::connect(addr).await.unwrap();
            let batch: Vec<u64> = (0..20).map(|j| client_id * 1000 + j).collect();
            client.append(&batch).await.unwrap()
        });
    }
    while let Some(result) = tasks.join_next().await {
        assert!(result.unwrap() <= MAX_VALUES as u32);
    }

    let mut client = StoreClient::connect(addr).await.unwrap();
    assert_eq!(client.truncate(0).await.unwrap(), 60);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial_test::serial]
async fn mixed_traffic_keeps_every_response_parseable() {
    let addr = spawn_server().await;

    let mut tasks = JoinSet::new();
    for worker in 0..8u64 {
        tasks.spawn(async move {
            let mut client = StoreClient::connect(addr).await.unwrap();
            for round in 0..25u64 {
                let batch = [worker, round];
                let len = client.append(&batch).await.unwrap();
                assert!(len as usize <= MAX_VALUES);

                // Reads may or may not find data under contention; they
                // must still always parse.
                let _ = client.read(0, 1).await.unwrap();

                let len = client.truncate(2).await.unwrap();
                assert!(len as usize <= MAX_VALUES);
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    // Appends add pairs and truncates remove at most a pair, so the final
    // length is even and bounded.
    let mut client = StoreClient::connect(addr).await.unwrap();
    let len = client.truncate(0).await.unwrap();
    assert!(len as usize <= MAX_VALUES);
    assert_eq!(len % 2, 0);
}
