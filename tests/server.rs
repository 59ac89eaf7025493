//! End-to-end protocol tests against a live server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use batch_store::{Server, StoreClient};
use std::net::SocketAddr;

async fn spawn_server() -> SocketAddr {
    let server = Server::bind("127.0.0.1:0").await.expect("bind");
    let addr = server.local_addr().expect("local addr");
    tokio::spawn(server.serve());
    addr
}

#[tokio::test]
async fn append_read_truncate_scenario() {
    let addr = spawn_server().await;
    let mut client = StoreClient::connect(addr).await.unwrap();

    assert_eq!(client.append(&[1, 2, 3]).await.unwrap(), 3);

    // The strict read bound excludes a slice ending exactly on the current
    // length, so two values is the widest readable slice here.
    assert_eq!(client.read_raw(0, 2).await.unwrap(), "1,2,");

    assert_eq!(client.truncate(2).await.unwrap(), 1);

    // The lone survivor sits on the boundary and is out of reach.
    assert_eq!(client.read_raw(0, 1).await.unwrap(), "");
}

#[tokio::test]
async fn appended_batch_reads_back_in_order() {
    let addr = spawn_server().await;
    let mut client = StoreClient::connect(addr).await.unwrap();

    let batch: Vec<u64> = {
        use rand::Rng;
        let mut rng = rand::rng();
        (0..20).map(|_| rng.random()).collect()
    };

    assert_eq!(client.append(&batch).await.unwrap(), 20);
    // Padding value so the batch itself clears the strict bound.
    assert_eq!(client.append(&[7]).await.unwrap(), 21);

    assert_eq!(client.read(0, 20).await.unwrap(), batch);

    // Truncating the batch and the padding restores the empty store.
    assert_eq!(client.truncate(21).await.unwrap(), 0);
}

#[tokio::test]
async fn one_connection_serves_many_requests() {
    let addr = spawn_server().await;
    let mut client = StoreClient::connect(addr).await.unwrap();

    for round in 1..=10u32 {
        assert_eq!(client.append(&[u64::from(round)]).await.unwrap(), round);
    }
    assert_eq!(
        client.read(0, 9).await.unwrap(),
        (1..=9u64).collect::<Vec<_>>()
    );
    assert_eq!(client.truncate(10).await.unwrap(), 0);
}

#[tokio::test]
async fn all_connections_share_one_store() {
    let addr = spawn_server().await;

    let mut writer = StoreClient::connect(addr).await.unwrap();
    assert_eq!(writer.append(&[11, 22, 33]).await.unwrap(), 3);

    let mut reader = StoreClient::connect(addr).await.unwrap();
    assert_eq!(reader.read(0, 2).await.unwrap(), vec![11, 22]);

    let mut truncater = StoreClient::connect(addr).await.unwrap();
    assert_eq!(truncater.truncate(3).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_op_gets_empty_response_and_keeps_connection() {
    let addr = spawn_server().await;
    let mut client = StoreClient::connect(addr).await.unwrap();

    assert_eq!(client.send_op(0xAB).await.unwrap(), "");

    // The connection survives an unknown tag.
    assert_eq!(client.append(&[5]).await.unwrap(), 1);
}

#[tokio::test]
async fn zero_count_read_inside_bounds_is_empty_text() {
    let addr = spawn_server().await;
    let mut client = StoreClient::connect(addr).await.unwrap();

    client.append(&[1, 2]).await.unwrap();
    // In bounds (0 + 0 < 2) but zero values requested.
    assert_eq!(client.read_raw(0, 0).await.unwrap(), "");
}
