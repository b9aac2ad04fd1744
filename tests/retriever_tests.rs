//! End-to-end tests for the retrieval pipeline: record in, artifacts on disk
//! out, with the mandatory double metadata fetch pinned by mock expectations.

use std::fs;

use dreamcatcher::retriever::{META_FILE, PAYLOAD_FILE};
use dreamcatcher::{DreamRecord, Error};

use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn record(id: u64, meta_token: &str, content_tokens: &[&str]) -> DreamRecord {
    DreamRecord {
        id,
        meta_token: meta_token.to_string(),
        content_tokens: content_tokens.iter().map(|t| t.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_retrieve_writes_payload_and_metadata() {
    let server = MockServer::start().await;
    let temp_dir = create_temp_dir();

    mount_download(&server, "tokA", b"hello".to_vec(), 1).await;
    // The metadata token must be fetched exactly twice: once for the island
    // name, once after the body. The expectation is verified on drop.
    mount_download(&server, "tokB", meta_bytes("Kapu"), 2).await;

    let retriever = unpaced_retriever(&server.uri(), temp_dir.path());
    let summary = retriever
        .retrieve(&record(5, "tokB", &["tokA"]))
        .await
        .unwrap();

    let expected_dir = temp_dir
        .path()
        .join("DA-0000-0000-0005")
        .join("2023.01.02@03-04");
    assert!(summary.is_saved());
    assert_eq!(summary.subject(), "DA-0000-0000-0005");
    assert_eq!(summary.location(), Some(&expected_dir));
    assert_eq!(summary.payload_size(), 5);

    assert_eq!(fs::read(expected_dir.join(PAYLOAD_FILE)).unwrap(), b"hello");

    let meta_text = fs::read_to_string(expected_dir.join(META_FILE)).unwrap();
    let meta: serde_json::Value = serde_json::from_str(&meta_text).unwrap();
    assert_eq!(meta["mMtVNm"], "Kapu");
    assert_eq!(meta["mMtCurUploadTime"]["mYear"], 2023);
}

#[tokio::test]
async fn test_empty_contents_aborts_without_writes() {
    let temp_dir = create_temp_dir();

    // Nothing listens at this address; the record must be rejected before
    // any request or write happens.
    let retriever = unpaced_retriever("http://127.0.0.1:1", temp_dir.path());
    let result = retriever.retrieve(&record(7, "tokB", &[])).await;

    assert!(matches!(result, Err(Error::EmptyContents)));
    assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_unreadable_prefetch_is_tolerated() {
    let server = MockServer::start().await;
    let temp_dir = create_temp_dir();

    // The first metadata fetch returns garbage; only the refetch decodes.
    Mock::given(method("POST"))
        .and(path("/dream_download"))
        .and(body_string("tokB"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xc1]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_download(&server, "tokB", meta_bytes("Kapu"), 1).await;
    mount_download(&server, "tokA", b"payload".to_vec(), 1).await;

    let retriever = unpaced_retriever(&server.uri(), temp_dir.path());
    let summary = retriever
        .retrieve(&record(5, "tokB", &["tokA"]))
        .await
        .unwrap();

    assert!(summary.is_saved());
}

#[tokio::test]
async fn test_unreadable_refetched_metadata_is_fatal() {
    let server = MockServer::start().await;
    let temp_dir = create_temp_dir();

    mount_download(&server, "tokB", vec![0xc1], 2).await;
    mount_download(&server, "tokA", b"payload".to_vec(), 1).await;

    let retriever = unpaced_retriever(&server.uri(), temp_dir.path());
    let result = retriever.retrieve(&record(5, "tokB", &["tokA"])).await;

    assert!(matches!(result, Err(Error::Decode(_))));
    assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_first_content_entry_wins() {
    let server = MockServer::start().await;
    let temp_dir = create_temp_dir();

    mount_download(&server, "tokFirst", b"first".to_vec(), 1).await;
    mount_download(&server, "tokB", meta_bytes("Kapu"), 2).await;

    let retriever = unpaced_retriever(&server.uri(), temp_dir.path());
    let summary = retriever
        .retrieve(&record(9, "tokB", &["tokFirst", "tokSecond"]))
        .await
        .unwrap();

    assert!(summary.is_saved());
    let payload = fs::read(summary.location().unwrap().join(PAYLOAD_FILE)).unwrap();
    assert_eq!(payload, b"first");
}

#[tokio::test]
async fn test_missing_upload_time_defaults_to_zeros() {
    let server = MockServer::start().await;
    let temp_dir = create_temp_dir();

    let meta = encode_value(&rmpv::Value::Map(vec![(
        rmpv::Value::from("mMtVNm"),
        rmpv::Value::from("NoClock"),
    )]));
    mount_download(&server, "tokA", b"x".to_vec(), 1).await;
    mount_download(&server, "tokB", meta, 2).await;

    let retriever = unpaced_retriever(&server.uri(), temp_dir.path());
    let summary = retriever
        .retrieve(&record(1, "tokB", &["tokA"]))
        .await
        .unwrap();

    let expected_dir = temp_dir
        .path()
        .join("DA-0000-0000-0001")
        .join("0000.00.00@00-00");
    assert_eq!(summary.location(), Some(&expected_dir));
    assert!(expected_dir.join(PAYLOAD_FILE).exists());
}
