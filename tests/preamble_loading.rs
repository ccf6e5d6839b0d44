//! Preamble source loading against a mock HTTP server and local files.

use chat_runtime::prompt::{PreambleSource, DEFAULT_PREAMBLE};

#[tokio::test]
async fn test_remote_yaml_system_entry_becomes_the_preamble() {
    let mut server = mockito::Server::new_async().await;
    let body = "messages:\n  - role: system\n    content: You are a focused helper.\n  - role: user\n    content: ignored\n";
    let mock = server
        .mock("GET", "/prompt.yaml")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let source = PreambleSource::Url(format!("{}/prompt.yaml", server.url()));
    assert_eq!(source.load().await, "You are a focused helper.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_plain_text_is_accepted_raw() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/prompt.txt")
        .with_status(200)
        .with_body("You are a terse helper.\n")
        .create_async()
        .await;

    let source = PreambleSource::Url(format!("{}/prompt.txt", server.url()));
    assert_eq!(source.load().await, "You are a terse helper.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_default() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/prompt.yaml")
        .with_status(500)
        .create_async()
        .await;

    let source = PreambleSource::Url(format!("{}/prompt.yaml", server.url()));
    assert_eq!(source.load().await, DEFAULT_PREAMBLE);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_local_file_source() {
    let path = std::env::temp_dir().join("chat_runtime_preamble_test.yaml");
    tokio::fs::write(
        &path,
        "messages:\n  - role: system\n    content: File-based preamble.\n",
    )
    .await
    .unwrap();

    let source = PreambleSource::File(path.clone());
    assert_eq!(source.load().await, "File-based preamble.");

    let _ = tokio::fs::remove_file(&path).await;
}
