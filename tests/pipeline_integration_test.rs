mod common;

use common::LogBuffer;
use fizzbuzz_pipeline::adapters::{MemorySink, TracingSink};
use fizzbuzz_pipeline::utils::logger::{build_dispatch, LogFormat};
use fizzbuzz_pipeline::{
    build_classifier, AdapterKind, FizzBuzzRunner, MathClassifier, RemoteSettings,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const FIFTEEN: [&str; 15] = [
    "1", "2", "Fizz", "4", "Buzz", "Fizz", "7", "8", "Fizz", "Buzz", "11", "Fizz", "13", "14",
    "FizzBuzz",
];

#[tokio::test]
async fn test_math_adapter_logs_fifteen_json_lines() {
    let buffer = LogBuffer::default();
    let dispatch = build_dispatch(LogFormat::Json, EnvFilter::new("info"), buffer.clone());
    let sink = Arc::new(TracingSink::with_dispatch(dispatch));

    let runner = FizzBuzzRunner::new(15, Arc::new(MathClassifier), sink);
    let summary = runner.run(CancellationToken::new()).await.unwrap();

    let lines = buffer.json_lines();
    assert_eq!(lines.len(), 15);
    for (i, (line, expected)) in lines.iter().zip(FIFTEEN).enumerate() {
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["message"], expected);
        assert_eq!(line["number"], (i + 1) as u64);
    }
    assert_eq!(summary.emitted, 15);
}

#[tokio::test]
async fn test_http_adapter_matches_math_adapter() {
    let cancel = CancellationToken::new();
    let (classifier, service) =
        build_classifier(AdapterKind::Http, &RemoteSettings::default(), &cancel)
            .await
            .unwrap();

    let sink = Arc::new(MemorySink::new());
    let runner = FizzBuzzRunner::new(15, Arc::new(classifier), Arc::clone(&sink));
    let summary = runner.run(cancel.clone()).await.unwrap();

    assert_eq!(sink.lines(), FIFTEEN.to_vec());
    assert_eq!(summary.masked_failures, 0);
    assert!(!summary.cancelled);

    service.unwrap().shutdown().await.unwrap();
}

#[tokio::test]
async fn test_larger_limit_keeps_order() {
    let sink = Arc::new(MemorySink::new());
    let runner = FizzBuzzRunner::new(1_000, Arc::new(MathClassifier), Arc::clone(&sink));
    let summary = runner.run(CancellationToken::new()).await.unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1_000);
    assert_eq!(lines[997], "998");
    assert_eq!(lines[998], "Fizz");
    assert_eq!(lines[999], "Buzz");
    assert_eq!(lines[89], "FizzBuzz");
    assert_eq!(summary.fizz_buzz, 66);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_limit_one_on_multi_thread_runtime() {
    let sink = Arc::new(MemorySink::new());
    let runner = FizzBuzzRunner::new(1, Arc::new(MathClassifier), Arc::clone(&sink));

    let summary = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        runner.run(CancellationToken::new()),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(sink.lines(), vec!["1"]);
    assert_eq!(summary.emitted, 1);
}

#[tokio::test]
async fn test_zero_limit_emits_nothing() {
    let buffer = LogBuffer::default();
    let dispatch = build_dispatch(LogFormat::Json, EnvFilter::new("info"), buffer.clone());
    let runner = FizzBuzzRunner::new(
        0,
        Arc::new(MathClassifier),
        Arc::new(TracingSink::with_dispatch(dispatch)),
    );

    let summary = runner.run(CancellationToken::new()).await.unwrap();

    assert!(buffer.json_lines().is_empty());
    assert_eq!(summary.emitted, 0);
}
