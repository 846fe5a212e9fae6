//! Concurrent load against the request trace middleware.

use std::collections::HashSet;
use std::time::Instant;

use xrequest_trace::Config;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generation_is_unique() {
    let addr = common::start_traced_backend(Config::generating()).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = reqwest::Client::new();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for _ in 0..concurrency {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for _ in 0..requests_per_task {
                let seen = common::fetch(&client, addr, &[]).await;
                ids.push((seen.x_request_id, seen.traceparent));
            }
            ids
        }));
    }

    let mut unique = HashSet::new();
    for task in tasks {
        for (id, traceparent) in task.await.unwrap() {
            let id = id.expect("every request gets an id");
            let traceparent = traceparent.expect("every request gets a traceparent");

            assert_eq!(id.len(), 32);
            assert!(id.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
            assert_eq!(traceparent, format!("00-{id}-{}-00", &traceparent[36..52]));
            unique.insert(id);
        }
    }

    assert_eq!(unique.len(), total_requests, "generated ids must not repeat");
    tracing::info!(total_requests, elapsed = ?start.elapsed(), "Load test finished");
}
