use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use sumologic_test_reporter::{Config, EventKind, HttpTransport, Reporter};
use tokio::time::{sleep, timeout, Duration};

fn config_for(server: &Server, sync_interval_ms: u64) -> Config {
    Config {
        sync_interval_ms,
        ..Config::new(server.url())
    }
}

#[tokio::test]
async fn reporter_ships_run_with_duration() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(
            r#""event":"end","data":\{.*"duration":\d+"#.to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;

    let reporter = Reporter::new(config_for(&server, 10)).unwrap();

    reporter.emit(EventKind::Start, &json!({}));
    reporter.emit(EventKind::TestPass, &json!({"title": "adds numbers"}));
    reporter.emit(EventKind::End, &json!({"failures": 0}));

    let shipped = async {
        while !mock.matched() || reporter.pending_events() > 0 {
            sleep(Duration::from_millis(20)).await;
        }
    };

    match timeout(Duration::from_millis(2000), shipped).await {
        Ok(()) => mock.assert(),
        Err(_) => panic!("timed out before collector received the run events"),
    }
    assert_eq!(reporter.pending_events(), 0);
}

#[tokio::test]
async fn failed_batches_are_retried_on_the_next_interval() {
    let mut server = Server::new_async().await;

    let failing_mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("Internal Server Error")
        .expect(1)
        .create_async()
        .await;

    let success_mock = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(r#""event":"test:pass""#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    let reporter = Reporter::with_transport(
        config_for(&server, 10),
        Arc::new(HttpTransport::new()),
    )
    .unwrap();

    reporter.emit(EventKind::TestPass, &json!({"title": "eventually ships"}));

    let drained = async {
        while reporter.pending_events() > 0 {
            sleep(Duration::from_millis(20)).await;
        }
    };

    match timeout(Duration::from_millis(2000), drained).await {
        Ok(()) => {
            failing_mock.assert_async().await;
            success_mock.assert_async().await;
        }
        Err(_) => panic!("timed out before failed batch was retried"),
    }
}

#[tokio::test]
async fn end_signal_drains_without_waiting_for_the_interval() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(r#""event":"end""#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    // Interval far beyond the test runtime: only the final drain can flush.
    let reporter = Reporter::new(config_for(&server, 60_000)).unwrap();

    reporter.emit(EventKind::Start, &json!({}));
    reporter.emit(EventKind::SuiteStart, &json!({"title": "arithmetic"}));
    reporter.emit(EventKind::End, &json!({}));

    let shipped = async {
        while !mock.matched() {
            sleep(Duration::from_millis(20)).await;
        }
    };

    match timeout(Duration::from_millis(2000), shipped).await {
        Ok(()) => mock.assert(),
        Err(_) => panic!("timed out before the shutdown drain reached the collector"),
    }
}
