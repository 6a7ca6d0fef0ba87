//! Mock provider servers and configuration helpers shared by the integration tests

#![allow(dead_code)]

pub mod config;
pub mod mock_aws;
pub mod mock_elevenlabs;
pub mod mock_openai;

use std::net::SocketAddr;

use axum::Router;
use credcheck_config::Config;
use tokio_util::sync::CancellationToken;
use verifier::{CheckResult, Report, Runner, Suite};

/// Serve `app` on a random local port until the returned token is cancelled
pub async fn serve(app: Router) -> anyhow::Result<(SocketAddr, CancellationToken)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_clone.cancelled().await;
            })
            .await
            .ok();
    });

    Ok((addr, shutdown))
}

/// Run a suite against `config`, returning the results and the console output
pub async fn run_suite(config: &Config, suite: Suite) -> (Vec<CheckResult>, String) {
    let runner = Runner::from_config(config, suite).unwrap();
    let mut report = Report::new(Vec::new());
    let results = runner.run(&mut report).await.unwrap();
    (results, String::from_utf8(report.into_inner()).unwrap())
}
