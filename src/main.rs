mod alch;
mod config;
mod error;
mod loader;
mod model;
mod report;
mod stats;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use config::Cli;
use error::{AppError, Result};

#[derive(Debug, PartialEq)]
enum Outcome {
    Reported(usize),
    NothingProfitable,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    config::init_logging();

    let result = run(&cli).await;
    match &result {
        Ok(Outcome::Reported(count)) => info!(count, "report printed"),
        Ok(Outcome::NothingProfitable) => {}
        Err(e) => eprintln!("{}", error_line(e)),
    }

    ExitCode::from(exit_status(&result))
}

/// 0 for any completed run, including one with nothing to report.
fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// The one line written to stderr when a run fails.
fn error_line(err: &AppError) -> String {
    let message = err.to_string();
    let joined = message.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    format!("error: {}", joined)
}

async fn run(cli: &Cli) -> Result<Outcome> {
    let started = Instant::now();

    let client = loader::build_client(&cli.user_agent, cli.timeout())?;
    let base_url = cli.base_url();

    println!("Fetching item mapping and latest prices...");
    let (items, prices) = tokio::try_join!(
        loader::load_mapping(&client, base_url),
        loader::load_latest(&client, base_url),
    )?;
    println!("Loaded {} items and {} price quotes", items.len(), prices.len());

    let mut report = alch::analyze(&items, &prices);
    if cli.f2p {
        report.records.retain(|r| !r.members);
    }
    info!(
        reagent_cost = report.reagent_cost,
        profitable = report.records.len(),
        "alchemy profits computed"
    );

    if report.is_empty() {
        println!("No profitable items found.");
        return Ok(Outcome::NothingProfitable);
    }

    let now = chrono::Utc::now().timestamp();
    println!();
    print!("{}", report::render(&report, cli.top, now));

    println!();
    println!("Finished in {:.2}s", started.elapsed().as_secs_f64());
    Ok(Outcome::Reported(report.records.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING: &str = r#"[
        {"id":1,"name":"Widget","examine":"x","members":false,
         "highalch":1000,"lowalch":600,"value":1500,"limit":100},
        {"id":2,"name":"Rune platebody","examine":"x","members":true,
         "highalch":39000,"lowalch":26000,"value":65000,"limit":70},
        {"id":3,"name":"Junk","examine":"x","members":false,
         "highalch":0,"lowalch":0,"value":1,"limit":null}
    ]"#;

    fn cli_for(server: &mockito::Server, extra: &[&str]) -> Cli {
        let url = server.url();
        let mut args = vec!["alch_analyzer", "--base-url", url.as_str(), "--timeout", "5"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    async fn serve(
        server: &mut mockito::Server,
        mapping: &str,
        latest: &str,
    ) -> Vec<mockito::Mock> {
        vec![
            server
                .mock("GET", "/mapping")
                .with_status(200)
                .with_body(mapping)
                .create_async()
                .await,
            server
                .mock("GET", "/latest")
                .with_status(200)
                .with_body(latest)
                .create_async()
                .await,
        ]
    }

    #[tokio::test]
    async fn reports_profitable_items() {
        let mut server = mockito::Server::new_async().await;
        let latest = r#"{"data":{
            "1":{"high":500,"highTime":1,"low":400,"lowTime":1},
            "2":{"high":38000,"highTime":1,"low":37900,"lowTime":1},
            "3":{"high":1,"highTime":1,"low":1,"lowTime":1},
            "561":{"high":120,"highTime":1,"low":110,"lowTime":1}
        }}"#;
        let _mocks = serve(&mut server, MAPPING, latest).await;

        let result = run(&cli_for(&server, &[])).await;

        assert_eq!(exit_status(&result), 0);
        assert_eq!(result.unwrap(), Outcome::Reported(2));
    }

    #[tokio::test]
    async fn f2p_filter_drops_members_items() {
        let mut server = mockito::Server::new_async().await;
        let latest = r#"{"data":{
            "1":{"high":500,"highTime":1,"low":400,"lowTime":1},
            "2":{"high":38000,"highTime":1,"low":37900,"lowTime":1}
        }}"#;
        let _mocks = serve(&mut server, MAPPING, latest).await;

        let outcome = run(&cli_for(&server, &["--f2p"])).await.unwrap();

        assert_eq!(outcome, Outcome::Reported(1));
    }

    #[tokio::test]
    async fn empty_result_exits_zero() {
        let mut server = mockito::Server::new_async().await;
        let latest = r#"{"data":{"1":{"high":5000,"highTime":1,"low":4000,"lowTime":1}}}"#;
        let _mocks = serve(&mut server, MAPPING, latest).await;

        let result = run(&cli_for(&server, &[])).await;

        assert_eq!(exit_status(&result), 0);
        assert_eq!(result.unwrap(), Outcome::NothingProfitable);
    }

    #[tokio::test]
    async fn failed_fetch_exits_one() {
        let mut server = mockito::Server::new_async().await;
        let _mapping = server
            .mock("GET", "/mapping")
            .with_status(200)
            .with_body(MAPPING)
            .create_async()
            .await;
        let _latest = server.mock("GET", "/latest").with_status(500).create_async().await;

        let result = run(&cli_for(&server, &[])).await;

        assert_eq!(exit_status(&result), 1);
        assert!(matches!(result, Err(AppError::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn malformed_body_exits_one_with_single_line() {
        let mut server = mockito::Server::new_async().await;
        let _mocks = serve(&mut server, "{\"bad\":\n  [1,\n  2\n", r#"{"data":{}}"#).await;

        let result = run(&cli_for(&server, &[])).await;

        assert_eq!(exit_status(&result), 1);
        let line = error_line(result.as_ref().unwrap_err());
        assert!(line.starts_with("error: failed to decode item mapping"));
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn http_error_line() {
        let err = AppError::Http {
            url: "http://localhost/latest".to_string(),
            status: 404,
            reason: "Not Found".to_string(),
        };

        assert_eq!(error_line(&err), "error: HTTP 404 Not Found from http://localhost/latest");
    }

    #[test]
    fn decode_error_line() {
        let source = serde_json::from_str::<Vec<u8>>("[1,\n\n  oops]").unwrap_err();
        let line = error_line(&AppError::Decode { what: "item mapping", source });

        assert!(line.starts_with("error: failed to decode item mapping: "));
        assert_eq!(line.lines().count(), 1);
    }

    #[tokio::test]
    async fn request_error_line() {
        // nothing listens on port 1
        let url = "http://127.0.0.1:1/mapping";
        let source = reqwest::Client::new().get(url).send().await.unwrap_err();
        let result: Result<Outcome> = Err(AppError::Request { url: url.to_string(), source });

        assert_eq!(exit_status(&result), 1);
        let line = error_line(result.as_ref().unwrap_err());
        assert!(line.starts_with("error: request to http://127.0.0.1:1/mapping failed: "));
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn multi_line_messages_are_joined() {
        let err = AppError::Http {
            url: "http://localhost/\nlatest".to_string(),
            status: 502,
            reason: "Bad Gateway".to_string(),
        };

        assert_eq!(error_line(&err), "error: HTTP 502 Bad Gateway from http://localhost/ latest");
    }
}
