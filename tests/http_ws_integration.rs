//! Integration tests for the wizard REST + WebSocket surface.
//!
//! Each test spins up an Axum server on a random port and drives it
//! over real HTTP (reqwest) and a real WebSocket (tokio-tungstenite),
//! walking the questionnaire -> upload -> generate -> download path.

use std::time::Duration;

use futures_util::StreamExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use cir_assist::config::WizardConfig;
use cir_assist::server::{AppState, wizard_routes};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(20);

const PDF: &str = "application/pdf";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Fast choreography so the simulated run completes quickly.
fn fast_config() -> WizardConfig {
    WizardConfig {
        tick_interval: Duration::from_millis(2),
        step_pause: Duration::from_millis(5),
        generating_hold: Duration::from_millis(50),
        ..WizardConfig::default()
    }
}

/// Start a server on a random port, return its base URL.
async fn start_server(config: WizardConfig) -> String {
    let app = wizard_routes(AppState::new(config));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

/// Fill every questionnaire field and advance through all sections.
async fn complete_questionnaire(client: &reqwest::Client, base: &str, company: &str) {
    let sections: [&[&str]; 4] = [
        &["company_name", "project_title"],
        &["project_description", "objectives"],
        &["start_date", "end_date", "budget", "team_size"],
        &["technical_challenges", "expected_results"],
    ];
    for fields in sections {
        for field in fields {
            let value = if *field == "company_name" {
                company.to_string()
            } else {
                format!("value for {field}")
            };
            let resp = client
                .post(format!("{base}/api/questionnaire/field"))
                .json(&json!({ "field": field, "value": value }))
                .send()
                .await
                .unwrap();
            assert!(resp.status().is_success());
        }
        let resp = client
            .post(format!("{base}/api/questionnaire/next"))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }
}

fn file_part(name: &str, mime: &str, size: usize) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(vec![0u8; size])
        .file_name(name.to_string())
        .mime_str(mime)
        .unwrap()
}

async fn upload(
    client: &reqwest::Client,
    base: &str,
    form: reqwest::multipart::Form,
) -> Value {
    let resp = client
        .post(format!("{base}/api/documents"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    resp.json().await.unwrap()
}

#[tokio::test]
async fn full_wizard_flow_over_http_and_ws() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(fast_config()).await;
        let client = reqwest::Client::new();

        // Questionnaire refuses to advance while the section is empty.
        let resp = client
            .post(format!("{base}/api/questionnaire/next"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 422);

        complete_questionnaire(&client, &base, "Acme Labs").await;

        let status: Value = client
            .get(format!("{base}/api/wizard/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status["stage"], "upload");
        assert_eq!(status["form_completed"], true);

        // Upload one valid 2MB PDF.
        let body = upload(
            &client,
            &base,
            reqwest::multipart::Form::new().part("file", file_part("spec.pdf", PDF, 2 * 1024 * 1024)),
        )
        .await;
        assert_eq!(body["added"].as_array().unwrap().len(), 1);
        assert!(body["error_summary"].is_null());

        // Watch progress over WS, then start the run.
        let ws_url = format!("{}/ws/progress", base.replace("http://", "ws://"));
        let (mut ws, _resp) = connect_async(&ws_url).await.unwrap();

        // Initial snapshot arrives before the run starts.
        let first: Value = match ws.next().await.unwrap().unwrap() {
            Message::Text(txt) => serde_json::from_str(&txt).unwrap(),
            other => panic!("expected Text frame, got {other:?}"),
        };
        assert_eq!(first["type"], "snapshot");
        assert_eq!(first["phase"], "idle");

        let resp = client
            .post(format!("{base}/api/generation/start"))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let status: Value = resp.json().await.unwrap();
        assert_eq!(status["stage"], "generate");
        assert_eq!(status["generating"], true);
        assert_eq!(status["run_phase"], "running");

        // Steps must complete strictly in order, then the run finishes.
        let mut completed = Vec::new();
        loop {
            let msg = ws.next().await.unwrap().unwrap();
            let event: Value = match msg {
                Message::Text(txt) => serde_json::from_str(&txt).unwrap(),
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("unexpected frame {other:?}"),
            };
            match event["type"].as_str().unwrap() {
                "snapshot" => {}
                "step_completed" => completed.push(event["index"].as_u64().unwrap()),
                "run_completed" => break,
                other => panic!("unexpected event type {other}"),
            }
        }
        assert_eq!(completed, vec![0, 1, 2, 3]);

        let status: Value = client
            .get(format!("{base}/api/wizard/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status["run_phase"], "done");
        assert_eq!(status["overall_progress"], 100.0);

        // Download the report.
        let resp = client
            .get(format!("{base}/api/report"))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()["content-type"].to_str().unwrap(),
            "text/plain;charset=utf-8"
        );
        assert!(
            resp.headers()["content-disposition"]
                .to_str()
                .unwrap()
                .contains("Rapport_CIR_Acme_Labs.txt")
        );
        let text = resp.text().await.unwrap();
        assert!(text.contains("RAPPORT CIR - Acme Labs"));
        assert!(text.contains("spec.pdf (2.00 MB)"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn mixed_batch_keeps_valid_files_and_reports_the_oversized_one() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(fast_config()).await;
        let client = reqwest::Client::new();
        complete_questionnaire(&client, &base, "Acme").await;

        let body = upload(
            &client,
            &base,
            reqwest::multipart::Form::new()
                .part("file", file_part("huge.pdf", PDF, 15 * 1024 * 1024))
                .part("file", file_part("notes.docx", DOCX, 1024 * 1024)),
        )
        .await;

        let added = body["added"].as_array().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0]["name"], "notes.docx");

        let rejected = body["rejected"].as_array().unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0]["name"], "huge.pdf");
        assert_eq!(rejected[0]["reason"], "file_too_large");

        let summary = body["error_summary"].as_str().unwrap();
        assert!(summary.contains("huge.pdf: Fichier trop volumineux"), "{summary}");

        let docs = body["documents"].as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "notes.docx");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn duplicate_filenames_are_silently_skipped() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(fast_config()).await;
        let client = reqwest::Client::new();
        complete_questionnaire(&client, &base, "Acme").await;

        upload(
            &client,
            &base,
            reqwest::multipart::Form::new().part("file", file_part("draft.pdf", PDF, 100)),
        )
        .await;
        let body = upload(
            &client,
            &base,
            reqwest::multipart::Form::new().part("file", file_part("draft.pdf", PDF, 999)),
        )
        .await;

        assert!(body["added"].as_array().unwrap().is_empty());
        assert!(body["rejected"].as_array().unwrap().is_empty());
        assert!(body["error_summary"].is_null());

        let docs = body["documents"].as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["size"], 100);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn document_removal_by_id_and_unknown_id_noop() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(fast_config()).await;
        let client = reqwest::Client::new();
        complete_questionnaire(&client, &base, "Acme").await;

        let body = upload(
            &client,
            &base,
            reqwest::multipart::Form::new()
                .part("file", file_part("a.pdf", PDF, 10))
                .part("file", file_part("b.pdf", PDF, 20)),
        )
        .await;
        let id = body["added"][0]["id"].as_str().unwrap().to_string();

        let resp = client
            .delete(format!("{base}/api/documents/{id}"))
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["removed"], true);
        let docs = body["documents"].as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "b.pdf");

        // Removing a nonexistent id is a no-op.
        let resp = client
            .delete(format!(
                "{base}/api/documents/00000000-0000-0000-0000-000000000000"
            ))
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["removed"], false);
        assert_eq!(body["documents"].as_array().unwrap().len(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn generating_flag_clears_after_the_hold() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(fast_config()).await;
        let client = reqwest::Client::new();
        complete_questionnaire(&client, &base, "Acme").await;
        upload(
            &client,
            &base,
            reqwest::multipart::Form::new().part("file", file_part("a.pdf", PDF, 10)),
        )
        .await;

        let resp = client
            .post(format!("{base}/api/generation/start"))
            .send()
            .await
            .unwrap();
        let status: Value = resp.json().await.unwrap();
        assert_eq!(status["generating"], true);

        // The hold (50ms here) elapses independently of the run.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let status: Value = client
            .get(format!("{base}/api/wizard/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status["generating"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn regenerate_restarts_the_run_from_zero() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(fast_config()).await;
        let client = reqwest::Client::new();
        complete_questionnaire(&client, &base, "Acme").await;
        upload(
            &client,
            &base,
            reqwest::multipart::Form::new().part("file", file_part("a.pdf", PDF, 10)),
        )
        .await;

        client
            .post(format!("{base}/api/generation/start"))
            .send()
            .await
            .unwrap();

        // Regenerating mid-run is rejected: there is no cancellation.
        let resp = client
            .post(format!("{base}/api/generation/regenerate"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);

        // Wait for the run to finish, then regenerate.
        loop {
            let status: Value = client
                .get(format!("{base}/api/wizard/status"))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if status["run_phase"] == "done" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let resp = client
            .post(format!("{base}/api/generation/regenerate"))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let status: Value = resp.json().await.unwrap();
        assert_eq!(status["run_phase"], "running");
        assert_eq!(status["overall_progress"], 0.0);
    })
    .await
    .expect("test timed out");
}
