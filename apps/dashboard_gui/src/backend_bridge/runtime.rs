//! Backend worker: owns the tokio runtime and the decision-service client.
//!
//! Commands arrive over the crossbeam queue; each one is served by its own
//! spawned task so a slow entrance scan never delays an order turn. Results
//! come back to the egui thread as `UiEvent`s.

use std::path::Path;

use crossbeam_channel::{Receiver, Sender};
use gate_client::{EntranceScanUpload, GateClient};
use shared::protocol::EntranceDecision;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = GateClient::new(settings.service_url.clone());
            tracing::info!(
                service_url = %client.base_url(),
                session_id = %client.session_id(),
                "backend worker ready"
            );
            let _ = ui_tx.try_send(UiEvent::WorkerReady);

            // First availability probe, so the header chip settles quickly.
            spawn_health_check(&client, &ui_tx);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::ScanEntrance { image_path } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match run_entrance_scan(&client, &image_path).await {
                                Ok(decision) => UiEvent::EntranceDecisionReady(decision),
                                Err(message) => {
                                    tracing::error!(
                                        path = %image_path.display(),
                                        %message,
                                        "entrance scan failed"
                                    );
                                    UiEvent::EntranceScanFailed(UiError::from_message(
                                        UiErrorContext::EntranceScan,
                                        message,
                                    ))
                                }
                            };
                            let _ = ui_tx.try_send(event);
                        });
                    }
                    BackendCommand::SubmitOrder { text } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match client.submit_order(&text).await {
                                Ok(reply) => UiEvent::AssistantReplied(reply.message),
                                Err(err) => {
                                    tracing::debug!(%err, "order turn failed");
                                    UiEvent::AssistantUnreachable(UiError::from_message(
                                        UiErrorContext::OrderIntake,
                                        err.to_string(),
                                    ))
                                }
                            };
                            let _ = ui_tx.try_send(event);
                        });
                    }
                    BackendCommand::CheckHealth => spawn_health_check(&client, &ui_tx),
                }
            }
        });
    });
}

async fn run_entrance_scan(
    client: &GateClient,
    image_path: &Path,
) -> Result<EntranceDecision, String> {
    let bytes = tokio::fs::read(image_path)
        .await
        .map_err(|err| format!("failed to read capture '{}': {err}", image_path.display()))?;
    let mime_type = mime_guess::from_path(image_path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();
    let filename = image_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("capture.jpg")
        .to_string();

    client
        .process_entrance(EntranceScanUpload {
            filename,
            mime_type,
            bytes,
        })
        .await
        .map_err(|err| err.to_string())
}

fn spawn_health_check(client: &GateClient, ui_tx: &Sender<UiEvent>) {
    let client = client.clone();
    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        let event = match client.health().await {
            Ok(health) => UiEvent::HealthChecked {
                online: health.is_online(),
                model_loaded: health.model_loaded,
            },
            Err(err) => {
                tracing::debug!(%err, "health probe failed");
                UiEvent::HealthChecked {
                    online: false,
                    model_loaded: false,
                }
            }
        };
        let _ = ui_tx.try_send(event);
    });
}
