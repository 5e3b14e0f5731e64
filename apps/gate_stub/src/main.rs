use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use shared::{
    error::ServiceErrorBody,
    protocol::{EntranceDecision, OrderReply, OrderRequest, ServiceHealth},
};
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: String,
}

const MAX_SCAN_BYTES: usize = 16 * 1024 * 1024;

#[derive(Default)]
struct AppState {
    orders_placed: AtomicU64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let app = build_router(Arc::new(AppState::default()));

    let addr: SocketAddr = cli.bind.parse()?;
    info!(%addr, "gate stub listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/process-entrance", post(process_entrance))
        .route("/chatbot-order", post(chatbot_order))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_SCAN_BYTES))
        .with_state(state)
}

async fn process_entrance(
    mut multipart: Multipart,
) -> Result<Json<EntranceDecision>, (StatusCode, Json<ServiceErrorBody>)> {
    let mut scan = None;
    while let Some(field) = multipart.next_field().await.map_err(reject_upload)? {
        if field.name() == Some("file") {
            scan = Some(field.bytes().await.map_err(reject_upload)?);
        }
    }
    let Some(bytes) = scan else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ServiceErrorBody::new("missing multipart field `file`")),
        ));
    };
    let decision = decide_entrance(&bytes);
    info!(
        plate = decision.plate_text(),
        status = decision.status.as_deref().unwrap_or(""),
        "entrance scan processed"
    );
    Ok(Json(decision))
}

fn reject_upload(error: axum::extract::multipart::MultipartError) -> (StatusCode, Json<ServiceErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ServiceErrorBody::new(error.to_string())),
    )
}

async fn chatbot_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderRequest>,
) -> Json<OrderReply> {
    let session = request.session_id.as_deref().unwrap_or("default");
    info!(%session, "order message received");
    let order_number = state.orders_placed.fetch_add(1, Ordering::Relaxed) + 1;
    Json(compose_order_reply(&request.message, order_number))
}

async fn health() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "online".to_string(),
        model_loaded: true,
    })
}

/// An empty upload stands in for a frame where plate recognition found
/// nothing; anything else yields a granted decision keyed on the bytes so
/// the same image always reports the same plate.
fn decide_entrance(bytes: &[u8]) -> EntranceDecision {
    if bytes.is_empty() {
        return EntranceDecision {
            status: Some("error".to_string()),
            message: Some("No license plate detected in the image.".to_string()),
            decision: Some("HOLD".to_string()),
            analysis: Some(
                "Vehicle arrived but plate recognition failed. Manual check required."
                    .to_string(),
            ),
            ..EntranceDecision::default()
        };
    }

    let seed = scan_seed(bytes);
    let plate = fabricate_plate(seed);
    let order_id = 1000 + seed % 9000;
    let analysis = format!(
        "Plate {plate} matches an expected carrier. Order #{order_id} is flagged ready \
         for intake. Clearance to the unloading area is recommended."
    );
    EntranceDecision {
        status: Some("success".to_string()),
        plate: Some(plate),
        timestamp: Some(chrono::Local::now().format("%I:%M %p").to_string()),
        analysis: Some(analysis),
        factual_data: Some(serde_json::json!({
            "idCommande": order_id,
            "client_nom": "Client Alpha",
            "produit_nom": "Claviers mécaniques",
            "commande_statut": "en cours",
            "depot_nom": "Depot Central",
        })),
        ..EntranceDecision::default()
    }
}

fn scan_seed(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| acc.wrapping_mul(31).wrapping_add(u64::from(*byte)))
}

fn fabricate_plate(seed: u64) -> String {
    let letter = |n: u64| char::from(b'A' + (n % 26) as u8);
    format!(
        "{}{}-{:03}-{}{}",
        letter(seed),
        letter(seed >> 5),
        seed % 1000,
        letter(seed >> 10),
        letter(seed >> 15),
    )
}

fn compose_order_reply(message: &str, order_number: u64) -> OrderReply {
    let message = message.trim();
    if message.is_empty() {
        return OrderReply {
            status: Some("error".to_string()),
            message: "Problème technique avec le modèle local.".to_string(),
        };
    }
    // A quantity in the text is treated as a complete order request.
    if message.chars().any(|c| c.is_ascii_digit()) {
        return OrderReply {
            status: Some("success".to_string()),
            message: format!(
                "Bien reçu, la commande est en préparation. (Commande #{order_number} active)"
            ),
        };
    }
    OrderReply {
        status: Some("chat".to_string()),
        message: "Bonjour ! Indiquez le client, le produit et la quantité pour que \
                  j'enregistre la commande."
            .to_string(),
    }
}
