use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{sink::SinkExt, stream::StreamExt};
use shape_core::ShapeEditor;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::ServerConfig;

// Application State
struct AppState {
    config: ServerConfig,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; falling back to defaults", e);
            ServerConfig::default()
        }
    };
    let addr = config.addr;
    let shared_state = Arc::new(AppState { config });

    let app = Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn root() -> &'static str {
    "Hello from Shape Editor Backend!"
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("Client connected");
    let (mut sender, mut receiver) = socket.split();

    // Each connection edits its own shape
    let mut editor = ShapeEditor::new(state.config.shape.clone());

    if sender.send(Message::Text(commands::shape_update(&editor))).await.is_err() {
        return;
    }

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!("WebSocket error: {}", e);
                break;
            }
        };

        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        debug!("Received message: {}", text);

        let reply = match commands::handle_command(&mut editor, &text) {
            Ok(()) => commands::shape_update(&editor),
            Err(e) => {
                warn!("Command failed: {}", e);
                e.to_message()
            }
        };

        if sender.send(Message::Text(reply)).await.is_err() {
            break;
        }
    }

    info!("Client disconnected");
}
