use serde::Deserialize;
use serde_json::json;
use shape_core::shape::drag::DragOutcome;
use shape_core::topo::{EdgeId, Selection, VertexId};
use shape_core::{ShapeEditor, ShapeError};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while translating a client message into an editor call.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Malformed payload for {command}: {detail}")]
    BadPayload { command: String, detail: String },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::UnknownCommand(_) => "UNKNOWN_COMMAND",
            CommandError::BadPayload { .. } => "BAD_PAYLOAD",
            CommandError::Shape(e) => e.code(),
        }
    }

    pub fn severity(&self) -> &'static str {
        match self {
            CommandError::Shape(_) => "warning",
            _ => "error",
        }
    }
}

#[derive(Deserialize)]
struct PointCmd {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct DeltaCmd {
    dx: f64,
    dy: f64,
}

#[derive(Deserialize)]
struct EdgeCmd {
    v1: VertexId,
    v2: VertexId,
}

#[derive(Deserialize)]
struct SetVertexCmd {
    id: VertexId,
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct EdgeValueCmd {
    id: EdgeId,
    value: f64,
}

#[derive(Deserialize)]
struct MergeCmd {
    source: VertexId,
    target: VertexId,
}

#[derive(Deserialize)]
struct PolygonCmd {
    sides: usize,
    radius: f64,
    center: [f64; 2],
}

fn parse_json<'a, T: Deserialize<'a>>(command: &str, payload: &'a str) -> Result<T, CommandError> {
    serde_json::from_str(payload).map_err(|e| CommandError::BadPayload {
        command: command.to_string(),
        detail: e.to_string(),
    })
}

fn parse_value<T: std::str::FromStr>(command: &str, payload: &str) -> Result<T, CommandError>
where
    T::Err: fmt::Display,
{
    payload.trim().parse::<T>().map_err(|e| CommandError::BadPayload {
        command: command.to_string(),
        detail: e.to_string(),
    })
}

/// Applies one `COMMAND:payload` message to the session's editor.
///
/// Every successful command is answered with a fresh `SHAPE_UPDATE`, so
/// nothing is returned on success.
pub fn handle_command(editor: &mut ShapeEditor, text: &str) -> Result<(), CommandError> {
    let (command, payload) = text.split_once(':').unwrap_or((text, ""));

    match command {
        "ADD_VERTEX" => {
            let p: PointCmd = parse_json(command, payload)?;
            let id = editor.create_vertex([p.x, p.y]);
            info!("Created vertex {}", id);
        }
        "ADD_EDGE" => {
            let cmd: EdgeCmd = parse_json(command, payload)?;
            let id = editor.create_edge(cmd.v1, cmd.v2)?;
            info!("Created edge {}", id);
        }
        "REMOVE_VERTEX" => {
            let id: VertexId = parse_json(command, payload)?;
            let removed = editor.remove_vertex(id)?;
            info!("Removed vertex {} and {} incident edges", id, removed.len());
        }
        "REMOVE_EDGE" => {
            let id: EdgeId = parse_json(command, payload)?;
            editor.remove_edge(id)?;
            info!("Removed edge {}", id);
        }
        "MERGE" => {
            let cmd: MergeCmd = parse_json(command, payload)?;
            let outcome = editor.merge_vertices(cmd.source, cmd.target)?;
            info!(
                "Merged {} into {} ({} self-loops dropped)",
                outcome.removed_vertex,
                outcome.kept_vertex,
                outcome.removed_edges.len()
            );
        }
        "SET_VERTEX" => {
            let cmd: SetVertexCmd = parse_json(command, payload)?;
            editor.move_vertex(cmd.id, [cmd.x, cmd.y])?;
        }
        "SET_EDGE_LENGTH" => {
            let cmd: EdgeValueCmd = parse_json(command, payload)?;
            editor.set_edge_length(cmd.id, cmd.value)?;
        }
        "SET_EDGE_ANGLE" => {
            let cmd: EdgeValueCmd = parse_json(command, payload)?;
            editor.set_edge_angle(cmd.id, cmd.value)?;
        }
        "DRAG_VERTEX_START" => {
            let id: VertexId = parse_json(command, payload)?;
            editor.begin_vertex_drag(id)?;
        }
        "DRAG_EDGE_START" => {
            let id: EdgeId = parse_json(command, payload)?;
            editor.begin_edge_drag(id)?;
        }
        "DRAG_MOVE" => {
            let p: PointCmd = parse_json(command, payload)?;
            let feedback = editor.drag_to([p.x, p.y])?;
            debug!("Drag at {:?} (snap: {:?})", feedback.position, feedback.snap_target);
        }
        "DRAG_BY" => {
            let d: DeltaCmd = parse_json(command, payload)?;
            editor.drag_by([d.dx, d.dy])?;
        }
        "DRAG_END" => match editor.end_drag()? {
            DragOutcome::Merged(outcome) => {
                info!("Drag merged {} into {}", outcome.removed_vertex, outcome.kept_vertex)
            }
            DragOutcome::Moved => debug!("Drag finished without merge"),
        },
        "DRAG_CANCEL" => {
            editor.cancel_drag()?;
        }
        "SELECT" => {
            if payload == "CLEAR" {
                editor.clear_selection();
                info!("Selection cleared");
            } else {
                let selection: Selection = parse_json(command, payload)?;
                editor.select(selection)?;
                info!("Selected {:?}", selection);
            }
        }
        "SET_AUTO_FILL" => {
            let enabled: bool = parse_value(command, payload)?;
            editor.set_auto_fill(enabled);
            info!("Auto fill {}", if enabled { "enabled" } else { "disabled" });
        }
        "SET_GRID" => {
            let size: f64 = parse_value(command, payload)?;
            editor.set_grid_size(size)?;
        }
        "SET_SNAP_DISTANCE" => {
            let distance: f64 = parse_value(command, payload)?;
            editor.set_snap_distance(distance)?;
        }
        "ADD_LINE" => {
            editor.add_line()?;
        }
        "ADD_RECTANGLE" => {
            editor.add_rectangle()?;
        }
        "ADD_POLYGON" => {
            if payload.trim().is_empty() {
                editor.add_pentagon()?;
            } else {
                let cmd: PolygonCmd = parse_json(command, payload)?;
                editor.add_regular_polygon(cmd.sides, cmd.radius, cmd.center)?;
            }
        }
        "RESET" => {
            editor.reset();
            info!("Shape reset");
        }
        "GET_SHAPE" => {}
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    }

    Ok(())
}

/// Serializes the editor's current state for the frontend.
pub fn shape_update(editor: &ShapeEditor) -> String {
    let json = serde_json::to_string(&editor.snapshot()).unwrap_or_else(|_| "{}".to_string());
    format!("SHAPE_UPDATE:{}", json)
}

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!(
        "ERROR_UPDATE:{}",
        json!({
            "code": code,
            "message": message,
            "severity": severity
        })
    )
}

impl CommandError {
    pub fn to_message(&self) -> String {
        format_error(self.code(), &self.to_string(), self.severity())
    }
}
