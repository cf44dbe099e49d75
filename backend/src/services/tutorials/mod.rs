//! # Tutorial Service Module
//!
//! Aggregates the API endpoints that turn a raw technical manual into an
//! editable tutorial and render the edited tutorial to a PDF. It acts as a
//! router, directing incoming HTTP requests under the `/api/tutorials` path
//! to the handler logic defined in its sub-modules.
//!
//! ## Sub-modules:
//! - `generate`: Calls the external structured-generation service and
//!   normalizes its answer into the shared `Tutorial` model.
//! - `schema`: The strict response schema sent to the service, the raw
//!   payload types it answers with, and the repair step that lifts them into
//!   the editable document model.
//! - `pdf`: Renders a posted `Tutorial` snapshot into a paginated A4 PDF.

mod generate;
mod pdf;
mod schema;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for all tutorial-related API endpoints.
const API_PATH: &str = "/api/tutorials";

/// Configures and returns the Actix `Scope` for all tutorial-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /generate`**:
///     - **Handler**: `generate::process`
///     - **Description**: Expects a JSON payload with the raw manual text.
///       Rejects trimmed-empty input with 400 before any upstream call;
///       otherwise performs one round trip to the generation service and
///       returns the repaired `Tutorial` as JSON, or an error body when the
///       service fails or answers outside its declared schema.
///
/// *   **`POST /pdf`**:
///     - **Handler**: `pdf::process`
///     - **Description**: Expects a complete `Tutorial` snapshot (including
///       attached base64 images) and returns the rendered A4 PDF bytes with
///       the fixed filename `tutorial-gerado.pdf`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/generate", post().to(generate::process))
        .route("/pdf", post().to(pdf::process))
}
