use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /health` — liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "status": "UP" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_up() {
        let Json(body) = health().await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["status"], "UP");
    }
}
