//! Health check endpoint

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe. Returns a fixed payload so load balancers and
/// orchestrators can verify the process is serving.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "interview-gateway",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_payload() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "interview-gateway");
    }
}
