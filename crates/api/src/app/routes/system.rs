use axum::http::StatusCode;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn index() -> &'static str {
    "Inventory assistant is running."
}
