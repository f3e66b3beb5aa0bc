/*
 * Responsibility
 * - forward-auth 用の downstream handler
 * - ここに到達した時点で filter は許可済み。proxy は 2xx を見て通す
 */
use axum::http::StatusCode;

pub async fn verify() -> StatusCode {
    StatusCode::NO_CONTENT
}
