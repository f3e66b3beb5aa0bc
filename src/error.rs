/*
 * Responsibility
 * - 拒否理由 (Rejection) の定義
 * - IntoResponse 実装 (HTTP status のみ、body は返さない)
 * - claim の中身やデコード詳細はレスポンスに載せない (ログにだけ出す)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why the filter refused to pass a request on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing credential cookie")]
    MissingCredential,
    #[error("malformed token")]
    MalformedToken,
    #[error("missing or malformed group claim")]
    MissingOrMalformedGroups,
    #[error("no allowed group")]
    GroupNotAllowed,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MissingCredential => StatusCode::BAD_REQUEST,
            Rejection::MalformedToken | Rejection::MissingOrMalformedGroups => {
                StatusCode::UNAUTHORIZED
            }
            Rejection::GroupNotAllowed => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_failure_step() {
        assert_eq!(Rejection::MissingCredential.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Rejection::MalformedToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Rejection::MissingOrMalformedGroups.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(Rejection::GroupNotAllowed.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn response_has_no_body() {
        let resp = Rejection::GroupNotAllowed.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
