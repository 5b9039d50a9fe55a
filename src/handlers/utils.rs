use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};
use uuid::Uuid;

use crate::error::ApiError;

/// Unwrap a path id, turning malformed values into a 400 with our error body
pub fn parse_uuid_path(path: Result<Path<String>, PathRejection>) -> Result<Uuid, ApiError> {
    let Path(raw) = path.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Uuid::parse_str(&raw).map_err(|_| ApiError::bad_request(format!("Invalid uuid: {}", raw)))
}

/// Unwrap a JSON body, turning deserialization failures into INVALID_JSON
pub fn parse_json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::invalid_json(e.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid_path(Ok(Path(id.to_string()))).unwrap(), id);
    }

    #[test]
    fn malformed_uuid_is_bad_request() {
        for raw in ["111", "aaa", "a-a-b-c"] {
            let err = parse_uuid_path(Ok(Path(raw.to_string()))).unwrap_err();
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), format!("Invalid uuid: {}", raw));
        }
    }
}
