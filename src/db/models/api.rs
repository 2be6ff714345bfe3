use serde::Serialize;

/// Envelope returned by every endpoint.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str) -> Self {
        let mut response = Self::build(false, code, message);
        response.errors = Some(vec![ErrorDetail {
            field: None,
            code: error_code.to_string(),
            message: message.to_string(),
        }]);
        response
    }

    pub fn success(data: T, message: &str) -> Self {
        let mut response = Self::build(true, 200, message);
        response.data = Some(data);
        response
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        let mut response = Self::success(data, message);
        response.meta = Some(meta);
        response
    }

    pub fn created(data: T, message: &str) -> Self {
        let mut response = Self::build(true, 201, message);
        response.data = Some(data);
        response
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        let mut response = Self::build(false, 400, "Validation failed");
        response.errors = Some(errors);
        response
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, "FORBIDDEN", message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", message)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        let mut response = Self::build(false, 409, message);
        response.errors = Some(vec![ErrorDetail {
            field,
            code: error_code.to_string(),
            message: message.to_string(),
        }]);
        response
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", message)
    }
}

// Business error codes
pub mod error_codes {
    pub const USER_USERNAME_EXISTS: &str = "USER_001";
    pub const USER_EMAIL_EXISTS: &str = "USER_002";

    pub const TEAM_NAME_EXISTS: &str = "TEAM_001";
    pub const PROJECT_NAME_EXISTS: &str = "PROJECT_001";
    pub const TASK_NAME_EXISTS: &str = "TASK_001";
    pub const TASK_TYPE_NAME_EXISTS: &str = "TASK_002";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_carries_error_detail() {
        let response = ApiResponse::<()>::forbidden("nope");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 403);
        assert_eq!(json["errors"][0]["code"], "FORBIDDEN");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn success_envelope_omits_errors() {
        let response = ApiResponse::success(vec![1, 2], "ok");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("errors").is_none());
        assert!(json.get("meta").is_none());
    }
}
