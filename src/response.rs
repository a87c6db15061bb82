use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const CODE_SUCCESS: i32 = 0;
pub const CODE_BAD_REQUEST: i32 = 400;
pub const CODE_NOT_FOUND: i32 = 404;
pub const CODE_SERVER_ERROR: i32 = 500;

/// Envelope wrapping every API response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct PageData<T> {
    pub list: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

pub fn success<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: CODE_SUCCESS,
        message: "success".into(),
        data: Some(data),
    })
}

pub fn success_empty() -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        code: CODE_SUCCESS,
        message: "success".into(),
        data: None,
    })
}

pub fn success_with_message<T: Serialize>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: CODE_SUCCESS,
        message: message.into(),
        data: Some(data),
    })
}

pub fn success_page<T: Serialize>(
    list: Vec<T>,
    total: i64,
    page: i64,
    page_size: i64,
) -> Json<ApiResponse<PageData<T>>> {
    success(PageData {
        list,
        total,
        page,
        page_size,
    })
}

pub fn failure(status: StatusCode, code: i32, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            code,
            message: message.into(),
            data: None,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let Json(body) = success(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn empty_success_omits_data() {
        let Json(body) = success_empty();
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("data"));
    }

    #[test]
    fn page_envelope_carries_the_window() {
        let Json(body) = success_page(vec!["a"], 42, 2, 10);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"]["total"], 42);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["page_size"], 10);
        assert_eq!(json["data"]["list"][0], "a");
    }

    #[test]
    fn failure_sets_status_and_code() {
        let resp = failure(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "user not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
