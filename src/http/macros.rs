/// Build a JSON response from any serializable value.
#[macro_export]
macro_rules! json {
    ($data:expr) => {
        $crate::http::Response::new($crate::http::StatusCode::Ok, Vec::new()).json(&$data)
    };
    ($status:expr, $data:expr) => {
        $crate::http::Response::new($status, Vec::new()).json(&$data)
    };
}

/// Build a `{"message": ...}` JSON response.
#[macro_export]
macro_rules! message {
    ($msg:expr) => {
        $crate::json!(serde_json::json!({ "message": $msg }))
    };
    ($status:expr, $msg:expr) => {
        $crate::json!($status, serde_json::json!({ "message": $msg }))
    };
}
