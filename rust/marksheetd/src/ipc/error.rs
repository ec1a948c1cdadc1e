use crate::sheet::SheetError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub fn sheet_err(id: &str, e: &SheetError) -> serde_json::Value {
    let details = match e {
        SheetError::UnknownSubject(sid) => json!({ "subjectId": sid }),
        SheetError::UnknownDetailField(key) | SheetError::BadDetailValue(key) => {
            json!({ "field": key })
        }
    };
    err(id, e.code(), e.to_string(), Some(details))
}

/// Line written when a request can't be parsed, so there is no id to echo.
pub fn bad_json(message: impl Into<String>) -> serde_json::Value {
    json!({
        "ok": false,
        "error": {
            "code": "bad_json",
            "message": message.into(),
        }
    })
}
