use crate::ipc::error::{err, ok, sheet_err};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "details": state.sheet.details().to_json() }))
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(patch) = req.params.get("details").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "details must be an object", None);
    };
    if let Err(e) = state.sheet.update_details(patch) {
        return sheet_err(&req.id, &e);
    }
    ok(&req.id, json!({ "details": state.sheet.details().to_json() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "details.get" => Some(handle_get(state, req)),
        "details.update" => Some(handle_update(state, req)),
        _ => None,
    }
}
