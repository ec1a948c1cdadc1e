use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde::Serialize;
use tracing::info;

fn to_result<T: Serialize>(req: &Request, model: &T) -> serde_json::Value {
    match serde_json::to_value(model) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

fn handle_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    to_result(req, &state.sheet.overall())
}

fn handle_preview(state: &mut AppState, req: &Request) -> serde_json::Value {
    to_result(req, &state.sheet.preview())
}

fn handle_check_print(state: &mut AppState, req: &Request) -> serde_json::Value {
    to_result(req, &state.sheet.print_readiness())
}

fn handle_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.clear_sheet();
    info!("marksheet reset to defaults");
    to_result(req, &state.sheet.preview())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marksheet.summary" => Some(handle_summary(state, req)),
        "marksheet.preview" => Some(handle_preview(state, req)),
        "marksheet.checkPrint" => Some(handle_check_print(state, req)),
        "marksheet.clear" => Some(handle_clear(state, req)),
        _ => None,
    }
}
