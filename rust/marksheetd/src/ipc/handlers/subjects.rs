use crate::input::normalize_marks;
use crate::ipc::error::{err, ok, sheet_err};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

fn optional_name(req: &Request) -> Result<Option<String>, serde_json::Value> {
    match req.params.get("name") {
        None => Ok(None),
        Some(serde_json::Value::Null) => Ok(Some(String::new())),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| err(&req.id, "bad_params", "name must be a string", None)),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "subjects": state.sheet.rows() }))
}

fn handle_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match optional_name(req) {
        Ok(v) => v.unwrap_or_default(),
        Err(e) => return e,
    };
    let row = state.sheet.add_subject(name);
    ok(&req.id, json!({ "subject": row }))
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let name = match optional_name(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    // A key that is present but blank still counts as an edit to 0.
    let theory = req
        .params
        .get("theory")
        .map(|v| normalize_marks(Some(v)));
    let practical = req
        .params
        .get("practical")
        .map(|v| normalize_marks(Some(v)));

    match state
        .sheet
        .update_subject(&subject_id, name, theory, practical)
    {
        Ok(row) => ok(&req.id, json!({ "subject": row })),
        Err(e) => sheet_err(&req.id, &e),
    }
}

fn handle_remove(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.sheet.remove_subject(&subject_id) {
        Ok(()) => ok(
            &req.id,
            json!({
                "subjectId": subject_id,
                "subjectCount": state.sheet.subject_count(),
            }),
        ),
        Err(e) => sheet_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(handle_list(state, req)),
        "subjects.add" => Some(handle_add(state, req)),
        "subjects.update" => Some(handle_update(state, req)),
        "subjects.remove" => Some(handle_remove(state, req)),
        _ => None,
    }
}
