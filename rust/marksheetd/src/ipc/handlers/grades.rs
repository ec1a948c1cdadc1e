use crate::calc::{self, SubjectScore, GRADE_BANDS, MAX_MARKS_PER_SUBJECT, PASSING_MARKS};
use crate::input::normalize_marks;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_scale(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "bands": GRADE_BANDS,
            "passingMarks": PASSING_MARKS,
            "maxMarksPerSubject": MAX_MARKS_PER_SUBJECT,
        }),
    )
}

fn parse_scores(req: &Request) -> Result<Vec<SubjectScore>, serde_json::Value> {
    let Some(items) = req.params.get("subjects").and_then(|v| v.as_array()) else {
        return Err(err(&req.id, "bad_params", "missing subjects array", None));
    };

    let mut scores = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            return Err(err(
                &req.id,
                "bad_params",
                "each subject must be an object",
                Some(json!({ "index": index })),
            ));
        };
        let name = match obj.get("name") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(v) => match v.as_str() {
                Some(s) => s.to_string(),
                None => {
                    return Err(err(
                        &req.id,
                        "bad_params",
                        "subject name must be a string",
                        Some(json!({ "index": index })),
                    ))
                }
            },
        };
        scores.push(SubjectScore::new(
            name,
            normalize_marks(obj.get("theory")),
            normalize_marks(obj.get("practical")),
        ));
    }
    Ok(scores)
}

/// Grades an ad-hoc subject list without touching the session.
fn handle_compute(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let scores = match parse_scores(req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let subjects: Vec<serde_json::Value> = scores
        .iter()
        .map(|s| {
            let band = s.band();
            json!({
                "name": s.name,
                "theoryMarks": s.theory_marks,
                "practicalMarks": s.practical_marks,
                "total": s.total(),
                "grade": band.label,
                "points": band.points,
            })
        })
        .collect();
    let overall = calc::compute_overall(&scores);

    ok(&req.id, json!({ "subjects": subjects, "overall": overall }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.scale" => Some(handle_scale(state, req)),
        "grades.compute" => Some(handle_compute(state, req)),
        _ => None,
    }
}
