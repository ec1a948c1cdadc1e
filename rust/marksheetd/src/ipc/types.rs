use serde::Deserialize;

use crate::config::SheetDefaults;
use crate::sheet::Marksheet;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub defaults: SheetDefaults,
    pub sheet: Marksheet,
}

impl AppState {
    pub fn new(defaults: SheetDefaults) -> Self {
        let sheet = Marksheet::fresh(&defaults, &today());
        Self { defaults, sheet }
    }

    pub fn clear_sheet(&mut self) {
        self.sheet.clear(&self.defaults, &today());
    }
}

/// Local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
