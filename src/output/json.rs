//! JSON output formatting

use crate::engine::executor::{ExecutionResult, ResultData};
use serde_json::{json, Value};

pub fn format_json(result: &ExecutionResult) -> String {
    let mut data: Value = match &result.data {
        ResultData::Listing(warehouses) => json!({ "warehouses": warehouses }),
        ResultData::Warehouse(info) => serde_json::to_value(info).unwrap_or(json!(null)),
        ResultData::Explanation(s) => json!({ "explanation": s }),
    };

    if let (Some(message), Value::Object(map)) = (&result.message, &mut data) {
        map.insert("message".to_string(), json!(message));
    }

    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
