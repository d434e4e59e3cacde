//! Human-readable output formatting

use crate::engine::executor::{ExecutionResult, ResultData, WarehouseInfo};

pub fn format_human(result: &ExecutionResult) -> String {
    let body = match &result.data {
        ResultData::Listing(warehouses) => format_listing(warehouses),
        ResultData::Warehouse(info) => format_warehouse(info),
        ResultData::Explanation(explanation) => explanation.clone(),
    };

    match result.message {
        Some(ref message) => format!("{}\n\n{}", message, body),
        None => body,
    }
}

fn format_listing(warehouses: &[WarehouseInfo]) -> String {
    let mut output = String::from("All Warehouses\n--------------\n");
    if warehouses.is_empty() {
        output.push_str("No warehouses yet");
        return output;
    }

    output.push_str(&format!(
        "{:<6} {:<24} {:>10} {:>10} {:>8}\n",
        "ID", "NAME", "BALANCE", "CAPACITY", "USAGE"
    ));
    output.push_str(&"-".repeat(62));
    output.push('\n');
    for info in warehouses {
        output.push_str(&format!(
            "{:<6} {:<24} {:>10.1} {:>10.1} {:>7.1}%\n",
            info.id,
            truncate(&info.name, 24),
            info.balance,
            info.capacity,
            info.usage_percent
        ));
    }
    output
}

fn format_warehouse(info: &WarehouseInfo) -> String {
    let title = format!("Warehouse: {}", info.name);
    format!(
        "{}\n\
         {}\n\
         ID:         {}\n\
         Balance:    {:.1}\n\
         Capacity:   {:.1}\n\
         Free space: {:.1}\n\
         Usage:      {:.1}% ({})\n\
         Created:    {}",
        title,
        "-".repeat(title.chars().count()),
        info.id,
        info.balance,
        info.capacity,
        info.free_space,
        info.usage_percent,
        info.level,
        info.created_at
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
