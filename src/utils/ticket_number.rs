use crate::error::{AppError, AppResult};

/// 彩票号码上限 (6 位数字)
pub const MAX_TICKET_NUMBER: u32 = 999_999;

/// 生成的号码至少补零到 4 位，例如 1 -> "0001"
pub fn format_ticket_number(n: u32) -> String {
    format!("{n:04}")
}

/// 计算下一批号码 (从当前最大号码之后开始连续编号)
///
/// `existing` 为该期次已有号码；非纯数字的号码不参与计算。
pub fn next_ticket_numbers<'a, I>(existing: I, count: u32) -> AppResult<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    if count == 0 {
        return Err(AppError::ValidationError(
            "Count must be at least 1".to_string(),
        ));
    }

    let start = existing
        .into_iter()
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1;

    let end = start
        .checked_add(count - 1)
        .filter(|end| *end <= MAX_TICKET_NUMBER)
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "Cannot generate {count} tickets: numbers would exceed {MAX_TICKET_NUMBER}"
            ))
        })?;

    Ok((start..=end).map(format_ticket_number).collect())
}
