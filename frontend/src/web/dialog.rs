//! 原生对话框封装模块
//!
//! 破坏性操作前的阻断式确认与简单文本输入。

/// 阻断式确认框，window 不可用时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

/// 文本输入框，取消或空输入返回 `None`
pub fn prompt(message: &str, default: &str) -> Option<String> {
    let input = web_sys::window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()?;
    let trimmed = input.trim().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
