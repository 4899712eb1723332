use std::io::{self, BufRead, IsTerminal, Write};

pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// 詢問 y/N；非互動環境回傳 `None`
pub fn confirm(question: &str) -> Option<bool> {
    if !is_interactive() {
        return None;
    }

    eprint!("{} [y/N] ", question);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return Some(false);
    }
    Some(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// 等待操作者按 Enter，讓失敗訊息不會隨視窗關閉而消失
pub fn pause(message: &str) {
    if !is_interactive() {
        return;
    }

    eprint!("{}", message);
    let _ = io::stderr().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
