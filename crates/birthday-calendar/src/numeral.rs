//! 農暦の月・日表記（漢数字）を数値に変換する。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNumeralError {
    #[error("Empty numeral")]
    Empty,

    #[error("Unrecognized numeral: {0}")]
    Unrecognized(String),
}

/// 農暦の月・日表記を数値に変換する。
///
/// `"十六"`、`"廿二"`、`"腊月"`、`"初八日"` のような漢数字表記のほか、
/// `"16"` のような算用数字もそのまま受け付ける。
/// 単位文字（月・日・号）は取り除いてから解釈する。
pub fn parse_lunar_number(text: &str) -> Result<u32, ParseNumeralError> {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '月' | '日' | '号'))
        .collect();
    let pure = stripped.trim();

    if pure.is_empty() {
        return Err(ParseNumeralError::Empty);
    }

    if pure.chars().all(|c| c.is_ascii_digit()) {
        return pure
            .parse()
            .map_err(|_| ParseNumeralError::Unrecognized(pure.to_string()));
    }

    let chars: Vec<char> = pure.chars().collect();
    let value = match chars.as_slice() {
        ['初', d] => digit(*d),
        ['十'] => Some(10),
        ['廿'] => Some(20),
        ['卅'] => Some(30),
        ['廿', d] => ones(*d).map(|v| 20 + v),
        ['卅', d] => ones(*d).map(|v| 30 + v),
        ['十', d] => ones(*d).map(|v| 10 + v),
        [t, '十'] => ones(*t).map(|v| v * 10),
        [t, '十', d] => ones(*t).zip(ones(*d)).map(|(t, d)| t * 10 + d),
        [c] => month_alias(*c).or_else(|| ones(*c)),
        _ => None,
    };

    value.ok_or_else(|| ParseNumeralError::Unrecognized(pure.to_string()))
}

/// 一〜九を 1〜9 に変換する。
fn ones(c: char) -> Option<u32> {
    match c {
        '一' => Some(1),
        '二' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        '七' => Some(7),
        '八' => Some(8),
        '九' => Some(9),
        _ => None,
    }
}

/// 一〜十を 1〜10 に変換する（初一〜初十用）。
fn digit(c: char) -> Option<u32> {
    if c == '十' { Some(10) } else { ones(c) }
}

/// 月の別名（正月・冬月・腊月）。
fn month_alias(c: char) -> Option<u32> {
    match c {
        '正' => Some(1),
        '冬' => Some(11),
        '腊' | '臘' => Some(12),
        _ => None,
    }
}
