pub mod event;
pub mod expense;
pub mod registration;
pub mod report;
pub mod user;

use shared::error::{AppError, AppResult};
use std::str::FromStr;

// 文字列で保存している列挙値をドメインの型に変換する
pub(crate) fn parse_column<T: FromStr>(column: &str, value: &str) -> AppResult<T> {
    value.parse::<T>().map_err(|_| {
        AppError::ConversionEntityError(format!("{column} に不正な値が保存されています: {value}"))
    })
}
