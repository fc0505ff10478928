//! 操作結果とステータス文字列
//!
//! 書き込み系操作の成功結果を表す。文字列だけで結果を受け取りたい呼び出し側向けに
//! 成功・失敗を従来のステータス文字列へ変換する拡張トレイトも提供する。

use crate::error::LineFileError;
use std::fmt;

/// 書き込み系操作の成功結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Appended,
    Inserted,
    FileDeleted,
    LineDeleted,
    Updated,
}

impl Outcome {
    /// 成功時のステータス文字列
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Written => "Content written successfully.",
            Outcome::Appended => "Content appended successfully.",
            Outcome::Inserted => "Content inserted successfully.",
            Outcome::FileDeleted => "File deleted successfully.",
            Outcome::LineDeleted => "Line deleted successfully.",
            Outcome::Updated => "Content updated successfully.",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 結果を単一のステータス文字列として扱うためのトレイト
pub trait StatusExt {
    /// 成功ならデータまたは成功メッセージ、失敗ならエラーメッセージ
    fn into_status(self) -> String;
}

impl<T: fmt::Display> StatusExt for Result<T, LineFileError> {
    fn into_status(self) -> String {
        match self {
            Ok(value) => value.to_string(),
            Err(error) => error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Written.to_string(), "Content written successfully.");
        assert_eq!(Outcome::FileDeleted.to_string(), "File deleted successfully.");
        assert_eq!(Outcome::LineDeleted.to_string(), "Line deleted successfully.");
    }

    #[test]
    fn test_into_status() {
        let ok: Result<Outcome, LineFileError> = Ok(Outcome::Inserted);
        assert_eq!(ok.into_status(), "Content inserted successfully.");

        let err: Result<Outcome, LineFileError> =
            Err(LineFileError::InvalidLineNumber { line: 9, len: 2 });
        assert_eq!(err.into_status(), "Invalid line number.");

        // 読み取り結果はそのまま
        let data: Result<String, LineFileError> = Ok("hello".to_string());
        assert_eq!(data.into_status(), "hello");
    }
}
