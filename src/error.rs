//! エラーハンドリングシステム
//!
//! 行操作で発生するエラーを判別可能な型として定義する。
//! Display は従来のステータス文字列と一致させ、文字列比較に頼る呼び出し側とも互換を保つ。

use std::path::Path;
use thiserror::Error;

/// 行ファイル操作のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineFileError {
    /// 対象ファイルが存在しない
    #[error("File not found.")]
    NotFound { path: String },

    /// 単一行アクセスの行番号が範囲外
    #[error("Line number out of range.")]
    LineOutOfRange { line: usize, len: usize },

    /// 読み取り範囲が不正
    #[error("Invalid line range.")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// 挿入位置が不正
    #[error("Invalid line number.")]
    InvalidLineNumber { line: usize, len: usize },

    /// 置換範囲または置換内容の行数が不正
    #[error("Invalid line range or content size.")]
    RangeOrSizeMismatch {
        start: usize,
        end: usize,
        len: usize,
        content_len: usize,
    },

    /// その他のI/Oエラー
    #[error("{message}")]
    Io { message: String },
}

/// エラー種別（呼び出し側での分岐用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    OutOfRange,
    SizeMismatch,
    IoFailure,
}

impl LineFileError {
    /// パスからNotFoundエラーを作成
    pub fn not_found(path: &Path) -> Self {
        LineFileError::NotFound {
            path: path.display().to_string(),
        }
    }

    /// エラー種別を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineFileError::NotFound { .. } => ErrorKind::NotFound,
            LineFileError::LineOutOfRange { .. }
            | LineFileError::InvalidRange { .. }
            | LineFileError::InvalidLineNumber { .. } => ErrorKind::OutOfRange,
            LineFileError::RangeOrSizeMismatch {
                start, end, len, ..
            } => {
                // 範囲自体が正しければ行数の不一致
                if start < end && end <= len {
                    ErrorKind::SizeMismatch
                } else {
                    ErrorKind::OutOfRange
                }
            }
            LineFileError::Io { .. } => ErrorKind::IoFailure,
        }
    }

    /// 開発者向けの詳細説明（ログ出力用）
    pub fn detail(&self) -> String {
        match self {
            LineFileError::NotFound { path } => format!("file not found: {}", path),
            LineFileError::LineOutOfRange { line, len } => {
                format!("line {} out of range (file has {} lines)", line, len)
            }
            LineFileError::InvalidRange { start, end, len } => {
                format!("invalid range {}..{} (file has {} lines)", start, end, len)
            }
            LineFileError::InvalidLineNumber { line, len } => {
                format!("invalid insert position {} (file has {} lines)", line, len)
            }
            LineFileError::RangeOrSizeMismatch {
                start,
                end,
                len,
                content_len,
            } => format!(
                "cannot replace {}..{} with {} lines (file has {} lines)",
                start, end, content_len, len
            ),
            LineFileError::Io { message } => format!("io error: {}", message),
        }
    }
}

// std::io::Error から LineFileError への変換
impl From<std::io::Error> for LineFileError {
    fn from(error: std::io::Error) -> Self {
        LineFileError::Io {
            message: error.to_string(),
        }
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, LineFileError>;
