//! linefile - 行単位のテキストファイル操作
//!
//! ファイル全体の読み込み・変更・書き換えで行の読み書き・挿入・削除を行う

// コアモジュール
pub mod error;
pub mod logging;
pub mod status;

// データ層
pub mod file;

// コマンドライン
pub mod cli;

// 公開API
pub use error::{ErrorKind, LineFileError, Result};
pub use file::LineFileHandler;
pub use status::{Outcome, StatusExt};
