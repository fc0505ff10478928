//! ファイル操作モジュール
//!
//! 行単位のファイル操作：
//! - 呼び出しごとにファイル全体を読み直す（キャッシュなし）
//! - 書き込みはファイル全体の書き換え
//! - ロックなし（同一パスへの並行書き込みは後勝ち）

pub mod handler;
pub mod io;
pub mod lines;

pub use handler::LineFileHandler;
pub use io::{append_lines, read_lines, rewrite_lines, write_lines};
pub use lines::LineProcessor;
