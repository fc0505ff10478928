//! 行ファイル操作コア機能
//!
//! 各操作は「ファイル全体を読む → メモリ上の行列を変更 → ファイル全体を書き直す」の
//! 1回で完結する。範囲検証は必ず変更より先に行い、失敗時はファイルに触れない。

use crate::error::{LineFileError, Result};
use crate::file::io;
use crate::file::lines::LineProcessor;
use crate::status::Outcome;
use std::path::{Path, PathBuf};

/// 行単位のファイル操作
///
/// パス以外の状態を持たず、呼び出しごとにファイルを読み直す。
/// ロックは行わないため、同じパスに対する並行呼び出しでは後勝ちで更新が失われうる。
///
/// # Examples
/// ```
/// use linefile::LineFileHandler;
///
/// let dir = tempfile::tempdir().unwrap();
/// let handler = LineFileHandler::new(dir.path().join("notes.txt"));
/// handler.write_all(&["a\n", "b\n"]).unwrap();
/// handler.update_one(1, "B").unwrap();
/// assert_eq!(handler.read_one(1).unwrap(), "B");
/// ```
#[derive(Debug, Clone)]
pub struct LineFileHandler {
    path: PathBuf,
}

impl LineFileHandler {
    /// ハンドラを作成（ファイルの存在は確認しない）
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// 対象ファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全行を取得（各行は元の改行を保持）
    pub fn read_all(&self) -> Result<Vec<String>> {
        io::read_lines(&self.path)
    }

    /// 行範囲 [start, end) を連結して取得
    pub fn read_partially(&self, start: usize, end: usize) -> Result<String> {
        let lines = self.read_all()?;
        if start >= end || end > lines.len() {
            return Err(self.rejected(LineFileError::InvalidRange {
                start,
                end,
                len: lines.len(),
            }));
        }
        Ok(LineProcessor::join(&lines[start..end]))
    }

    /// n行目を前後の空白を除いて取得
    pub fn read_one(&self, n: usize) -> Result<String> {
        let lines = self.read_all()?;
        let line = lines.get(n).ok_or_else(|| {
            self.rejected(LineFileError::LineOutOfRange {
                line: n,
                len: lines.len(),
            })
        })?;
        Ok(line.trim().to_string())
    }

    /// ファイルを内容で置き換え（各要素はそのまま書き込む）
    pub fn write_all<S: AsRef<str>>(&self, content: &[S]) -> Result<Outcome> {
        io::write_lines(&self.path, content)?;
        Ok(Outcome::Written)
    }

    /// 行範囲 [start, end) を同じ行数の内容で置き換え
    pub fn write_partially<S: AsRef<str>>(
        &self,
        start: usize,
        end: usize,
        new_content: &[S],
    ) -> Result<Outcome> {
        let mut lines = self.read_all()?;
        if start >= end || end > lines.len() || new_content.len() != end - start {
            return Err(self.rejected(LineFileError::RangeOrSizeMismatch {
                start,
                end,
                len: lines.len(),
                content_len: new_content.len(),
            }));
        }

        for (slot, line) in lines[start..end].iter_mut().zip(new_content) {
            *slot = LineProcessor::ensure_single_lf(line.as_ref());
        }
        io::rewrite_lines(&self.path, &lines)?;
        Ok(Outcome::Written)
    }

    /// ファイル末尾に内容をそのまま追記
    pub fn append_all<S: AsRef<str>>(&self, content: &[S]) -> Result<Outcome> {
        io::append_lines(&self.path, content)?;
        Ok(Outcome::Appended)
    }

    /// n行目の末尾にテキストを追記
    pub fn append_one(&self, n: usize, extra: &str) -> Result<Outcome> {
        let mut lines = self.read_all()?;
        let len = lines.len();
        let line = lines
            .get_mut(n)
            .ok_or_else(|| self.rejected(LineFileError::LineOutOfRange { line: n, len }))?;

        *line = LineProcessor::append_to(line, extra);
        io::rewrite_lines(&self.path, &lines)?;
        Ok(Outcome::Appended)
    }

    /// n行目の前に複数行を挿入
    pub fn insert_all<S: AsRef<str>>(&self, n: usize, content: &[S]) -> Result<Outcome> {
        let mut lines = self.read_all()?;
        self.check_insert_position(n, lines.len())?;

        let new_lines = content
            .iter()
            .map(|line| LineProcessor::ensure_single_lf(line.as_ref()));
        lines.splice(n..n, new_lines);
        io::rewrite_lines(&self.path, &lines)?;
        Ok(Outcome::Inserted)
    }

    /// n行目の前に1行を挿入
    pub fn insert_one(&self, n: usize, line: &str) -> Result<Outcome> {
        let mut lines = self.read_all()?;
        self.check_insert_position(n, lines.len())?;

        lines.insert(n, LineProcessor::with_lf(line));
        io::rewrite_lines(&self.path, &lines)?;
        Ok(Outcome::Inserted)
    }

    /// ファイルを空にする
    pub fn delete_all(&self) -> Result<Outcome> {
        io::write_lines::<&str>(&self.path, &[])?;
        Ok(Outcome::FileDeleted)
    }

    /// n行目を削除
    pub fn delete_one(&self, n: usize) -> Result<Outcome> {
        let mut lines = self.read_all()?;
        self.check_line(n, lines.len())?;

        lines.remove(n);
        io::rewrite_lines(&self.path, &lines)?;
        Ok(Outcome::LineDeleted)
    }

    /// ファイルを内容で置き換え（write_allと同じ動作）
    pub fn update_all<S: AsRef<str>>(&self, content: &[S]) -> Result<Outcome> {
        io::write_lines(&self.path, content)?;
        Ok(Outcome::Updated)
    }

    /// n行目を置き換え
    pub fn update_one(&self, n: usize, content: &str) -> Result<Outcome> {
        let mut lines = self.read_all()?;
        self.check_line(n, lines.len())?;

        lines[n] = LineProcessor::with_lf(content);
        io::rewrite_lines(&self.path, &lines)?;
        Ok(Outcome::Updated)
    }

    fn check_line(&self, n: usize, len: usize) -> Result<()> {
        if n >= len {
            return Err(self.rejected(LineFileError::LineOutOfRange { line: n, len }));
        }
        Ok(())
    }

    fn check_insert_position(&self, n: usize, len: usize) -> Result<()> {
        if n > len {
            return Err(self.rejected(LineFileError::InvalidLineNumber { line: n, len }));
        }
        Ok(())
    }

    /// 検証エラーをログに残して返す
    fn rejected(&self, error: LineFileError) -> LineFileError {
        log::warn!("{}: {}", self.path.display(), error.detail());
        error
    }
}
