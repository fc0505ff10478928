//! 行分割と改行処理
//!
//! 読み込んだ行は元の終端文字を保持し、書き込む行は `\n` ひとつで終わるよう正規化する。

/// 行ごとの改行処理
pub struct LineProcessor;

impl LineProcessor {
    /// テキストを行に分割（各行は末尾の `\n` を保持）
    ///
    /// `\r` 単独は終端として扱わない。空文字列は0行。
    pub fn split(content: &str) -> Vec<String> {
        content.split_inclusive('\n').map(str::to_string).collect()
    }

    /// 行を連結してファイル内容に戻す
    pub fn join<S: AsRef<str>>(lines: &[S]) -> String {
        lines.iter().map(AsRef::as_ref).collect()
    }

    /// 末尾の `\n` をすべて除去
    pub fn strip_lf(line: &str) -> &str {
        line.trim_end_matches('\n')
    }

    /// 末尾の `\n` を除去した上で `\n` をひとつ付与
    pub fn ensure_single_lf(line: &str) -> String {
        let mut normalized = Self::strip_lf(line).to_string();
        normalized.push('\n');
        normalized
    }

    /// 読み込んだ行の終端（`\n` の連続と直前の `\r` ひとつ）を除去
    pub fn strip_terminator(line: &str) -> &str {
        let stripped = Self::strip_lf(line);
        stripped.strip_suffix('\r').unwrap_or(stripped)
    }

    /// 末尾に `\n` を付与（既存の改行は除去しない）
    pub fn with_lf(line: &str) -> String {
        let mut terminated = String::with_capacity(line.len() + 1);
        terminated.push_str(line);
        terminated.push('\n');
        terminated
    }

    /// 既存行の末尾に追記（CRLF行もLFで終わる）
    pub fn append_to(line: &str, extra: &str) -> String {
        let mut appended = Self::strip_terminator(line).to_string();
        appended.push_str(extra);
        appended.push('\n');
        appended
    }
}
