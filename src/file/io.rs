//! ファイルI/O操作
//!
//! ファイル全体の読み込み・全書き換え・追記。ファイルハンドルは各関数内で閉じる。

use crate::error::{LineFileError, Result};
use crate::file::lines::LineProcessor;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// オープン時のエラーをNotFoundとその他に振り分け
fn map_open_error(path: &Path, error: io::Error) -> LineFileError {
    if error.kind() == io::ErrorKind::NotFound {
        LineFileError::not_found(path)
    } else {
        LineFileError::from(error)
    }
}

/// ファイル全体を行単位で読み込み
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| map_open_error(path, e))?;

    let mut content = String::new();
    file.read_to_string(&mut content)?;

    let lines = LineProcessor::split(&content);
    log::debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// 既存ファイルを行列で全書き換え（ファイルが無ければNotFound）
pub fn rewrite_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| map_open_error(path, e))?;

    write_joined(file, lines)?;
    log::debug!("rewrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// ファイルを内容で置き換え（無ければ作成）
pub fn write_lines<S: AsRef<str>>(path: &Path, content: &[S]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| map_open_error(path, e))?;

    write_joined(file, content)?;
    log::debug!("wrote {} items to {}", content.len(), path.display());
    Ok(())
}

/// ファイル末尾に内容を追記（無ければ作成）
pub fn append_lines<S: AsRef<str>>(path: &Path, content: &[S]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| map_open_error(path, e))?;

    write_joined(file, content)?;
    log::debug!("appended {} items to {}", content.len(), path.display());
    Ok(())
}

fn write_joined<S: AsRef<str>>(mut file: File, lines: &[S]) -> Result<()> {
    file.write_all(LineProcessor::join(lines).as_bytes())?;
    file.flush()?;
    Ok(())
}
