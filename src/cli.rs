//! コマンドライン処理
//!
//! `linefile [--verbose|--quiet] [--debug-log <file>] <path> <command> [args...]` を解釈して
//! `LineFileHandler` の操作に対応付ける。

use crate::error::LineFileError;
use crate::file::{LineFileHandler, LineProcessor};
use crate::logging::{LogLevel, Logger};
use crate::status::StatusExt;
use std::path::PathBuf;
use thiserror::Error;

/// 使い方
pub const USAGE: &str = "\
usage: linefile [--verbose|--quiet] [--debug-log <file>] <path> <command> [args...]

commands:
  cat                              print every line
  range <start> <end>              print lines [start, end)
  line <n>                         print line n (trimmed)
  write <text>...                  replace the file, one line per argument
  replace <start> <end> <text>...  replace lines [start, end)
  append <text>...                 append lines to the end of the file
  append-to <n> <extra>            append text to line n
  insert <n> <text>...             insert lines before line n
  insert-one <n> <text>            insert one line before line n
  clear                            empty the file
  delete <n>                       delete line n
  update <n> <text>                replace line n";

/// コマンドライン解釈エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("missing {what}")]
    Missing { what: &'static str },

    #[error("command not found: {command}")]
    CommandNotFound { command: String },

    #[error("invalid line number: {arg}")]
    InvalidNumber { arg: String },

    #[error("unexpected argument: {arg}")]
    UnexpectedArgument { arg: String },
}

/// 実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cat,
    Range { start: usize, end: usize },
    Line { n: usize },
    Write { lines: Vec<String> },
    Replace { start: usize, end: usize, lines: Vec<String> },
    Append { lines: Vec<String> },
    AppendTo { n: usize, extra: String },
    Insert { n: usize, lines: Vec<String> },
    InsertOne { n: usize, text: String },
    Clear,
    Delete { n: usize },
    Update { n: usize, text: String },
}

/// パスより前に置くオプション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Options {
    log_level: Option<LogLevel>,
    log_file: Option<PathBuf>,
    help: bool,
}

impl Options {
    /// 先頭のオプションを取り出し、残りの引数を返す
    ///
    /// 最初の非オプション引数（パス）以降はすべてテキストとして扱う。
    fn split(args: &[String]) -> Result<(Self, Vec<String>), CliError> {
        let mut options = Options::default();
        let mut rest = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if !rest.is_empty() {
                rest.push(arg.clone());
                continue;
            }
            match arg.as_str() {
                "--verbose" | "-v" => options.log_level = Some(LogLevel::Debug),
                "--quiet" | "-q" => options.log_level = Some(LogLevel::Off),
                "--help" | "-h" => options.help = true,
                "--debug-log" => {
                    let path = iter.next().ok_or(CliError::Missing {
                        what: "debug log path",
                    })?;
                    options.log_file = Some(expand_path(path));
                }
                _ => rest.push(arg.clone()),
            }
        }

        Ok((options, rest))
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// 解釈済みのコマンドライン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub log_level: Option<LogLevel>,
    /// 指定時はログをこのファイルにだけ出力
    pub log_file: Option<PathBuf>,
    pub path: PathBuf,
    pub command: Command,
}

impl Invocation {
    /// パスより前に `--help` / `-h` があるか
    pub fn help_requested(args: &[String]) -> bool {
        matches!(Options::split(args), Ok((options, _)) if options.help)
    }

    /// 引数列（プログラム名を除く）を解釈
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let (options, rest) = Options::split(args)?;

        let mut iter = rest.into_iter();
        let raw_path = iter.next().ok_or(CliError::Missing { what: "path" })?;
        let path = expand_path(&raw_path);
        let name = iter.next().ok_or(CliError::Missing { what: "command" })?;
        let args: Vec<String> = iter.collect();

        let command = Command::parse(&name, args)?;
        Ok(Self {
            log_level: options.log_level,
            log_file: options.log_file,
            path,
            command,
        })
    }

    /// ログレベルを決定（明示指定 > ログファイル指定時のDebug > 環境変数）
    pub fn effective_log_level(&self) -> LogLevel {
        match (self.log_level, &self.log_file) {
            (Some(level), _) => level,
            (None, Some(_)) => LogLevel::Debug,
            (None, None) => LogLevel::from_env(),
        }
    }

    /// コマンドラインに従ってロガーを構築
    pub fn logger(&self) -> Logger {
        let logger = Logger::new(self.effective_log_level());
        match &self.log_file {
            Some(path) => logger.with_file_output(path).without_stderr(),
            None => logger,
        }
    }
}

/// 各引数を1行として `\n` で終端
fn terminated(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| LineProcessor::with_lf(line)).collect()
}

/// 引数の取り出し
struct Args {
    inner: std::vec::IntoIter<String>,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self {
            inner: args.into_iter(),
        }
    }

    fn text(&mut self, what: &'static str) -> Result<String, CliError> {
        self.inner.next().ok_or(CliError::Missing { what })
    }

    fn number(&mut self, what: &'static str) -> Result<usize, CliError> {
        let arg = self.text(what)?;
        arg.parse().map_err(|_| CliError::InvalidNumber { arg })
    }

    fn remaining(self) -> Vec<String> {
        self.inner.collect()
    }

    fn finish(mut self) -> Result<(), CliError> {
        match self.inner.next() {
            Some(arg) => Err(CliError::UnexpectedArgument { arg }),
            None => Ok(()),
        }
    }
}

impl Command {
    /// コマンド名と引数から作成
    pub fn parse(name: &str, args: Vec<String>) -> Result<Self, CliError> {
        let mut args = Args::new(args);
        let command = match name {
            "cat" => Command::Cat,
            "range" => Command::Range {
                start: args.number("start")?,
                end: args.number("end")?,
            },
            "line" => Command::Line {
                n: args.number("line number")?,
            },
            "write" => return Ok(Command::Write { lines: args.remaining() }),
            "replace" => {
                let start = args.number("start")?;
                let end = args.number("end")?;
                return Ok(Command::Replace {
                    start,
                    end,
                    lines: args.remaining(),
                });
            }
            "append" => return Ok(Command::Append { lines: args.remaining() }),
            "append-to" => Command::AppendTo {
                n: args.number("line number")?,
                extra: args.text("text")?,
            },
            "insert" => {
                let n = args.number("line number")?;
                return Ok(Command::Insert {
                    n,
                    lines: args.remaining(),
                });
            }
            "insert-one" => Command::InsertOne {
                n: args.number("line number")?,
                text: args.text("text")?,
            },
            "clear" => Command::Clear,
            "delete" => Command::Delete {
                n: args.number("line number")?,
            },
            "update" => Command::Update {
                n: args.number("line number")?,
                text: args.text("text")?,
            },
            other => {
                return Err(CliError::CommandNotFound {
                    command: other.to_string(),
                })
            }
        };
        args.finish()?;
        Ok(command)
    }

    /// ハンドラ上で実行し、出力テキストを返す
    pub fn execute(&self, handler: &LineFileHandler) -> Result<String, LineFileError> {
        let outcome = match self {
            Command::Cat => {
                return handler.read_all().map(|lines| LineProcessor::join(&lines));
            }
            Command::Range { start, end } => return handler.read_partially(*start, *end),
            Command::Line { n } => {
                return handler.read_one(*n).map(|line| LineProcessor::with_lf(&line));
            }
            Command::Write { lines } => handler.write_all(&terminated(lines)),
            Command::Replace { start, end, lines } => handler.write_partially(*start, *end, lines),
            Command::Append { lines } => handler.append_all(&terminated(lines)),
            Command::AppendTo { n, extra } => handler.append_one(*n, extra),
            Command::Insert { n, lines } => handler.insert_all(*n, lines),
            Command::InsertOne { n, text } => handler.insert_one(*n, text),
            Command::Clear => handler.delete_all(),
            Command::Delete { n } => handler.delete_one(*n),
            Command::Update { n, text } => handler.update_one(*n, text),
        };
        outcome.map(|outcome| LineProcessor::with_lf(outcome.message()))
    }

    /// 従来のステータス文字列として実行結果を返す
    pub fn execute_status(&self, handler: &LineFileHandler) -> String {
        self.execute(handler).into_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_and_command() {
        let invocation =
            Invocation::parse(&args(&["--verbose", "notes.txt", "update", "2", "hello"])).unwrap();

        assert_eq!(invocation.log_level, Some(LogLevel::Debug));
        assert_eq!(invocation.path, PathBuf::from("notes.txt"));
        assert_eq!(
            invocation.command,
            Command::Update {
                n: 2,
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_flags_after_path_are_text() {
        let invocation = Invocation::parse(&args(&["notes.txt", "write", "--quiet"])).unwrap();

        assert_eq!(invocation.log_level, None);
        assert_eq!(
            invocation.command,
            Command::Write {
                lines: args(&["--quiet"])
            }
        );
    }

    #[test]
    fn test_help_only_before_path() {
        assert!(Invocation::help_requested(&args(&["--help"])));
        assert!(Invocation::help_requested(&args(&["-q", "-h", "notes.txt"])));

        // パス以降の -h は書き込むテキスト
        let text_args = args(&["notes.txt", "write", "-h"]);
        assert!(!Invocation::help_requested(&text_args));
        assert_eq!(
            Invocation::parse(&text_args).unwrap().command,
            Command::Write {
                lines: args(&["-h"])
            }
        );
    }

    #[test]
    fn test_debug_log_option() {
        let invocation =
            Invocation::parse(&args(&["--debug-log", "trace.log", "notes.txt", "cat"])).unwrap();

        assert_eq!(invocation.log_file, Some(PathBuf::from("trace.log")));
        assert_eq!(invocation.effective_log_level(), LogLevel::Debug);
        assert_eq!(invocation.logger().level(), LogLevel::Debug);

        let quiet = Invocation::parse(&args(&[
            "--debug-log",
            "trace.log",
            "--quiet",
            "notes.txt",
            "cat",
        ]))
        .unwrap();
        assert_eq!(quiet.effective_log_level(), LogLevel::Off);

        assert_eq!(
            Invocation::parse(&args(&["--debug-log"])).unwrap_err(),
            CliError::Missing {
                what: "debug log path"
            }
        );
    }

    #[test]
    fn test_debug_log_writes_to_file() {
        use log::Log;

        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("trace.log");
        let invocation = Invocation::parse(&[
            "--debug-log".to_string(),
            log_path.display().to_string(),
            "notes.txt".to_string(),
            "cat".to_string(),
        ])
        .unwrap();

        invocation.logger().log(
            &log::Record::builder()
                .args(format_args!("read 2 lines"))
                .level(log::Level::Debug)
                .target("linefile::file::io")
                .build(),
        );

        let written = fs::read_to_string(&log_path).unwrap();
        assert_eq!(written, "DEBUG: read 2 lines (linefile::file::io)\n");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Invocation::parse(&[]).unwrap_err(),
            CliError::Missing { what: "path" }
        );
        assert_eq!(
            Invocation::parse(&args(&["f.txt"])).unwrap_err(),
            CliError::Missing { what: "command" }
        );
        assert_eq!(
            Command::parse("frobnicate", vec![]).unwrap_err(),
            CliError::CommandNotFound {
                command: "frobnicate".to_string()
            }
        );
        assert_eq!(
            Command::parse("line", args(&["-1"])).unwrap_err(),
            CliError::InvalidNumber {
                arg: "-1".to_string()
            }
        );
        assert_eq!(
            Command::parse("delete", args(&["1", "2"])).unwrap_err(),
            CliError::UnexpectedArgument {
                arg: "2".to_string()
            }
        );
    }

    #[test]
    fn test_execute_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let handler = LineFileHandler::new(temp_dir.path().join("cli.txt"));

        let write = Command::parse("write", args(&["a", "b", "c"])).unwrap();
        assert_eq!(write.execute_status(&handler), "Content written successfully.\n");
        assert_eq!(fs::read_to_string(handler.path()).unwrap(), "a\nb\nc\n");

        let insert = Command::parse("insert", args(&["1", "x", "y"])).unwrap();
        assert_eq!(insert.execute_status(&handler), "Content inserted successfully.\n");

        let range = Command::parse("range", args(&["1", "3"])).unwrap();
        assert_eq!(range.execute(&handler).unwrap(), "x\ny\n");

        let line = Command::parse("line", args(&["4"])).unwrap();
        assert_eq!(line.execute(&handler).unwrap(), "c\n");
    }

    #[test]
    fn test_execute_reports_errors_as_status() {
        let temp_dir = TempDir::new().unwrap();
        let handler = LineFileHandler::new(temp_dir.path().join("missing.txt"));

        assert_eq!(Command::Cat.execute_status(&handler), "File not found.");
        assert_eq!(Command::Clear.execute_status(&handler), "File deleted successfully.\n");
        assert_eq!(
            Command::Delete { n: 0 }.execute_status(&handler),
            "Line number out of range."
        );
    }
}
