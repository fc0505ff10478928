//! ロギングシステム
//!
//! `log` ファサードの出力先となる開発者向けロガーを提供する。
//! ライブラリ側は `log::debug!` などを呼ぶだけで、出力先はバイナリが決める。

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// ログレベル指定用の環境変数
pub const LOG_ENV: &str = "LINEFILE_LOG";

/// 設定されていれば常にDebugレベルにする環境変数
pub const DEBUG_ENV: &str = "LINEFILE_DEBUG";

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Off,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }

    /// 文字列からログレベルを解釈
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            "off" | "none" => Some(LogLevel::Off),
            _ => None,
        }
    }

    /// 環境変数の値からログレベルを決定
    ///
    /// `LINEFILE_DEBUG` が優先され、次に `LINEFILE_LOG`、どちらもなければ Warning。
    pub fn from_vars(debug: Option<&str>, level: Option<&str>) -> Self {
        if debug.is_some() {
            return LogLevel::Debug;
        }
        level.and_then(Self::parse).unwrap_or(LogLevel::Warning)
    }

    /// プロセス環境からログレベルを決定
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV).ok();
        let level = std::env::var(LOG_ENV).ok();
        Self::from_vars(debug.as_deref(), level.as_deref())
    }

    /// `log` クレートのフィルタに変換
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

/// ロガー
///
/// * 標準エラー出力へ1行ずつ出力
/// * 追記モードのファイル出力を任意で併用
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        self.level != LogLevel::Off && level >= self.level
    }

    fn write_line(&self, message: &str) {
        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }

    fn format_record(record: &Record) -> String {
        let level = LogLevel::from(record.level());
        format!("{}: {} ({})", level.tag(), record.args(), record.target())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.should_log(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_line(&Self::format_record(record));
        }
    }

    fn flush(&self) {}
}

/// ロガーをグローバルに登録
///
/// 2回目以降の呼び出しはエラーになる。
pub fn init(logger: Logger) -> Result<(), SetLoggerError> {
    let filter = logger.level().to_filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::TempDir;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().without_stderr();
        assert!(logger.should_log(LogLevel::Debug));
        assert!(logger.should_log(LogLevel::Error));

        let info_logger = Logger::for_development()
            .with_level(LogLevel::Info)
            .without_stderr();
        assert!(!info_logger.should_log(LogLevel::Debug));
        assert!(info_logger.should_log(LogLevel::Warning));

        let off = Logger::new(LogLevel::Off).without_stderr();
        assert!(!off.should_log(LogLevel::Error));
    }

    #[test]
    fn env_values_select_level() {
        assert_eq!(LogLevel::from_vars(None, None), LogLevel::Warning);
        assert_eq!(LogLevel::from_vars(None, Some("info")), LogLevel::Info);
        assert_eq!(LogLevel::from_vars(None, Some("bogus")), LogLevel::Warning);
        assert_eq!(LogLevel::from_vars(Some("1"), Some("error")), LogLevel::Debug);
        assert_eq!(LogLevel::parse(" WARN "), Some(LogLevel::Warning));
    }

    #[test]
    fn file_output_receives_records() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("linefile.log");
        let logger = Logger::new(LogLevel::Info)
            .without_stderr()
            .with_file_output(&log_path);

        logger.log(
            &Record::builder()
                .args(format_args!("rewrote 3 lines"))
                .level(log::Level::Info)
                .target("linefile::file::io")
                .build(),
        );
        // Debugはフィルタされる
        logger.log(
            &Record::builder()
                .args(format_args!("hidden"))
                .level(log::Level::Debug)
                .target("linefile::file::io")
                .build(),
        );

        let written = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(written, "INFO: rewrote 3 lines (linefile::file::io)\n");
    }
}
