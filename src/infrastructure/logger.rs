//! 日志基础设施

use std::io;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时同时写入按日期分割的文件，
    /// 返回的 guard 需要在进程结束前一直持有。
    pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
        let filter =
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

        let console = fmt::layer().with_writer(io::stdout).with_ansi(true);

        match &config.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let (writer, guard) =
                    tracing_appender::non_blocking(rolling::daily(dir, &config.file_prefix));
                tracing_subscriber::registry()
                    .with(filter)
                    .with(console)
                    .with(
                        fmt::layer()
                            .with_writer(writer)
                            .with_ansi(false)
                            .with_target(false),
                    )
                    .try_init()?;
                Ok(Some(guard))
            }
            None => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(console)
                    .try_init()?;
                Ok(None)
            }
        }
    }
}
