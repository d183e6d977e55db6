use simple_error::SimpleError;
use std::fmt::Display;

/// Log to stdout, spec from `RUST_LOG` or `info`. Later calls keep the first logger.
pub fn init_log() {
    let _lg = flexi_logger::Logger::try_with_env_or_str("info")
        .unwrap()
        .log_to_stdout()
        .start()
        .ok();
}

pub fn to_simple(e: impl Display) -> SimpleError {
    SimpleError::new(e.to_string())
}
