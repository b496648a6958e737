use std::fs::{self, File};
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "info";

/// `<data_local_dir>/stellar-chat/stellar-chat.log`
pub fn log_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("stellar-chat").join("stellar-chat.log")
}

/// Route `log` output to a file; stdout belongs to the terminal UI.
///
/// `filter` (from the CLI or config) takes precedence over `RUST_LOG`. If the
/// log file cannot be created, logging stays disabled.
pub fn init(filter: Option<&str>) -> Option<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = File::create(&path).ok()?;

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_FILTER),
    );
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
        .ok()?;

    Some(path)
}
