/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the crate's level
/// from `warn` to `info` to `debug`. Logs go to stderr so tables on stdout
/// stay clean.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("video_format_downloader={}", level).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
