use tracing_subscriber::EnvFilter;
#[cfg(target_os = "linux")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(target_os = "linux")]
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber.
///
/// The filter is taken from `env_key`, then `RUST_LOG`, then
/// `default_filter`. Under systemd the journald layer is preferred so log
/// fields land in the journal instead of duplicated stderr lines.
pub fn init_logging(
    default_filter: &str,
    env_key: &str,
    service_name: &str,
) {
    let env_filter = EnvFilter::try_from_env(env_key)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    #[cfg(target_os = "linux")]
    if under_systemd() {
        match tracing_journald::layer() {
            Ok(layer) => {
                tracing_subscriber::registry().with(env_filter).with(layer).init();
                return;
            }
            Err(err) => {
                eprintln!("{service_name}: journald unavailable, logging to stderr: {err}");
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    let _ = service_name;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[cfg(target_os = "linux")]
fn under_systemd() -> bool {
    std::env::var_os("JOURNAL_STREAM").is_some()
        || std::env::var_os("INVOCATION_ID").is_some()
}
