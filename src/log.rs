//! Logging setup of the `zklink_cli` binary.
pub use tracing as __tracing;

/// `tracing::warn!` with the source location attached as fields.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!(
            file = file!(),
            line = line!(),
            column = column!(),
            $($arg)*
        )
    };
}

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG`.
pub fn init() {
    tracing_subscriber::fmt::init();
}
