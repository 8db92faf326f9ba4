use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

/// Environment variable overriding the default log level
pub const LOG_ENV_VAR: &str = "SKETCHPAD_LOG";

/// Level used when `SKETCHPAD_LOG` is unset
pub fn default_level(debug: bool) -> &'static str {
    if debug {
        "sketchpad=debug,warn"
    } else {
        "warn"
    }
}

/// Custom logger initialization to exclude timestamps but keep colors.
///
/// Use SKETCHPAD_LOG=info or SKETCHPAD_LOG=debug to increase verbosity,
/// `--debug` does the same for this crate only.
/// Example: SKETCHPAD_LOG=info cargo run
pub fn init_custom_logger(debug: bool) {
    // Empty time formatter that doesn't print anything
    struct EmptyTime;
    impl FormatTime for EmptyTime {
        fn format_time(
            &self,
            _: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            Ok(())
        }
    }

    let level = std::env::var(LOG_ENV_VAR)
        .unwrap_or_else(|_| default_level(debug).to_string());

    let format = format()
        .with_timer(EmptyTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(true);

    let mut filter = tracing_subscriber::filter::EnvFilter::builder()
        .parse_lossy(&level);
    // Suppress very noisy render layer messages completely
    for directive in ["wgpu_core=error", "wgpu_hal=error", "bevy_render=error"] {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_filter(filter),
        )
        .try_init();
    if installed.is_err() {
        eprintln!("A global logger is already installed, keeping it");
    }
}
