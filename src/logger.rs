use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI용 로거를 초기화한다. RUST_LOG가 있으면 그 값을 우선한다.
pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "ambulance_cost_simulator=debug,info"
    } else {
        "ambulance_cost_simulator=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 결과 표는 stdout으로 나가므로 로그는 stderr로 보낸다
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
