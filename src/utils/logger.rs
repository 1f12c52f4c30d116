use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 優先，否則依 verbose 決定預設等級
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("small_fx=debug,info")
        } else {
            EnvFilter::new("small_fx=info")
        }
    })
}

pub fn init_cli_logger(verbose: bool) {
    let result = tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    // 已經有全域 subscriber 時沿用現有的
    if let Err(e) = result {
        tracing::debug!("Logger already initialised: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_cli_logger(false);
        init_cli_logger(true);
    }
}
