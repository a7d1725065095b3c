use std::future::Future;
use std::time::Duration;

use lanlight::session::CommunicatorConfig;
use lanlight::{CancellationToken, Light, LightFactory};
use tracing::debug;

use crate::cmd::{DeviceArgs, TransitionArgs};
use crate::exit::{light_error, CliError, CliResult, INTERNAL};

/// Run one device command on a fresh runtime. Ctrl-C cancels `cancel`.
pub fn block_on<F, Fut, T>(f: F) -> CliResult<T>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = CliResult<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| CliError::new(INTERNAL, format!("runtime setup failed: {err}")))?;

    let cancel = CancellationToken::new();
    install_ctrlc_handler(cancel.clone())?;

    runtime.block_on(f(cancel))
}

fn install_ctrlc_handler(cancel: CancellationToken) -> CliResult<()> {
    ctrlc::set_handler(move || {
        debug!("interrupt received");
        cancel.cancel();
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}

/// Connect and probe the light named by `args`.
pub async fn connect(args: &DeviceArgs, cancel: &CancellationToken) -> CliResult<Light> {
    let config = CommunicatorConfig {
        response_expiry: parse_timeout(&args.timeout)?,
        ..CommunicatorConfig::default()
    };
    LightFactory::new()
        .with_port(args.port)
        .with_config(config)
        .connect(args.ip, cancel)
        .await
        .map_err(|err| light_error("connect failed", err))
}

pub fn transition(args: &TransitionArgs) -> CliResult<Duration> {
    parse_duration(&args.duration)
}

/// A non-zero duration.
pub fn parse_timeout(input: &str) -> CliResult<Duration> {
    let timeout = parse_duration(input)?;
    if timeout.is_zero() {
        return Err(CliError::usage("timeout must be greater than zero"));
    }
    Ok(timeout)
}

/// `5s`, `500ms`, or a bare number of seconds.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::usage("duration must not be empty"));
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::usage(format!("invalid duration value: {input}")))?;

    if millis {
        Ok(Duration::from_millis(value))
    } else {
        Ok(Duration::from_secs(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::USAGE;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("0ms").unwrap(), Duration::ZERO);
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("1.5s").is_err());
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(parse_timeout("500ms").unwrap(), Duration::from_millis(500));
        let err = parse_timeout("0s").unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
