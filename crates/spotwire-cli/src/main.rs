use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use spotwire_client::proto::codec;
use spotwire_client::proto::messages::{ProtoOaExecutionEvent, ProtoOaSpotEvent};
use spotwire_client::proto::Payload;
use spotwire_client::{Config, Credentials, Session, TokenManager};
use spotwire_helpers::{logging, shutdown};

const REDIRECT_URI: &str = "http://localhost:8080/redirect";

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    logging::init_logging(
        "spotwire_cli=info,spotwire_client=info",
        "SPOTWIRE_LOG",
        "spotwire-cli",
    );

    let args = Cli::parse(std::env::args().skip(1))?;

    let credentials = Credentials::load(&args.credentials)
        .context("failed to load credentials")?;

    let tokens = TokenManager::new(
        credentials.client_id.clone(),
        credentials.secret.clone(),
        REDIRECT_URI,
        args.tokens.clone(),
    );
    let token = bootstrap_token(&tokens).await?;

    let session = Session::new(Config::for_host_kind(credentials.host));
    session.set_on_event(|envelope| print_event(envelope));
    session.set_on_disconnected(|reason| {
        warn!("disconnected: reason={reason}");
    });

    session.connect().await.context("failed to connect")?;
    session
        .app_auth(&credentials.client_id, &credentials.secret)
        .await
        .context("application auth failed")?;

    let accounts = session
        .account_list_by_access_token(&token.access_token)
        .await
        .context("account list failed")?;
    if accounts.is_empty() {
        bail!("access token grants no trading accounts");
    }
    for account in &accounts {
        info!(
            "account available: id={}, live={}",
            account.ctid_trader_account_id,
            account.is_live.unwrap_or(false)
        );
    }

    let account_id = args.account.unwrap_or_else(|| {
        accounts[0].ctid_trader_account_id as i64
    });
    session
        .account_auth(account_id, &token.access_token)
        .await
        .context("account auth failed")?;

    let symbols = session.symbols_list(false).await.context("symbols list failed")?;
    info!("symbols available: count={}", symbols.len());

    let watch: Vec<i64> = if args.symbols.is_empty() {
        symbols.iter().take(3).map(|symbol| symbol.symbol_id).collect()
    } else {
        args.symbols.clone()
    };
    for symbol in symbols.iter().filter(|symbol| watch.contains(&symbol.symbol_id)) {
        info!(
            "watching: symbol_id={}, name={}",
            symbol.symbol_id,
            symbol.symbol_name.as_deref().unwrap_or("-")
        );
    }

    session.subscribe_spots(&watch).await.context("spot subscription failed")?;
    info!("spot subscription active: symbols={watch:?}");

    let stop = CancellationToken::new();
    tokio::spawn(shutdown::listen_shutdown(stop.clone()));
    stop.cancelled().await;

    session.disconnect().await;
    Ok(())
}

/// Loads a persisted token (refreshing if stale) or runs the interactive
/// authorization-code flow.
async fn bootstrap_token(
    tokens: &TokenManager
) -> Result<spotwire_client::TokenSet> {
    if tokens.load().context("failed to read token file")?.is_some() {
        return tokens
            .ensure_valid()
            .await
            .context("token refresh failed");
    }

    println!("No token on file. Open this URL, authorize, and paste the code:");
    println!("{}", tokens.auth_url("trading"));
    print!("code> ");
    std::io::stdout().flush().ok();

    let mut code = String::new();
    std::io::stdin()
        .read_line(&mut code)
        .context("failed to read authorization code")?;
    let code = code.trim();
    if code.is_empty() {
        bail!("empty authorization code");
    }

    tokens.exchange_code(code).await.context("code exchange failed")
}

/// Prints the server pushes the demo cares about; everything else is left
/// to debug logging.
fn print_event(envelope: &spotwire_client::proto::messages::ProtoMessage) {
    if envelope.payload_type == ProtoOaSpotEvent::PAYLOAD_TYPE {
        if let Ok(event) = codec::extract::<ProtoOaSpotEvent>(envelope) {
            info!(
                "spot: symbol_id={}, bid={}, ask={}",
                event.symbol_id,
                format_price(event.bid),
                format_price(event.ask)
            );
        }
    } else if envelope.payload_type == ProtoOaExecutionEvent::PAYLOAD_TYPE {
        if let Ok(event) = codec::extract::<ProtoOaExecutionEvent>(envelope) {
            info!(
                "execution: type={}, order_id={}",
                event.execution_type,
                event.order.map(|order| order.order_id).unwrap_or(0)
            );
        }
    }
}

/// Spot prices arrive scaled by 1e5.
fn format_price(raw: Option<u64>) -> String {
    match raw {
        Some(raw) => format!("{:.5}", raw as f64 / 100_000.0),
        None => "-".to_string(),
    }
}

#[derive(Debug)]
struct Cli {
    credentials: PathBuf,
    tokens: PathBuf,
    account: Option<i64>,
    symbols: Vec<i64>,
}

impl Cli {
    fn parse<I>(mut args: I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut credentials = None;
        let mut tokens = PathBuf::from("tokens.json");
        let mut account = None;
        let mut symbols = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--credentials" => credentials = args.next().map(PathBuf::from),
                "--tokens" => {
                    if let Some(path) = args.next() {
                        tokens = PathBuf::from(path);
                    }
                }
                "--account" => {
                    let raw = args
                        .next()
                        .context("missing value for --account")?;
                    account = Some(
                        raw.parse::<i64>()
                            .context("--account must be an integer")?,
                    );
                }
                "--symbols" => {
                    let raw = args
                        .next()
                        .context("missing value for --symbols")?;
                    for part in raw.split(',').filter(|part| !part.is_empty()) {
                        symbols.push(
                            part.trim()
                                .parse::<i64>()
                                .context("--symbols must be comma-separated integers")?,
                        );
                    }
                }
                "-h" | "--help" => {
                    bail!(
                        "usage: spotwire-cli --credentials creds.json [--tokens tokens.json] [--account id] [--symbols 1,2,3]"
                    );
                }
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self {
            credentials: credentials
                .context("missing required argument --credentials")?,
            tokens,
            account,
            symbols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_success() {
        let args = [
            "--credentials",
            "creds.json",
            "--tokens",
            "t.json",
            "--account",
            "12345",
            "--symbols",
            "1,2,41",
        ]
        .map(str::to_string);

        let cli = Cli::parse(args.into_iter()).expect("parse");
        assert_eq!(cli.credentials, PathBuf::from("creds.json"));
        assert_eq!(cli.tokens, PathBuf::from("t.json"));
        assert_eq!(cli.account, Some(12345));
        assert_eq!(cli.symbols, vec![1, 2, 41]);
    }

    #[test]
    fn cli_parse_requires_credentials() {
        let err = Cli::parse(std::iter::empty()).expect_err("must fail");
        assert!(err.to_string().contains("--credentials"));
    }

    #[test]
    fn cli_parse_rejects_unknown_arguments() {
        let err = Cli::parse(["--nope".to_string()].into_iter())
            .expect_err("must fail");
        assert!(err.to_string().contains("unknown argument"));
    }
}
