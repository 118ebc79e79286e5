//! Operator facing output. Everything here goes to stdout; logs go to stderr.

use std::{io, io::Write, time::Duration};

use jsonapi_bootstrap_core::{
    Credentials, IdentityMaterial, Progress, ProgressReporter, Readiness, Space,
};
use secrecy::ExposeSecret;
use tracing::warn;

use crate::duration::format_duration;

/// Prints stage results as the bootstrap reaches them.
///
/// The identity of a create run is written as soon as the wallet exists, so
/// it survives a failure of any later call.
#[derive(Debug)]
pub struct StdoutReporter<W: Write> {
    out: W,
}

impl<W: Write> StdoutReporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ProgressReporter for StdoutReporter<W> {
    fn report(&mut self, progress: &Progress<'_>) {
        let written = write_progress(&mut self.out, progress).and_then(|()| self.out.flush());
        if let Err(error) = written {
            warn!(%error, "failed to write progress to stdout");
        }
    }
}

pub fn write_progress(out: &mut impl Write, progress: &Progress<'_>) -> io::Result<()> {
    match progress {
        Progress::WalletCreated(identity) => write_identity(out, identity),
        Progress::WalletRecovered => writeln!(out, "Wallet recovery completed."),
        Progress::AccountCreated { account_id } => writeln!(out, "Account created: {account_id}"),
        Progress::AccountSelected { account_id } => writeln!(out, "Account selected: {account_id}"),
        Progress::AccountStopped { .. }
        | Progress::SessionCreated
        | Progress::AppKeyIssued { .. } => Ok(()),
    }
}

/// Prints the freshly generated identity so the operator can keep it.
fn write_identity(out: &mut impl Write, identity: &IdentityMaterial) -> io::Result<()> {
    writeln!(out, "Wallet created.")?;
    if let Some(mnemonic) = identity.mnemonic() {
        writeln!(out, "Mnemonic: {}", mnemonic.expose_secret())?;
    }
    if let Some(account_key) = identity.account_key() {
        writeln!(out, "Account key (base64): {}", account_key.expose_secret())?;
    }
    Ok(())
}

pub fn write_ready(
    out: &mut impl Write,
    credentials: &Credentials,
    json_api_addr: &str,
) -> io::Result<()> {
    let bearer_key = credentials.bearer_key.expose_secret();
    writeln!(out, "----- JsonAPI is ready -----")?;
    writeln!(out, "Account ID: {}", credentials.account_id)?;
    writeln!(out, "JsonAPI listen address: http://{json_api_addr}")?;
    writeln!(out, "Bearer token (app key): {bearer_key}")?;
    writeln!(
        out,
        "Example: curl -H 'Authorization: Bearer {bearer_key}' http://{json_api_addr}/v1/spaces"
    )
}

/// Prints the outcome of the readiness stage.
///
/// When a restart happened the bearer key changed, so the new one is printed too.
pub fn write_readiness(
    out: &mut impl Write,
    readiness: &Readiness,
    credentials: &Credentials,
    wait: Duration,
) -> io::Result<()> {
    let wait = format_duration(wait);
    match readiness {
        Readiness::Skipped => Ok(()),
        Readiness::Ready { spaces, attempts } => {
            if *attempts > 1 {
                write_restarted(out, credentials, &wait)?;
            }
            write_spaces(out, spaces)
        }
        Readiness::NotReady { attempts, error } => {
            if *attempts > 1 {
                write_restarted(out, credentials, &wait)?;
                writeln!(out, "Spaces still empty after retry ({wait}): {error}")
            } else {
                writeln!(out, "Spaces not ready within {wait}: {error}")
            }
        }
    }
}

fn write_restarted(out: &mut impl Write, credentials: &Credentials, wait: &str) -> io::Result<()> {
    writeln!(out, "Spaces not ready within {wait}, account restarted once.")?;
    writeln!(
        out,
        "Bearer token (app key) after restart: {}",
        credentials.bearer_key.expose_secret()
    )
}

fn write_spaces(out: &mut impl Write, spaces: &[Space]) -> io::Result<()> {
    writeln!(out, "Spaces ({}):", spaces.len())?;
    for space in spaces {
        writeln!(out, "- {} ({})", space.name, space.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use jsonapi_bootstrap_core::{ReadinessError, SpacesError};
    use secrecy::SecretString;

    use super::*;

    fn credentials(bearer_key: &str) -> Credentials {
        Credentials {
            account_id: "acc1".to_string(),
            bearer_key: SecretString::from(bearer_key),
            session_token: SecretString::from("s1"),
        }
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_identity_block() {
        let identity = IdentityMaterial::new(Some("abc".to_string()), Some("k1".to_string()));
        assert_eq!(
            render(|out| write_identity(out, &identity)),
            "Wallet created.\nMnemonic: abc\nAccount key (base64): k1\n"
        );
    }

    #[test]
    fn test_stage_lines() {
        let rendered = render(|out| {
            write_progress(out, &Progress::WalletRecovered)?;
            write_progress(out, &Progress::AccountSelected { account_id: "acc1" })?;
            write_progress(out, &Progress::SessionCreated)?;
            write_progress(out, &Progress::AccountCreated { account_id: "acc2" })
        });
        assert_eq!(
            rendered,
            "Wallet recovery completed.\nAccount selected: acc1\nAccount created: acc2\n"
        );
    }

    #[test]
    fn test_reporter_writes_identity_immediately() {
        let identity = IdentityMaterial::new(Some("abc".to_string()), Some("k1".to_string()));
        let mut reporter = StdoutReporter::new(Vec::new());

        reporter.report(&Progress::WalletCreated(&identity));

        assert_eq!(
            String::from_utf8(reporter.out).unwrap(),
            "Wallet created.\nMnemonic: abc\nAccount key (base64): k1\n"
        );
    }

    #[test]
    fn test_ready_block() {
        let rendered = render(|out| write_ready(out, &credentials("bk1"), "127.0.0.1:31009"));
        assert_eq!(
            rendered,
            "----- JsonAPI is ready -----\n\
             Account ID: acc1\n\
             JsonAPI listen address: http://127.0.0.1:31009\n\
             Bearer token (app key): bk1\n\
             Example: curl -H 'Authorization: Bearer bk1' http://127.0.0.1:31009/v1/spaces\n"
        );
    }

    #[test]
    fn test_spaces_listing() {
        let readiness = Readiness::Ready {
            spaces: vec![
                Space {
                    id: "bafy1".to_string(),
                    name: "Personal".to_string(),
                },
                Space {
                    id: "bafy2".to_string(),
                    name: "Work".to_string(),
                },
            ],
            attempts: 1,
        };
        let rendered = render(|out| {
            write_readiness(out, &readiness, &credentials("bk1"), Duration::from_secs(120))
        });
        assert_eq!(rendered, "Spaces (2):\n- Personal (bafy1)\n- Work (bafy2)\n");
    }

    #[test]
    fn test_not_ready_after_restart() {
        let readiness = Readiness::NotReady {
            attempts: 2,
            error: ReadinessError::Exhausted {
                waited: Duration::from_secs(120),
                last_failure: SpacesError::Empty,
            },
        };
        let rendered = render(|out| {
            write_readiness(out, &readiness, &credentials("bk2"), Duration::from_secs(120))
        });
        assert!(rendered.starts_with("Spaces not ready within 2m, account restarted once.\n"));
        assert!(rendered.contains("Bearer token (app key) after restart: bk2\n"));
        assert!(rendered.contains("Spaces still empty after retry (2m): "));
    }

    #[test]
    fn test_skipped_prints_nothing() {
        let rendered = render(|out| {
            write_readiness(out, &Readiness::Skipped, &credentials("bk1"), Duration::ZERO)
        });
        assert!(rendered.is_empty());
    }
}
