use anyhow::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::burn_action::BurnOutcome;
use crate::config::TonNetwork;

const OPERATION_LOG_FILE: &str = "operation_log.txt";

fn log_path() -> PathBuf {
    crate::user_settings::app_data_dir().join(OPERATION_LOG_FILE)
}

/// Full path to the operation log file, for display
pub fn log_file_path() -> String {
    log_path().display().to_string()
}

/// Describe a finished burn for the operation log.
pub fn describe_outcome(outcome: &BurnOutcome) -> String {
    let request = outcome.request();
    let status = match outcome {
        BurnOutcome::Burned(_) => "OK".to_string(),
        BurnOutcome::Failed { error, .. } => match error.message() {
            Some(message) => format!("FAILED: {}", message),
            None => "ABORTED".to_string(),
        },
    };
    format!(
        "Burn {} {} ({} base units)\nJetton wallet: {}\nStatus: {}",
        request.display_amount(),
        request.symbol,
        request.amount,
        request.jetton_address,
        status
    )
}

/// Append a structured log entry describing a user-requested operation.
pub fn append_log(operation: &str, network: TonNetwork, details: impl AsRef<str>) -> Result<()> {
    append_log_to(&log_path(), operation, network, details.as_ref())
}

fn append_log_to(path: &Path, operation: &str, network: TonNetwork, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let timestamp = Utc::now().to_rfc3339();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    writeln!(
        file,
        "[{}] network={} operation={}",
        timestamp,
        network.info().label,
        operation
    )?;

    if body.trim().is_empty() {
        writeln!(file, "  (no additional details)")?;
    } else {
        for line in body.lines() {
            if line.trim().is_empty() {
                writeln!(file)?;
            } else {
                writeln!(file, "  {}", line)?;
            }
        }
    }

    writeln!(file)?;
    Ok(())
}

/// Read the entire log file content
pub fn read_log() -> Result<String> {
    read_log_from(&log_path())
}

fn read_log_from(path: &Path) -> Result<String> {
    if path.exists() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::TonAddress;
    use crate::burn_action::BurnRequest;
    use crate::errors::BurnError;
    use ethers::types::U256;

    fn request() -> BurnRequest {
        BurnRequest {
            amount: U256::from(12_500u64),
            jetton_address: TonAddress::new(0, [0x33; 32]),
            symbol: "JET".to_string(),
            decimals: 2,
        }
    }

    #[test]
    fn test_describe_success() {
        let text = describe_outcome(&BurnOutcome::Burned(request()));
        assert!(text.starts_with("Burn 125 JET (12500 base units)"));
        assert!(text.ends_with("Status: OK"));
    }

    #[test]
    fn test_describe_failures() {
        let failed = BurnOutcome::Failed { request: request(), error: BurnError::failed("Locked") };
        assert!(describe_outcome(&failed).ends_with("Status: FAILED: Locked"));
        let aborted = BurnOutcome::Failed { request: request(), error: BurnError::Aborted };
        assert!(describe_outcome(&aborted).ends_with("Status: ABORTED"));
    }

    #[test]
    fn test_append_log_to_writes_indented_entry() {
        let path = std::env::temp_dir()
            .join(format!("jetton-burner-test-{}", std::process::id()))
            .join("operation_log.txt");
        let _ = fs::remove_file(&path);

        append_log_to(&path, "Jetton Burn", TonNetwork::Testnet, "line one\n\nline two").unwrap();
        append_log_to(&path, "Jetton Burn", TonNetwork::Mainnet, "").unwrap();

        let content = read_log_from(&path).unwrap();
        assert!(content.contains("network=TON Testnet operation=Jetton Burn"));
        assert!(content.contains("  line one\n\n  line two\n"));
        assert!(content.contains("network=TON Mainnet"));
        assert!(content.contains("  (no additional details)"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_log_from_missing_file_is_empty() {
        let path = std::env::temp_dir()
            .join(format!("jetton-burner-missing-{}", std::process::id()))
            .join("operation_log.txt");
        assert_eq!(read_log_from(&path).unwrap(), "");
    }
}
