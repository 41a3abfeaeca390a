// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use std::{fs, path::Path};

/// Read a yaml file substituting `$VAR` and `${VAR}` from the environment.
/// A missing file yields an empty document so defaults apply.
pub fn load_yaml_with_env(file_path: &Path) -> Result<String> {
    let content = fs::read_to_string(file_path).unwrap_or_default();
    Ok(shellexpand::env(&content)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_env_substitution() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("donations.config.yaml");
        let mut file = File::create(&file_path)?;

        writeln!(
            file,
            "chain:\n  rpc_url: $CDON_TEST_RPC\nrelayer:\n  url: ${{CDON_TEST_RELAYER}}"
        )?;

        std::env::set_var("CDON_TEST_RPC", "https://rpc.sepolia.org");
        std::env::set_var("CDON_TEST_RELAYER", "https://relayer.testnet.zama.org");

        let processed = load_yaml_with_env(&file_path)?;

        assert!(processed.contains("https://rpc.sepolia.org"));
        assert!(processed.contains("https://relayer.testnet.zama.org"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let processed = load_yaml_with_env(&dir.path().join("nope.yaml"))?;
        assert!(processed.is_empty());
        Ok(())
    }
}
