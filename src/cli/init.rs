use std::path::{Path, PathBuf};

use car_rental::Config;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(about = "Write the default catalog to a file for editing")]
pub struct Init {
    /// Where to write the catalog
    #[arg(default_value = "catalog.toml")]
    path: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument(level = "debug")]
    pub fn run(self) -> anyhow::Result<()> {
        write_default_catalog(&self.path, self.force)?;

        println!("Wrote default catalog to {}", self.path.display());
        println!();
        println!("Next steps:");
        println!("  edit the [[cars]] entries, then run");
        println!("  rental --config {} shell", self.path.display());

        Ok(())
    }
}

fn write_default_catalog(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to create catalog: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_loadable_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.toml");

        write_default_catalog(&path, false).unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.toml");
        std::fs::write(&path, "keep me").unwrap();

        let error = write_default_catalog(&path, false).unwrap_err();
        assert!(error.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        write_default_catalog(&path, true).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
