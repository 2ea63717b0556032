use flowtag_core::config::FlowtagConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path of a file under `integration-tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// A scratch directory holding the inputs and output of one run.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn copy_fixture(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::copy(fixture(name), &path).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    /// Default config pointed at `lookup`, `flow_log` and `output.txt` in this workspace.
    pub fn config(&self, lookup: &Path, flow_log: &Path) -> FlowtagConfig {
        let mut cfg = FlowtagConfig::default();
        cfg.input.lookup = lookup.to_path_buf();
        cfg.input.flow_log = flow_log.to_path_buf();
        cfg.output.path = self.dir.path().join("output.txt");
        cfg
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
