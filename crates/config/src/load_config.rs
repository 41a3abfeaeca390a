// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use path_clean::clean;
use std::path::{Path, PathBuf};

/// Nearest `filename` in `dir` or any of its ancestors
pub fn find_in_parent(dir: &Path, filename: &str) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(filename))
        .find(|candidate| candidate.exists())
}

/// Where to look for the config file.
///
/// An explicit path wins, relative to `cwd` when not absolute. Otherwise the
/// nearest `filename` above `cwd`, and finally `filename` in `default_dir`,
/// which may not exist.
#[derive(Debug, Clone)]
pub struct ConfigSearch {
    pub cwd: PathBuf,
    pub default_dir: PathBuf,
    pub filename: String,
    pub explicit: Option<PathBuf>,
}

impl ConfigSearch {
    pub fn resolve<F>(&self, find: F) -> PathBuf
    where
        F: Fn(&Path, &str) -> Option<PathBuf>,
    {
        match &self.explicit {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => clean(self.cwd.join(path)),
            None => find(&self.cwd, &self.filename)
                .unwrap_or_else(|| clean(self.default_dir.join(&self.filename))),
        }
    }
}
