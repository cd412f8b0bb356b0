//! Deployment environment conventions
//!
//! Fixed constants the deployment tooling around App Service relies on:
//! the `.deployment` marker that turns on build-on-deploy in Kudu, the
//! recognized runtime stacks, and per-runtime globs that should be left
//! out of a deployment package.

use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the deployment marker file
pub const DEPLOYMENT_FILE_NAME: &str = ".deployment";

/// Content of the deployment marker file; enables remote build during
/// zip deployment
pub const DEPLOYMENT_FILE: &str = "[config]\nSCM_DO_BUILD_DURING_DEPLOYMENT=true";

/// Recognized runtime stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Runtime {
    Node,
    Php,
    Dotnetcore,
    Ruby,
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::Node => write!(f, "node"),
            Runtime::Php => write!(f, "php"),
            Runtime::Dotnetcore => write!(f, "dotnetcore"),
            Runtime::Ruby => write!(f, "ruby"),
        }
    }
}

impl Runtime {
    /// The `linuxFxVersion` value for a Linux site running this stack
    pub fn linux_fx_version(&self) -> &'static str {
        match self {
            Runtime::Node => "NODE|20-lts",
            Runtime::Php => "PHP|8.2",
            Runtime::Dotnetcore => "DOTNETCORE|8.0",
            Runtime::Ruby => "RUBY|2.7",
        }
    }

    /// Globs to exclude from a deployment package for this runtime.
    /// `None` means nothing beyond the user's own ignore configuration.
    pub fn ignored_deploy_globs(&self) -> Option<&'static [&'static str]> {
        match self {
            Runtime::Node => Some(&["node_modules{,/**}"]),
            _ => None,
        }
    }
}

/// Write the deployment marker file into `dir`, returning its path.
/// Overwrites an existing marker; the content is fixed.
pub fn write_deployment_marker(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(DEPLOYMENT_FILE_NAME);
    std::fs::write(&path, DEPLOYMENT_FILE)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_content_enables_remote_build() {
        assert_eq!(DEPLOYMENT_FILE_NAME, ".deployment");
        assert_eq!(
            DEPLOYMENT_FILE,
            "[config]\nSCM_DO_BUILD_DURING_DEPLOYMENT=true"
        );
    }

    #[test]
    fn node_excludes_node_modules() {
        assert_eq!(
            Runtime::Node.ignored_deploy_globs(),
            Some(&["node_modules{,/**}"][..])
        );
        assert_eq!(Runtime::Php.ignored_deploy_globs(), None);
        assert_eq!(Runtime::Ruby.ignored_deploy_globs(), None);
    }

    #[test]
    fn runtime_names_are_lowercase() {
        assert_eq!(Runtime::Node.to_string(), "node");
        assert_eq!(Runtime::Dotnetcore.to_string(), "dotnetcore");
    }

    #[test]
    fn writes_marker_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_deployment_marker(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), DEPLOYMENT_FILE);
    }
}
