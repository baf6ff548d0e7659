pub mod file_walker {
    use crate::errors::LoadError;
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    /// Extensions recognized as inventory documents.
    pub const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

    #[must_use]
    pub fn is_yaml(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| YAML_EXTENSIONS.contains(&e))
    }

    /// Discover YAML documents under `root`, sorted by file name within each directory.
    ///
    /// Directories (even ones named `*.yml`) and files with other extensions are skipped.
    ///
    /// # Errors
    /// Returns `LoadError::Walk` if `root` is missing or any entry cannot be read.
    pub fn yaml_files(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let mut out = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry =
                entry.map_err(|source| LoadError::Walk { path: root.to_path_buf(), source })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if is_yaml(entry.path()) {
                out.push(entry.into_path());
            } else {
                log::trace!("Skipping non-YAML file {}", entry.path().display());
            }
        }
        Ok(out)
    }
}

pub mod config {
    use crate::errors::KapigraphError;
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Name of the config file picked up from the working directory.
    pub const DEFAULT_CONFIG_FILE: &str = "kapigraph.toml";

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct DotConfig {
        pub font: Option<String>,
        pub splines: Option<String>, // "ortho" | "curved" | "polyline" | "spline"
        pub layout: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct SvgConfig {
        pub path: Option<PathBuf>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct Config {
        pub target: Option<String>,
        pub inventory: Option<PathBuf>,
        pub output: Option<PathBuf>,
        pub json: Option<PathBuf>,
        pub dot: Option<DotConfig>,
        pub svg: Option<SvgConfig>,
    }

    /// Load and parse the config at `path`.
    ///
    /// # Errors
    /// Returns `KapigraphError::Config` if the file cannot be read or is not valid TOML
    /// for this schema.
    pub fn load_config_at(path: &Path) -> Result<Config, KapigraphError> {
        let data = fs::read_to_string(path).map_err(|e| KapigraphError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str::<Config>(&data)
            .map_err(|e| KapigraphError::Config { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Load `kapigraph.toml` from `dir` if it exists.
    ///
    /// # Errors
    /// Returns `KapigraphError::Config` if the file exists but does not parse.
    pub fn load_config_near(dir: &Path) -> Result<Option<Config>, KapigraphError> {
        let p = dir.join(DEFAULT_CONFIG_FILE);
        if p.is_file() {
            load_config_at(&p).map(Some)
        } else {
            Ok(None)
        }
    }
}
