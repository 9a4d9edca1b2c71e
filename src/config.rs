use crate::cli::Cli;
use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_OUTPUT_FOLDER};
use crate::context::filter::FilterConfig;
use crate::error::Result;
use crate::io::artifact::Destination;
use crate::output::ReportFormat;
use crate::tokenizer::Encoding;
use std::path::PathBuf;

/// What a run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Report one file, if its extension is supported.
    ScanFile(PathBuf),
    /// Report every supported file under a folder.
    ScanFolder(PathBuf),
    /// Combine every supported file under `root` and persist the result.
    Combine {
        root: PathBuf,
        destination: Destination,
    },
    /// Report one file regardless of extension.
    CountTokens(PathBuf),
}

impl Mode {
    /// Picks the mode from CLI flags. `--scan-filename` wins over a folder,
    /// a folder wins over `--calc-token`. `None` when nothing was asked for.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        if let Some(file) = &cli.scan_filename {
            return Some(Mode::ScanFile(file.clone()));
        }
        if let Some(root) = cli.scan_folder.as_ref().or(cli.folder_path.as_ref()) {
            if !cli.combine {
                return Some(Mode::ScanFolder(root.clone()));
            }
            let folder = cli
                .output_folder
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FOLDER));
            let destination = match &cli.output_filename {
                Some(name) => Destination::new(folder, name.clone()),
                None => Destination::timestamped(folder, &chrono::Local::now()),
            };
            return Some(Mode::Combine {
                root: root.clone(),
                destination,
            });
        }
        if cli.calc_token {
            return cli.file_path.clone().map(Mode::CountTokens);
        }
        None
    }
}

/// Immutable settings for one run, derived from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub filter: FilterConfig,
    pub encoding: Encoding,
    pub format: ReportFormat,
}

impl Config {
    /// Fails only if the encoding name is unknown.
    pub fn from_cli(
        cli: Cli,
        mode: Mode,
    ) -> Result<Self> {
        let extensions = if cli.supported_extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            cli.supported_extensions
        };
        Ok(Config {
            mode,
            filter: FilterConfig::new(extensions, cli.skip_foldername),
            encoding: cli.encoding.parse()?,
            format: if cli.json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("onefile").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn scan_filename_takes_precedence() {
        let cli = parse(&["--scan-filename", "a.py", "--scan-folder", "src", "--combine"]);
        assert_eq!(Mode::from_cli(&cli), Some(Mode::ScanFile(PathBuf::from("a.py"))));
    }

    #[test]
    fn folder_without_combine_is_a_scan() {
        let cli = parse(&["--folder-path", "src"]);
        assert_eq!(Mode::from_cli(&cli), Some(Mode::ScanFolder(PathBuf::from("src"))));
    }

    #[test]
    fn combine_uses_given_destination() {
        let cli = parse(&[
            "--combine",
            "--folder-path",
            "src",
            "--output-folder",
            "out",
            "--output-filename",
            "all.py",
        ]);
        let Some(Mode::Combine { root, destination }) = Mode::from_cli(&cli) else {
            panic!("expected combine mode");
        };
        assert_eq!(root, PathBuf::from("src"));
        assert_eq!(destination.path(), PathBuf::from("out/all.py"));
    }

    #[test]
    fn combine_defaults_to_timestamped_result_file() {
        let cli = parse(&["--combine", "--scan-folder", "src"]);
        let Some(Mode::Combine { destination, .. }) = Mode::from_cli(&cli) else {
            panic!("expected combine mode");
        };
        assert_eq!(destination.folder, PathBuf::from("result"));
        assert!(destination.file_name.ends_with("_onefile_result.py"));
        assert_eq!(destination.file_name.len(), "YYYYmmdd_HHMMSS_onefile_result.py".len());
    }

    #[test]
    fn no_mode_is_none() {
        assert_eq!(Mode::from_cli(&parse(&["--combine"])), None);
    }

    #[test]
    fn config_defaults_and_overrides() -> anyhow::Result<()> {
        let cli = parse(&["--calc-token", "--file-path", "x.txt"]);
        let mode = Mode::from_cli(&cli).unwrap();
        assert_eq!(mode, Mode::CountTokens(PathBuf::from("x.txt")));
        let config = Config::from_cli(cli, mode)?;
        assert_eq!(config.filter, FilterConfig::default());
        assert_eq!(config.encoding, Encoding::Cl100kBase);
        assert_eq!(config.format, ReportFormat::Text);

        let cli = parse(&[
            "--scan-folder",
            ".",
            "--supported-extensions",
            ".rs",
            ".toml",
            "--skip-foldername",
            "target",
            ".git",
            "--encoding",
            "o200k_base",
            "--json",
        ]);
        let mode = Mode::from_cli(&cli).unwrap();
        let config = Config::from_cli(cli, mode)?;
        assert_eq!(config.filter.extensions(), &[".rs".to_string(), ".toml".to_string()]);
        assert!(config.filter.excludes_dir("target"));
        assert!(config.filter.excludes_dir(".git"));
        assert_eq!(config.encoding, Encoding::O200kBase);
        assert_eq!(config.format, ReportFormat::Json);
        Ok(())
    }

    #[test]
    fn unknown_encoding_fails() {
        let cli = parse(&["--scan-folder", ".", "--encoding", "nope"]);
        let mode = Mode::from_cli(&cli).unwrap();
        assert!(Config::from_cli(cli, mode).unwrap_err().is_tokenization());
    }
}
