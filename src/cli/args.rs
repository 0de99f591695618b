//! CLI argument parsing using clap

use clap::Parser;

/// extbump CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "extbump")]
#[command(about = "Bump version codes of extensions that depend on changed shared libraries")]
#[command(version)]
pub struct Cli {
    /// Changed file paths; those under lib/<name>/ select the libraries to bump for
    pub paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_paths() {
        let cli = Cli::parse_from(["extbump"]);
        assert!(cli.paths.is_empty());
    }

    #[test]
    fn test_paths_in_order() {
        let cli = Cli::parse_from([
            "extbump",
            "lib/unpacker/src/Unpacker.kt",
            "README.md",
            "lib/cryptoaes/build.gradle.kts",
        ]);
        assert_eq!(
            cli.paths,
            vec![
                "lib/unpacker/src/Unpacker.kt",
                "README.md",
                "lib/cryptoaes/build.gradle.kts"
            ]
        );
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = Cli::try_parse_from(["extbump", "--dry-run"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_contains_about() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Bump version codes"));
    }

    #[test]
    fn test_version_flag() {
        // DisplayVersion surfaces as an error from try_parse
        let result = Cli::try_parse_from(["extbump", "--version"]);
        assert!(result.is_err());
    }
}
