// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option has a default, so running `img-mirror` with no arguments
// mirrors the default site into ./out/.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Doc comments (///) on fields become the --help text
// =============================================================================

use clap::Parser;

pub const DEFAULT_ROOT_URL: &str = "https://animu.date";
pub const DEFAULT_OUT_DIR: &str = "out/";

#[derive(Parser, Debug)]
#[command(
    name = "img-mirror",
    version = "0.1.0",
    about = "Crawl a website and mirror its <img> resources to disk",
    long_about = "img-mirror fetches a page, follows every <img src> on it and saves each image \
                  under the output directory using the same path it has on the site. \
                  Files that already exist are not downloaded again."
)]
pub struct Cli {
    /// Page to start crawling from
    #[arg(long, default_value = DEFAULT_ROOT_URL)]
    pub url: String,

    /// Directory the site's images are mirrored into
    ///
    /// Created (mode 0750) if it doesn't exist; its parent must exist.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: String,

    /// How deep to follow pages (default: 2)
    ///
    /// Depth 1 = only the starting page
    /// Depth 2 = starting page + the images it references
    /// Higher depths also search HTML pages reached through <img src>
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the crawl summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["img-mirror"]).unwrap();
        assert_eq!(cli.url, DEFAULT_ROOT_URL);
        assert_eq!(cli.out_dir, DEFAULT_OUT_DIR);
        assert_eq!(cli.max_depth, 2);
        assert_eq!(cli.timeout_secs, 30);
        assert!(!cli.json);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "img-mirror",
            "--url",
            "https://example.com",
            "--out-dir",
            "mirror",
            "--max-depth",
            "3",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.url, "https://example.com");
        assert_eq!(cli.out_dir, "mirror");
        assert_eq!(cli.max_depth, 3);
        assert!(cli.json);
    }
}
