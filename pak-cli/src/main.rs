//! pak: web asset bundler
//!
//! Reads HTML, CSS, JavaScript, import map and manifest entries, follows the
//! references between them, inlines imported stylesheets and writes the
//! result.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use pak_cli::{BuildOptions, BuildReport, build};
use pak_common::warning::set_quiet;

/// pak: bundle web assets
#[derive(Parser, Debug)]
#[command(name = "pak")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Bundle a page and everything it references into ./dist
    pak build index.html

    # Bundle a site rooted at ./site into ./public without inlining CSS
    pak build --root site -o public --no-merge site/index.html site/app.webmanifest
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bundle entry files and the assets they reference
    Build {
        /// Entry files (HTML, CSS, JS, import maps, manifests)
        #[arg(value_name = "ENTRY", required = true)]
        entries: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        out: PathBuf,

        /// Directory asset URLs are rooted at (default: current directory)
        #[arg(long, default_value = "")]
        root: PathBuf,

        /// Keep imported stylesheets as separate files
        #[arg(long)]
        no_merge: bool,

        /// Print nothing but errors
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            entries,
            out,
            root,
            no_merge,
            quiet,
        } => {
            set_quiet(quiet);
            let options = BuildOptions {
                entries,
                out,
                root,
                merge: !no_merge,
            };
            let report = build(&options)?;
            if !quiet {
                print_report(&report, &options);
            }
        }
    }
    Ok(())
}

/// Print one line per written asset and a summary.
fn print_report(report: &BuildReport, options: &BuildOptions) {
    for asset in &report.written {
        println!(
            "  {:<40} {:>10} {}",
            asset.path,
            asset.kind.to_string().dimmed(),
            format_size(asset.size)
        );
    }
    let summary = format!(
        "{} assets written to {}, {} stylesheets merged, {} external references",
        report.written.len(),
        options.out.display(),
        report.merged,
        report.external
    );
    println!("{}", summary.green());
}

fn format_size(size: usize) -> String {
    if size < 1024 {
        format!("{size} B")
    } else {
        #[allow(clippy::cast_precision_loss)]
        let kib = size as f64 / 1024.0;
        format!("{kib:.1} KiB")
    }
}
