use clap::Parser;
use remarq::generate::Generator;
use remarq::output;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "remarq")]
#[command(about = "Static site generator for markdown note collections")]
#[command(long_about = "\
Static site generator for markdown note collections

Mirrors a source directory into a target directory: every .md file is
rendered to a styled .html page through the template, every other file is
copied unchanged, and relative paths are preserved. The target directory is
rebuilt from scratch on every run.

Documents may open with a front-matter block; its title becomes the page
title (the file name is the fallback):

  ---
  title: My Note
  ---
  # Heading

Links between documents (relative, ../-relative, or absolute) pointing at
.md files are rewritten to their .html counterparts, so the generated site
is self-contained.

The template is any UTF-8 HTML file containing the {{TITLE}} and {{BODY}}
placeholders.")]
#[command(version = env!("REMARQ_VERSION"))]
struct Cli {
    /// Directory containing the source documents
    source_dir: PathBuf,

    /// Directory the site is written to (deleted and recreated each run)
    target_dir: PathBuf,

    /// HTML template with {{TITLE}} and {{BODY}} placeholders
    template_file: PathBuf,

    /// Print one line per processed file
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage problems exit 1; --help and --version exit 0
            let code = u8::from(err.use_stderr());
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let generator = match Generator::new(&cli.source_dir, &cli.target_dir, &cli.template_file) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(1);
        }
    };

    let result = if cli.verbose {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for progress in rx {
                output::print_file_progress(&progress);
            }
        });
        let result = generator.generate_with_progress(Some(tx));
        printer.join().unwrap();
        result
    } else {
        generator.generate()
    };

    match result {
        Ok(count) => {
            output::print_summary(count, &cli.source_dir, &cli.target_dir);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}
