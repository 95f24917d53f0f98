// src/main.rs
mod discovery;
mod extractors;
mod storage;
mod utils;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use extractors::SectionExtractor;
use storage::StorageManager;
use utils::error::ExtractError;
use utils::AppError;

/// Command Line Interface for extracting div.section content from HTML files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file(s) to be converted; glob style pattern matching is supported
    input_files: String,

    /// Output directory for the converted files
    #[arg(short, long, default_value = "./dehead_output/")]
    destination: String,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Initialize storage rooted at the destination directory
    let storage = StorageManager::new(&args.destination)?;

    // 4. Initialize the section extractor
    let extractor = SectionExtractor::new();

    // 5. Expand the input pattern into the list of HTML files
    let files = discovery::discover(&args.input_files)?;
    tracing::info!("Found {} input file(s) matching '{}'", files.len(), args.input_files);

    // 6. Convert each file
    let mut converted_count = 0;
    let mut skipped_count = 0;
    let mut failure_count = 0;

    for file in &files {
        tracing::info!("Reading file: {}", file.display());

        match process_file(&extractor, &storage, file) {
            Ok(Some(path)) => {
                tracing::debug!("Saved section content to: {}", path.display());
                converted_count += 1;
            }
            Ok(None) => {
                tracing::warn!("No 'section' found in file: {}", file.display());
                skipped_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to convert {}: {}", file.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!(
        "Processing finished. Converted: {}, no section: {}, failed: {}",
        converted_count,
        skipped_count,
        failure_count
    );

    if converted_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to convert any of {} input file(s)",
            files.len()
        )));
    }

    Ok(())
}

/// Converts a single HTML file, returning the destination path on success and
/// `None` when the document has no section div.
fn process_file(
    extractor: &SectionExtractor,
    storage: &StorageManager,
    file: &Path,
) -> Result<Option<PathBuf>, AppError> {
    let bytes = fs::read(file)?;
    let content = String::from_utf8(bytes).map_err(|e| ExtractError::Decode {
        path: file.to_path_buf(),
        source: e,
    })?;

    let section = match extractor.extract(&content) {
        Some(section) => section,
        None => return Ok(None),
    };
    if section.heading_removed {
        tracing::debug!("Removed page heading from {}", file.display());
    }

    let path = storage.save_fragment(file, &section.content_html)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIXTURE: &str = r#"
        <html>
          <body>
            <div class="section">
              <h1>Title</h1>
              <p>Body text</p>
            </div>
          </body>
        </html>
    "#;

    // Restores the working directory when dropped, so a failed assertion
    // cannot strand other tests in a deleted scratch directory.
    struct CwdGuard {
        original: PathBuf,
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.original);
        }
    }

    // The destination path mirrors each input path as spelled, so this test
    // runs against relative inputs from inside a scratch directory. It is the
    // only test that touches the working directory.
    #[test]
    fn test_end_to_end_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), FIXTURE).unwrap();
        fs::write(
            dir.path().join("second.html"),
            r#"<html><body><div class="section"><p>Second</p></div></body></html>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("empty.html"),
            "<html><body><p>No section here</p></body></html>",
        )
        .unwrap();

        let _restore = CwdGuard {
            original: std::env::current_dir().unwrap(),
        };
        std::env::set_current_dir(dir.path()).unwrap();

        let storage = StorageManager::new("out").unwrap();
        assert!(
            Path::new("out").is_dir(),
            "destination root must exist before any file is written"
        );

        let extractor = SectionExtractor::new();
        let files = discovery::discover("*.html").unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("empty.html"),
                PathBuf::from("index.html"),
                PathBuf::from("second.html"),
            ]
        );

        let results: Vec<Option<PathBuf>> = files
            .iter()
            .map(|file| process_file(&extractor, &storage, file).unwrap())
            .collect();

        assert_eq!(results[0], None, "empty.html has no section");
        assert_eq!(results[1], Some(Path::new("out").join("index.html")));
        assert_eq!(results[2], Some(Path::new("out").join("second.html")));

        let out = dir.path().join("out");
        let content = fs::read_to_string(out.join("index.html")).unwrap();
        assert_eq!(content, "<div class=\"section\">\n <p>\n  Body text\n </p>\n</div>");
        assert!(out.join("second.html").is_file());
        assert!(!out.join("empty.html").exists(), "skipped files leave no output");
    }

    #[test]
    fn test_process_file_without_section_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty.html");
        fs::write(&input, "<html><body><p>No section here</p></body></html>").unwrap();

        let extractor = SectionExtractor::new();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();

        let result = process_file(&extractor, &storage, &input).unwrap();

        assert!(result.is_none());
        let entries = fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(entries, 0, "skipped files must leave no output behind");
    }

    #[test]
    fn test_process_file_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.html");
        fs::write(&input, [0xff, 0xfe, 0x00, b'<']).unwrap();

        let extractor = SectionExtractor::new();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();

        let result = process_file(&extractor, &storage, &input);

        assert!(matches!(
            result,
            Err(AppError::Extraction(ExtractError::Decode { .. }))
        ));
    }

    #[test]
    fn test_process_file_reports_missing_input() {
        let dir = TempDir::new().unwrap();

        let extractor = SectionExtractor::new();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();

        let result = process_file(&extractor, &storage, &dir.path().join("absent.html"));

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
