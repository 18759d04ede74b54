use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// True for file names like `Price_vendorA.csv`.
pub fn is_price_list(file_name: &str) -> bool {
    file_name.to_lowercase().contains("price") && file_name.ends_with(".csv")
}

/// Lists the price list files directly inside `dir`, sorted by file name.
pub fn discover_price_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !is_price_list(&file_name) {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}
