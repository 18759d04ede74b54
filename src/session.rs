// Interactive session: reads queries, prints results and offers an HTML export.

use crate::analyzer::{search, summarize};
use crate::catalog::Loader;
use crate::config::AppConfig;
use crate::model::CatalogLoadResult;
use crate::report::{console, html};
use chrono::Local;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Holds the active catalog between queries. Reloading swaps it for a fresh value.
pub struct Session<L: Loader> {
    config: AppConfig,
    loader: L,
    catalog: CatalogLoadResult,
}

impl<L: Loader> Session<L> {
    /// Creates a session and performs the initial load.
    pub fn new(config: AppConfig, loader: L) -> Self {
        let catalog = loader.load(&config.price_dir);
        Self {
            config,
            loader,
            catalog,
        }
    }

    pub fn catalog(&self) -> &CatalogLoadResult {
        &self.catalog
    }

    pub fn reload(&mut self) {
        info!("Reloading catalog from {}", self.config.price_dir.display());
        self.catalog = self.loader.load(&self.config.price_dir);
    }

    /// Prints the file-level errors of the last load.
    pub fn report_file_errors<W: Write>(&self, output: &mut W) -> io::Result<()> {
        for e in &self.catalog.file_errors {
            writeln!(output, "Error processing file {}: {}", e.file, e.error)?;
        }
        Ok(())
    }

    /// Runs the query loop until the exit keyword or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        loop {
            write!(
                output,
                "\nEnter search text (or '{}' to quit): ",
                self.config.exit_keyword
            )?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                break;
            };
            let query = line.trim();
            if query.to_lowercase() == self.config.exit_keyword.to_lowercase() {
                break;
            }

            match query {
                "/summary" => self.write_summary(output)?,
                "/reload" => {
                    self.reload();
                    self.report_file_errors(output)?;
                    writeln!(output, "Catalog reloaded: {} record(s).", self.catalog.records.len())?;
                }
                _ => self.handle_search(query, input, output)?,
            }
        }
        Ok(())
    }

    fn handle_search<R: BufRead, W: Write>(
        &self,
        query: &str,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<()> {
        let results = search(&self.catalog.records, query);
        if results.is_empty() {
            writeln!(output, "Nothing found.")?;
            return Ok(());
        }
        writeln!(output)?;
        write!(output, "{}", console::render_table(&results))?;

        write!(output, "\nExport to HTML? (y/n): ")?;
        output.flush()?;
        let answer = read_line(input)?.unwrap_or_default();
        if answer.trim().to_lowercase() == "y" {
            match html::export(&self.catalog.records, &self.config.output_file, Local::now()) {
                Ok(rows) => writeln!(
                    output,
                    "Exported {} row(s) to {}.",
                    rows,
                    self.config.output_file.display()
                )?,
                Err(e) => {
                    warn!("Export failed: {}", e);
                    writeln!(output, "Export failed: {e}")?;
                }
            }
        }
        Ok(())
    }

    fn write_summary<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let stats = summarize(&self.catalog.records);
        writeln!(output, "Records: {}", stats.records)?;
        writeln!(output, "Distinct products: {}", stats.distinct_names)?;
        writeln!(output, "Files loaded: {}", self.catalog.files.len())?;
        writeln!(output, "Rows skipped: {}", self.catalog.skipped_rows())?;
        writeln!(output, "File errors: {}", self.catalog.file_errors.len())?;
        writeln!(output, "Without positive weight: {}", stats.unratable)?;
        if let Some(avg) = stats.avg_price_per_kg {
            writeln!(output, "Average price per kg: {avg:.2}")?;
        }
        if let Some(cheapest) = stats.cheapest {
            writeln!(
                output,
                "Cheapest per kg: {} ({:.2}, {})",
                cheapest.name, cheapest.price_per_kg, cheapest.source_file
            )?;
        }
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceRecord;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::path::Path;

    struct FixedLoader {
        loads: Cell<usize>,
    }

    impl Loader for FixedLoader {
        fn load(&self, _dir: &Path) -> CatalogLoadResult {
            self.loads.set(self.loads.get() + 1);
            CatalogLoadResult {
                records: vec![
                    PriceRecord::new("яблоки".into(), 100.0, 2.0, "price_a.csv".into()),
                    PriceRecord::new("груши".into(), 150.5, 3.0, "price_b.csv".into()),
                ],
                ..CatalogLoadResult::default()
            }
        }
    }

    fn session(output_file: &Path) -> Session<FixedLoader> {
        let config = AppConfig {
            output_file: output_file.to_path_buf(),
            ..AppConfig::default()
        };
        Session::new(config, FixedLoader { loads: Cell::new(0) })
    }

    fn run(session: &mut Session<FixedLoader>, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        session.run(&mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn search_then_exit() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let out_path = dir.path().join("out.html");
        let mut s = session(&out_path);
        let out = run(&mut s, "ЯБЛ\nn\nEXIT\nгруши\n");
        assert!(out.contains("яблоки"));
        assert!(out.contains("50.00"));
        assert!(!out.contains("груши"));
        assert!(!out_path.exists());
    }

    #[test]
    fn nothing_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut s = session(&dir.path().join("out.html"));
        let out = run(&mut s, "bananas\nexit\n");
        assert!(out.contains("Nothing found."));
        assert!(!out.contains("Export to HTML?"));
    }

    #[test]
    fn export_writes_whole_catalog() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let out_path = dir.path().join("out.html");
        let mut s = session(&out_path);
        let out = run(&mut s, "груши\ny\n");
        assert!(out.contains("Exported 2 row(s)"));
        let html = std::fs::read_to_string(&out_path).unwrap();
        assert!(html.contains("яблоки"));
        assert!(html.contains("груши"));
    }

    #[test]
    fn reload_and_summary() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut s = session(&dir.path().join("out.html"));
        let out = run(&mut s, "/reload\n/summary\nexit\n");
        assert_eq!(s.loader.loads.get(), 2);
        assert!(out.contains("Catalog reloaded: 2 record(s)."));
        assert!(out.contains("Records: 2"));
        assert!(out.contains("Cheapest per kg: яблоки (50.00, price_a.csv)"));
    }
}
