use anyhow::Context;
use catalog::{summarize, unique_by_name};
use clap::Parser;
use data::LoadOptions;
use read::load_transactions_from_path;
use std::{fs::File, path::PathBuf};
use write::{write_csv, write_report};

mod catalog;
mod data;
mod read;
mod write;

/// Loads a bakery transactions CSV, drops bad and duplicate rows and lists the cakes sold.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Transactions CSV (TransactionNo,Items,DateTime,DayPart,DayType)
    #[arg(default_value = "Bakery.csv")]
    path: PathBuf,
    /// Treat the first line as data even if it looks like a header
    #[arg(long)]
    keep_header: bool,
    /// Keep rows that exactly repeat an earlier one
    #[arg(long)]
    keep_duplicates: bool,
    /// How many transactions to show in the report
    #[arg(long, default_value_t = 5)]
    preview: usize,
    /// Write the unique cake names to this CSV file
    #[arg(long, value_name = "FILE")]
    catalog_out: Option<PathBuf>,
    /// Write the validated, deduplicated transactions to this CSV file
    #[arg(long, value_name = "FILE")]
    clean_out: Option<PathBuf>,
}

impl Args {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            drop_header: !self.keep_header,
            dedupe_rows: !self.keep_duplicates,
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let loaded = load_transactions_from_path(&args.path, args.load_options())?;
    let unique = unique_by_name(&loaded.rows);
    let summary = summarize(&loaded.rows, &unique);
    write_report(std::io::stdout().lock(), &loaded, &unique, &summary, args.preview)?;

    if let Some(path) = &args.catalog_out {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_csv(file, &unique)?;
    }
    if let Some(path) = &args.clean_out {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_csv(file, &loaded.rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["bakery"]);
        assert_eq!(args.path, PathBuf::from("Bakery.csv"));
        assert_eq!(args.preview, 5);
        assert_eq!(args.load_options(), LoadOptions::default());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "bakery",
            "sales.csv",
            "--keep-header",
            "--keep-duplicates",
            "--preview",
            "100",
            "--catalog-out",
            "cakes.csv",
        ]);
        assert_eq!(args.path, PathBuf::from("sales.csv"));
        assert_eq!(args.preview, 100);
        assert_eq!(args.catalog_out, Some(PathBuf::from("cakes.csv")));
        assert_eq!(args.clean_out, None);
        assert_eq!(
            args.load_options(),
            LoadOptions {
                drop_header: false,
                dedupe_rows: false,
            }
        );
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
