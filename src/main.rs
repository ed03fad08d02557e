//! # msgtidy CLI
//!
//! Command-line interface for the msgtidy library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use msgtidy::cli::Args;
use msgtidy::contacts::{Authorization, ContactIndex, ContactStore, SystemContactStore};
use msgtidy::dates::ExtractorPatterns;
use msgtidy::exporter;
use msgtidy::processor::{process_directory, ProcessOptions};
use msgtidy::TidyError;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), TidyError> {
    let total_start = Instant::now();

    // clap's own exit code for bad arguments is 2; map it to 1 and keep
    // help/version at 0.
    let args = match <Args as ClapParser>::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let failed = err.use_stderr();
            let _ = err.print();
            process::exit(i32::from(failed));
        }
    };
    args.validate()?;

    // Compile extraction patterns up front so a bad pattern fails the run
    // before the exporter does any work.
    let patterns = ExtractorPatterns::new()?;

    println!("📬 msgtidy v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Output:  {}", args.output);
    println!("📄 Format:  {}", args.format);
    if args.dry_run {
        println!("🔍 Mode:    Dry run (no changes)");
    }
    println!();

    println!("⏳ Exporting messages...");
    let export_start = Instant::now();
    exporter::run_export(&args)?;
    println!("   Export done ({:.2}s)", export_start.elapsed().as_secs_f64());

    let index = if args.no_rename {
        println!("⏭️  Skipping rename (--no-rename)");
        ContactIndex::empty()
    } else {
        build_contact_index(args.verbose)
    };

    println!("🗂️  Processing export files...");
    let opts = ProcessOptions {
        rename: !args.no_rename,
        dry_run: args.dry_run,
        verbose: args.verbose,
    };
    let report = process_directory(Path::new(&args.output), &index, &patterns, &opts);
    let stats = report.stats;

    println!();
    println!("✅ Done!");
    println!();
    println!("📊 Summary:");
    println!("   Files:      {}", stats.files_seen());
    if !args.no_rename {
        println!(
            "   Renamed:    {}{}",
            stats.renamed,
            if args.dry_run { " (simulated)" } else { "" }
        );
        if stats.already_named > 0 {
            println!("   Kept name:  {}", stats.already_named);
        }
        println!("   Unmatched:  {}", stats.unmatched);
        if stats.rename_failed > 0 {
            println!("   Rename errors: {}", stats.rename_failed);
        }
    }
    println!(
        "   Timestamps: {}{}",
        stats.stamped,
        if args.dry_run { " (simulated)" } else { "" }
    );
    if stats.no_dates > 0 {
        println!("   No dates:   {}", stats.no_dates);
    }
    if stats.stamp_failed > 0 {
        println!("   Timestamp errors: {}", stats.stamp_failed);
    }
    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Builds the contact index from the system contact store.
///
/// The authorization request blocks until the user decides. Denial and
/// store errors both degrade to an empty index: the run continues with
/// renaming disabled.
fn build_contact_index(verbose: bool) -> ContactIndex {
    println!("👥 Requesting contact access...");
    let store = SystemContactStore::new();

    match store.request_access() {
        Ok(Authorization::Granted) => match store.records() {
            Ok(records) => {
                let index = ContactIndex::from_records(&records);
                if verbose {
                    println!(
                        "   {} contacts, {} identifier keys",
                        records.len(),
                        index.len()
                    );
                }
                index
            }
            Err(e) => {
                eprintln!("⚠️  {e}; continuing without renaming");
                ContactIndex::empty()
            }
        },
        Ok(Authorization::Denied) => {
            eprintln!("⚠️  Contact access denied; continuing without renaming");
            ContactIndex::empty()
        }
        Err(e) => {
            eprintln!("⚠️  {e}; continuing without renaming");
            ContactIndex::empty()
        }
    }
}
