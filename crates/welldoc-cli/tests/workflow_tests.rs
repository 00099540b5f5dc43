//! extract → coverage → index → summarize over a directory of text dumps

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use welldoc_cli::cli::{CoverageArgs, ExtractArgs, IndexArgs, SummarizeArgs};
use welldoc_cli::commands::coverage::run_coverage;
use welldoc_cli::commands::extract::run_extract;
use welldoc_cli::commands::index::run_index;
use welldoc_cli::commands::read_metadata;
use welldoc_cli::commands::summarize::run_summarize;
use welldoc_cli::{CliError, Config};
use welldoc_domain::Category;
use welldoc_llm::MockGenerator;

const EOWR: &str = "END OF WELL REPORT\nNLW-GT-01\nIssue date: 11 februari 2011\n\
\x0cTABLE OF CONTENTS\n\
1 Introduction ........ 3\n\
2 Geology ........ 4\n\
3 Casing program ........ 5\n\
\x0cINTRODUCTION\nThe well was drilled as a geothermal doublet producer.\n\
\x0cGEOLOGY\nThe reservoir consists of sandstone with good porosity.\n\
\x0cCASING\nThe 13 3/8in casing was set at 800 m and cemented to surface.\n\n\
| Size | Shoe |\n| 13 3/8 | 800 |\n";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let well = dir.path().join("reports").join("NLW-GT-01");
    fs::create_dir_all(&well).unwrap();
    fs::write(well.join("EOWR.pdf"), "%PDF-1.4").unwrap();
    fs::write(well.join("EOWR.structured.txt"), EOWR).unwrap();
    fs::write(well.join("memo.pdf"), "%PDF").unwrap();
    dir
}

fn extract(root: &Path) -> ExtractArgs {
    ExtractArgs {
        dir: root.join("reports"),
        output: root.join("metadata.json"),
    }
}

#[tokio::test]
async fn test_extract_writes_metadata() {
    let dir = workspace();
    let args = extract(dir.path());
    let processed = run_extract(&args, &Config::default()).await.unwrap();

    assert_eq!(processed.len(), 2);
    let documents = read_metadata(&args.output).unwrap();
    assert_eq!(documents[0].filename, "EOWR.pdf");
    assert_eq!(documents[0].well_id, "NLW-GT-01");
    assert_eq!(documents[0].pub_date, NaiveDate::from_ymd_opt(2011, 2, 11));
    assert_eq!(documents[0].toc.len(), 3);
    assert_eq!(documents[0].toc[2].category, Some(Category::Casing));
    assert!(documents[1].toc.is_empty());
    assert!(!processed[1].warnings.is_empty());
}

#[tokio::test]
async fn test_coverage_threshold() {
    let dir = workspace();
    let args = extract(dir.path());
    run_extract(&args, &Config::default()).await.unwrap();

    let report = run_coverage(
        &CoverageArgs {
            metadata: args.output.clone(),
            threshold: None,
        },
        &Config::default(),
    )
    .unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.per_category.get(&Category::Casing), Some(&1));

    let invalid = run_coverage(
        &CoverageArgs {
            metadata: args.output,
            threshold: Some(1.5),
        },
        &Config::default(),
    );
    assert!(matches!(invalid, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_index_and_summarize_selected_report() {
    let dir = workspace();
    let config = Config::default();
    let args = extract(dir.path());
    run_extract(&args, &config).await.unwrap();

    let db = dir.path().join("welldoc.db");
    let index_args = IndexArgs {
        metadata: args.output.clone(),
        db: db.clone(),
        all_documents: false,
    };
    let stats = run_index(&index_args, &config).unwrap();
    assert_eq!(stats.wells, 1);
    assert_eq!(stats.documents, 1);
    assert!(stats.chunks >= 4);

    // Re-indexing replaces rather than duplicates
    let again = run_index(&index_args, &config).unwrap();
    assert_eq!(again.chunks, stats.chunks);

    let generator = MockGenerator::new("The 13 3/8in casing was set at 800 m [1] [T1].");
    let summary = run_summarize(
        &SummarizeArgs {
            db,
            well: "NLW-GT-01".to_string(),
            prompt: "Summarize the casing program in 200 words".to_string(),
            max_words: 200,
            document: None,
            all_documents: false,
        },
        &config,
        generator.clone(),
    )
    .await
    .unwrap();

    assert_eq!(generator.call_count(), 1);
    assert_eq!(summary.budget.text, 140);
    assert!(!summary.text_sources.is_empty());
    assert!(summary.text_sources.iter().all(|s| s.document_name == "EOWR.pdf"));
    assert!(summary.text_sources.iter().all(|s| s.category == Some(Category::Casing)));
    assert_eq!(summary.table_sources.len(), 1);
    assert_eq!(summary.table_sources[0].page, 5);
    assert!(!summary.truncated);
}

#[tokio::test]
async fn test_summarize_unknown_well() {
    let dir = workspace();
    let result = run_summarize(
        &SummarizeArgs {
            db: dir.path().join("empty.db"),
            well: "NOPE".to_string(),
            prompt: "casing".to_string(),
            max_words: 100,
            document: None,
            all_documents: false,
        },
        &Config::default(),
        MockGenerator::default(),
    )
    .await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

