use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use pricelens_pipeline::candidate_pipeline::{CandidatePipeline, PipelineResult};
use pricelens_pipeline::market_loader::load_snapshot_file;
use pricelens_pipeline::pipelines::tag_rank::TagRankPipeline;
use pricelens_pipeline::types::{RankQuery, SortMode, Tag, TagState};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RankingJson {
    generated_at: String,
    brand: String,
    baseline_price_label: String,
    sort_mode: String,
    pipeline_ms: u128,
    tags: Vec<Tag>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct SummaryJson {
    tags_retrieved: usize,
    tags_filtered_out: usize,
    tags_ranked: usize,
    included_tags: usize,
}

fn build_json(result: &PipelineResult<RankQuery, Tag>, pipeline_ms: u128) -> RankingJson {
    let included = result
        .selected_candidates
        .iter()
        .filter(|t| t.state == TagState::Included)
        .count();

    RankingJson {
        generated_at: Utc::now().to_rfc3339(),
        brand: result.query.brand.clone(),
        baseline_price_label: result.query.baseline_price_label.clone(),
        sort_mode: match result.query.sort_mode {
            SortMode::Smart => "smart".into(),
            SortMode::ByListingCount => "listings".into(),
        },
        pipeline_ms,
        tags: result.selected_candidates.clone(),
        summary: SummaryJson {
            tags_retrieved: result.retrieved_candidates.len(),
            tags_filtered_out: result.filtered_candidates.len(),
            tags_ranked: result.selected_candidates.len(),
            included_tags: included,
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(
    result: &PipelineResult<RankQuery, Tag>,
    load_ms: u128,
    pipeline_ms: u128,
) {
    println!();
    println!(
        "  PRICELENS \u{00b7} {} \u{00b7} baseline {}",
        result.query.brand,
        if result.query.baseline_price_label.is_empty() {
            "none"
        } else {
            &result.query.baseline_price_label
        }
    );
    println!(
        "  {} tags retrieved \u{00b7} {} removed \u{00b7} {} ranked",
        result.retrieved_candidates.len(),
        result.filtered_candidates.len(),
        result.selected_candidates.len()
    );
    println!();

    if result.selected_candidates.is_empty() {
        println!("  No tags to rank for this snapshot.");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, tag) in result.selected_candidates.iter().enumerate() {
            let marker = match tag.state {
                TagState::Included => "*",
                _ => " ",
            };
            let line = tag.display.as_deref().unwrap_or(&tag.name);
            println!("  {} {:>3}. {}", marker, i + 1, line);
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!(
        "  Snapshot loaded in {}ms \u{00b7} Pipeline ran in {}ms",
        load_ms, pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn print_usage() {
    eprintln!("Usage: pricelens <snapshot.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --baseline LABEL   Baseline asking price, e.g. \"1 200 kr\"");
    eprintln!("  --selected a,b,c   Comma-separated names of already-selected tags");
    eprintln!("  --sort MODE        Sort mode: smart (default) or listings");
    eprintln!("  --top N            Cap the ranked list at N tags");
    eprintln!("  --json             Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  pricelens fixtures/arcteryx.json");
    eprintln!("  pricelens fixtures/arcteryx.json --baseline \"1 200 kr\" --json");
    eprintln!("  pricelens fixtures/arcteryx.json --selected gore-tex --sort listings");
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let snapshot_path = &args[1];

    // Parse optional flags
    let mut baseline: Option<String> = None;
    let mut selected: Vec<String> = Vec::new();
    let mut sort_mode = SortMode::Smart;
    let mut top: Option<usize> = None;
    let mut json_output = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                if i + 1 < args.len() {
                    baseline = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --baseline requires a price label");
                    process::exit(1);
                }
            }
            "--selected" => {
                if i + 1 < args.len() {
                    selected = args[i + 1]
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    i += 2;
                } else {
                    eprintln!("Error: --selected requires a comma-separated list of tag names");
                    process::exit(1);
                }
            }
            "--sort" => {
                if i + 1 < args.len() {
                    sort_mode = match args[i + 1].as_str() {
                        "smart" => SortMode::Smart,
                        "listings" => SortMode::ByListingCount,
                        other => {
                            eprintln!("Error: unknown sort mode '{}', expected smart or listings", other);
                            process::exit(1);
                        }
                    };
                    i += 2;
                } else {
                    eprintln!("Error: --sort requires a mode");
                    process::exit(1);
                }
            }
            "--top" => {
                if i + 1 < args.len() {
                    top = Some(args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --top requires a positive integer");
                        process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
    }

    // Load the market snapshot
    let load_start = Instant::now();
    let snapshot = match load_snapshot_file(snapshot_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading snapshot: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    if snapshot.tags.is_empty() {
        eprintln!("Error: snapshot '{}' contains no tags", snapshot.brand);
        process::exit(1);
    }

    let brand = snapshot.brand.clone();

    // Build and run the pipeline
    let pipeline_start = Instant::now();
    let pipeline = TagRankPipeline::with_snapshot_and_size(snapshot, top);

    let mut query = RankQuery::new(&brand, baseline.as_deref().unwrap_or(""));
    query.request_id = format!("cli-{}", Utc::now().timestamp_millis());
    query.selected_tags = selected;
    query.sort_mode = sort_mode;

    let result = pipeline.execute(query).await;
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if json_output {
        let ranking = build_json(&result, pipeline_ms);
        match serde_json::to_string_pretty(&ranking) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&result, load_ms, pipeline_ms);
    }
}
