//! Fundmatch command-line entrypoint.
//!
//! ```text
//! fundmatch rank <organization.json> <programs.json> [top_n] [--explain]
//! fundmatch partners <organization.json> <organizations.json> [top_n]
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mimalloc::MiMalloc;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use fundmatch::{
    Config, Explainer, ExplanationGate, ExplanationInput, ExplanationRequest, FundingProgram,
    GenaiExplainer, Match, MatchRepository, Organization, RepositoryResult, ScoreBreakdown,
    ScoringPool, fallback_explanation, rank_candidates, recommend_partners,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage:
  fundmatch rank <organization.json> <programs.json> [top_n] [--explain]
  fundmatch partners <organization.json> <organizations.json> [top_n]";

/// The CLI ranks ad-hoc files; there is no match table to write back to.
struct Unpersisted;

#[async_trait]
impl MatchRepository for Unpersisted {
    async fn find_match(&self, _: Uuid, _: Uuid) -> RepositoryResult<Option<Match>> {
        Ok(None)
    }

    async fn save_match(&self, _: Match) -> RepositoryResult<()> {
        Ok(())
    }

    async fn upsert_scores(
        &self,
        organization_id: Uuid,
        scores: &[(Uuid, ScoreBreakdown)],
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Match>> {
        Ok(scores
            .iter()
            .map(|&(program_id, breakdown)| Match::new(organization_id, program_id, breakdown, now))
            .collect())
    }

    async fn save_explanation(&self, _: Uuid, _: Uuid, _: &str) -> RepositoryResult<()> {
        Ok(())
    }

    async fn mark_viewed(&self, _: Uuid) -> RepositoryResult<()> {
        Ok(())
    }

    async fn set_saved(&self, _: Uuid, _: bool) -> RepositoryResult<()> {
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(Path::new(path)).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))
}

fn parse_top_n(arg: Option<&String>, default: usize) -> anyhow::Result<usize> {
    match arg {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("top_n must be a positive integer, got {raw:?}")),
        None => Ok(default),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let explain = args.iter().any(|arg| arg == "--explain");
    args.retain(|arg| arg != "--explain");

    let (Some(command), Some(org_path), Some(candidates_path)) =
        (args.first(), args.get(1), args.get(2))
    else {
        bail!("{USAGE}");
    };
    let top_n = parse_top_n(args.get(3), config.top_n)?;
    let pool = ScoringPool::new(config.workers)?;

    tracing::info!(command = %command, top_n, workers = pool.workers(), "fundmatch starting");

    let output = match command.as_str() {
        "rank" => {
            let org: Organization = read_json(org_path)?;
            let programs: Vec<FundingProgram> = read_json(candidates_path)?;
            let as_of = Utc::now();
            let ranked = rank_candidates(&pool, &org, &programs, top_n, as_of);

            let gate = ExplanationGate::from_config(&config, Arc::new(Unpersisted));
            let explainer: Arc<dyn Explainer> = Arc::new(GenaiExplainer::new(config.model.clone()));

            let mut rows = Vec::with_capacity(ranked.len());
            for entry in &ranked {
                let input = ExplanationInput::new(
                    &org,
                    entry.program,
                    entry.breakdown,
                    &config.prompt_version,
                );
                let explanation = if explain {
                    let request = ExplanationRequest {
                        organization_id: org.id,
                        program_id: entry.program.id,
                        input,
                        generation_allowed: true,
                    };
                    gate.get_or_generate(request, Arc::clone(&explainer))
                        .await
                        .explanation
                } else {
                    fallback_explanation(&input)
                };
                rows.push(json!({
                    "programId": entry.program.id,
                    "title": entry.program.title,
                    "score": entry.score,
                    "breakdown": entry.breakdown,
                    "deadline": entry.program.deadline,
                    "explanation": explanation,
                }));
            }
            serde_json::Value::Array(rows)
        }
        "partners" => {
            let org: Organization = read_json(org_path)?;
            let candidates: Vec<Organization> = read_json(candidates_path)?;
            let ranked = recommend_partners(&pool, &org, &candidates, top_n);
            serde_json::to_value(&ranked)?
        }
        other => bail!("unknown command {other:?}\n{USAGE}"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
