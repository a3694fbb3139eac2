use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, info_span};

use breastcan_auth::{CredentialStore, EvaluationRecord, JsonFileCredentialStore, Session};
use breastcan_engine::{EngineConfig, Recommendation, RecommendationEngine};
use breastcan_report::{ReportHeader, write_report};
use breastcan_standards::{MutationTherapyTable, load_mutation_table};

use crate::cli::{AccountArgs, EngineArgs, OutputFormatArg, RecommendArgs, ReportArgs, TableArgs};
use crate::logging::redact_value;

/// Evaluate a snapshot file and render it in the requested format.
pub fn run_recommend(args: &RecommendArgs) -> Result<String> {
    let engine = build_engine(&args.engine)?;
    let raw = read_snapshot(&args.snapshot)?;
    let recommendation = engine
        .evaluate(&raw)
        .with_context(|| format!("evaluate snapshot {}", args.snapshot.display()))?;
    render(&recommendation, args.format)
}

pub fn run_mutations(args: &TableArgs) -> Result<Arc<MutationTherapyTable>> {
    load_table(args.mutation_table.as_deref())
}

pub fn run_signup(args: &AccountArgs) -> Result<()> {
    let mut store = JsonFileCredentialStore::new(&args.users);
    store
        .register(&args.username, &args.password)
        .with_context(|| format!("register user in {}", args.users.display()))?;
    Ok(())
}

pub fn run_login(args: &AccountArgs) -> Result<Session> {
    let store = JsonFileCredentialStore::new(&args.users);
    let session = Session::login(&store, &args.username, &args.password)
        .with_context(|| format!("log in with {}", args.users.display()))?;
    Ok(session)
}

/// Log in, evaluate and write the report; returns the report path.
pub fn run_report(args: &ReportArgs) -> Result<PathBuf> {
    let mut session = run_login(&args.account)?;
    let span = info_span!(
        "report",
        patient = redact_value(&args.patient_name),
        patient_id = redact_value(&args.patient_id)
    );
    let _guard = span.enter();

    let engine = build_engine(&args.engine)?;
    let raw = read_snapshot(&args.snapshot)?;
    let snapshot = engine
        .normalize(&raw)
        .with_context(|| format!("evaluate snapshot {}", args.snapshot.display()))?;
    let recommendation = engine
        .evaluate_snapshot(&snapshot)
        .with_context(|| format!("evaluate snapshot {}", args.snapshot.display()))?;
    session.record_evaluation(EvaluationRecord {
        patient_name: args.patient_name.clone(),
        patient_id: args.patient_id.clone(),
        snapshot,
        recommendation,
    });

    let Some(record) = session.last_evaluation() else {
        bail!("no evaluation recorded for this session");
    };
    let header = ReportHeader::new(
        session.username(),
        record.patient_name.as_str(),
        record.patient_id.as_str(),
        chrono::Local::now().naive_local(),
    );
    let path = write_report(
        &args.output_dir,
        &header,
        &record.snapshot,
        &record.recommendation,
    )
    .context("write report")?;
    info!(path = %path.display(), "report exported");
    session.logout();
    Ok(path)
}

fn render(recommendation: &Recommendation, format: OutputFormatArg) -> Result<String> {
    match format {
        OutputFormatArg::Text => Ok(recommendation.text().to_string()),
        OutputFormatArg::Json => {
            serde_json::to_string_pretty(recommendation).context("serialize recommendation")
        }
    }
}

fn build_engine(args: &EngineArgs) -> Result<RecommendationEngine> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("load engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let table = load_table(args.mutation_table.as_deref())?;
    Ok(RecommendationEngine::new(table, config))
}

fn load_table(path: Option<&Path>) -> Result<Arc<MutationTherapyTable>> {
    match path {
        Some(path) => {
            let table = load_mutation_table(path)
                .with_context(|| format!("load mutation table {}", path.display()))?;
            Ok(Arc::new(table))
        }
        None => Ok(MutationTherapyTable::builtin()),
    }
}

/// Read a snapshot document from `path`, or stdin for `-`.
fn read_snapshot(path: &Path) -> Result<Value> {
    let contents = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("read snapshot from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("read snapshot {}", path.display()))?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("parse snapshot {} as JSON", path.display()))
}
