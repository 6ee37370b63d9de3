use crate::infra::{ConfiguredStore, InMemoryArtifactStore};
use call_review::calls::{CallId, CallReview, CallReviewError, CallReviewService};
use call_review::config::AppConfig;
use call_review::error::AppError;
use call_review::evaluation::{RubricEvaluator, Transcript};
use call_review::telemetry;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Plain-text transcript to score
    #[arg(value_name = "TRANSCRIPT_FILE")]
    pub(crate) transcript: PathBuf,
    /// Store artifacts under this id instead of the file stem
    #[arg(long)]
    pub(crate) call_id: Option<String>,
    /// Write transcript, score and feedback to the configured store
    #[arg(long)]
    pub(crate) persist: bool,
    /// Print the review as JSON instead of a console report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;

    let store = if args.persist {
        ConfiguredStore::open(&config.storage)?
    } else {
        ConfiguredStore::Memory(InMemoryArtifactStore::default())
    };
    info!(storage = %store.describe(), file = %args.transcript.display(), "evaluating transcript");

    let output = evaluate_file(&args, store)?;
    println!("{output}");
    Ok(())
}

/// Scores the transcript file and renders the requested output format.
pub(crate) fn evaluate_file(
    args: &EvaluateArgs,
    store: ConfiguredStore,
) -> Result<String, AppError> {
    let text = std::fs::read_to_string(&args.transcript)?;
    let call_id = match &args.call_id {
        Some(raw) => CallId::new(raw.as_str()),
        None => CallId::from_file_name(&args.transcript.to_string_lossy()),
    }
    .map_err(CallReviewError::from)?;

    let service = CallReviewService::new(Arc::new(store), RubricEvaluator::default());
    let review = service.review_transcript(call_id, Transcript::new(text))?;

    if args.json {
        Ok(serde_json::to_string_pretty(&review.view())?)
    } else {
        Ok(render_report(&review))
    }
}

fn render_report(review: &CallReview) -> String {
    let evaluation = &review.evaluation;
    let intents = if evaluation.matched_intents().is_empty() {
        "none".to_string()
    } else {
        evaluation.matched_intents().join(", ")
    };

    let mut lines = vec![
        format!("Call {}", review.call_id),
        format!("Score: {}/100", evaluation.score()),
        evaluation.tone_summary(),
        format!("Matched intents: {intents}"),
        String::new(),
        "Breakdown:".to_string(),
    ];
    lines.extend(evaluation.components().iter().map(|component| {
        format!(
            "  - {:<20} {:>3}",
            component.criterion.label(),
            component.points
        )
    }));
    lines.push(String::new());
    lines.push("Feedback:".to_string());
    lines.extend(evaluation.feedback().iter().map(|line| format!("  - {line}")));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_review::calls::FileArtifactStore;

    const CALL: &str =
        "Good morning, I have an issue with billing. Absolutely, thank you for calling, have a nice day.";

    fn args(path: PathBuf) -> EvaluateArgs {
        EvaluateArgs {
            transcript: path,
            call_id: None,
            persist: false,
            json: false,
        }
    }

    fn write_transcript(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).expect("write transcript");
        path
    }

    #[test]
    fn console_report_lists_breakdown_and_feedback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_transcript(&dir, "call_01.txt", CALL);

        let report = evaluate_file(&args(path), ConfiguredStore::Memory(Default::default()))
            .expect("report renders");

        assert!(report.starts_with("Call call_01"));
        assert!(report.contains("Score: 100/100"));
        assert!(report.contains("Tone detected: Positive"));
        assert!(report.contains("Matched intents: support, billing"));
        assert_eq!(report.matches("\n  - ").count(), 10);
    }

    #[test]
    fn json_output_uses_the_review_view() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_transcript(&dir, "ignored.txt", "I want to cancel.");
        let mut args = args(path);
        args.json = true;
        args.call_id = Some("override".to_string());

        let output = evaluate_file(&args, ConfiguredStore::Memory(Default::default()))
            .expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(value["call_id"], "override");
        assert_eq!(value["matched_intents"], serde_json::json!(["cancellation"]));
        assert_eq!(value["components"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn persisted_review_lands_in_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_transcript(&dir, "call_02.txt", CALL);
        let store = FileArtifactStore::open(dir.path().join("data")).expect("store opens");

        evaluate_file(&args(path), ConfiguredStore::Filesystem(store)).expect("evaluated");

        let score = std::fs::read_to_string(dir.path().join("data/scores/call_02.txt"))
            .expect("score written");
        assert_eq!(score, "100");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");

        let result = evaluate_file(
            &args(dir.path().join("absent.txt")),
            ConfiguredStore::Memory(Default::default()),
        );

        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn unsafe_call_id_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_transcript(&dir, "call.txt", CALL);
        let mut args = args(path);
        args.call_id = Some("../escape".to_string());

        let result = evaluate_file(&args, ConfiguredStore::Memory(Default::default()));

        assert!(matches!(
            result,
            Err(AppError::Review(CallReviewError::CallId(_)))
        ));
    }
}
