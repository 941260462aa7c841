use corpus_tokens::{SchemeResult, TokenError, TokenEstimator, TiktokenRegistry, estimate};

#[test]
fn test_every_scheme_counts_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(&path, "It was the best of times, it was the worst of times.").unwrap();

    let report = estimate(&path).unwrap();

    assert_eq!(report.outcomes.len(), 6);
    assert!(report.failures().is_empty());
    for (scheme, tokens) in report.counts() {
        assert!(tokens > 0 && tokens < 30, "{scheme}: {tokens}");
    }
    assert_eq!(report.get("gpt2"), report.get("r50k_base"));
}

#[test]
fn test_empty_corpus_counts_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(&path, "").unwrap();

    let report = estimate(&path).unwrap();

    assert!(report.counts().iter().all(|(_, tokens)| *tokens == 0));
}

#[test]
fn test_special_token_only_fails_schemes_that_define_it() {
    let estimator = TokenEstimator::new(TiktokenRegistry::new());

    let report = estimator.estimate_text("prompt <|fim_prefix|> tail");

    let failed: Vec<_> = report.failures().into_iter().map(|(s, _)| s).collect();
    assert_eq!(failed, vec!["p50k_edit", "cl100k_base"]);
    assert!(report.get("gpt2").is_some());
    assert!(report.get("o200k_base").is_some());
    assert!(matches!(
        report.outcomes[3].result,
        SchemeResult::Failed { ref reason } if reason.contains("<|fim_prefix|>")
    ));
}

#[test]
fn test_invalid_utf8_corpus_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(&path, b"\xff\xfe").unwrap();

    let err = estimate(&path).unwrap_err();
    assert!(matches!(err, TokenError::Read { .. }));
}
