//! Behaviour of `Nlp` across languages and pipelines

use std::sync::Arc;
use std::thread;

use glossa_engine::*;

#[test]
fn test_defaults_produce_words_for_every_language() {
    for code in registered_codes() {
        let nlp = Nlp::new(code).unwrap();
        let doc = nlp.analyze(example_text(code).unwrap()).unwrap();

        assert_eq!(doc.language(), code);
        assert!(!doc.words().is_empty(), "{code} produced no words");
        assert!(doc.words().iter().all(|w| w.lemma.is_some()), "{code} left words unlemmatized");
    }
}

#[test]
fn test_unknown_and_unimplemented_are_distinct() {
    assert!(matches!(
        Nlp::new("xxx"),
        Err(NlpError::Language(LanguageError::Unknown { .. }))
    ));
    assert!(matches!(
        Nlp::new("axm"),
        Err(NlpError::Language(LanguageError::Unimplemented { .. }))
    ));

    let err = Nlp::new("xxx").unwrap_err();
    assert_eq!(err.to_string(), "Unknown language 'xxx'. Use ISO 639-3 languages.");
}

#[test]
fn test_latin_example_first_word() {
    let nlp = Nlp::new("lat").unwrap();
    let doc = nlp.analyze(example_text("lat").unwrap()).unwrap();

    let first = &doc.words()[0];
    assert_eq!(first.string, "Gallia");
    assert_eq!(first.index_token, 1);
    assert_eq!(first.index_sentence, 0);
    assert_eq!(first.index_char_start, Some(0));
    assert_eq!(first.upos, Some(PosTag::Propn));
    assert_eq!(doc.words()[1].lemma.as_deref(), Some("sum"));
}

#[test]
fn test_latin_enclitics_in_example() {
    let nlp = Nlp::new("lat").unwrap();
    let doc = nlp.analyze(example_text("lat").unwrap()).unwrap();
    let strings: Vec<&str> = doc.words().iter().map(|w| w.string.as_str()).collect();

    let at = strings.iter().position(|s| *s == "minime").unwrap();
    assert_eq!(strings[at + 1], "-que");
    assert!(strings.contains(&"atque"));
    assert_eq!(doc.sentence_count(), 3);
}

#[test]
fn test_gothic_example_has_four_sentences() {
    let nlp = Nlp::new("got").unwrap();
    let doc = nlp.analyze(example_text("got").unwrap()).unwrap();
    assert_eq!(doc.sentences().len(), 4);
    assert_eq!(doc.words()[0].string, "swa");
}

#[test]
fn test_greek_example_sentences() {
    let nlp = Nlp::new("grc").unwrap();
    let doc = nlp.analyze(example_text("grc").unwrap()).unwrap();
    assert_eq!(doc.words()[0].string, "ὅτι");
    assert_eq!(doc.words()[0].upos, Some(PosTag::Sconj));
    assert_eq!(doc.sentence_count(), 3);
}

#[test]
fn test_old_french_and_ocs_examples() {
    let doc = Nlp::new("fro").unwrap().analyze(example_text("fro").unwrap()).unwrap();
    assert_eq!(doc.words()[0].string, "Une");
    assert_eq!(doc.words()[0].lemma.as_deref(), Some("un"));
    assert!(doc.words().iter().any(|w| w.string == "l'"));

    let doc = Nlp::new("chu").unwrap().analyze(example_text("chu").unwrap()).unwrap();
    assert_eq!(doc.words()[0].string, "отьчє");
    assert_eq!(doc.sentence_count(), 2);
}

#[test]
fn test_custom_pipeline_for_language_without_default() {
    let language = glossa_core::language::resolve("ang").unwrap();
    let pipeline = Arc::new(
        PipelineConfig::new("ang")
            .with_process(ProcessSpec::Tokenization { rules: None })
            .with_process(ProcessSpec::Lemmatization { rules: None })
            .build()
            .unwrap(),
    );
    assert_eq!(pipeline.language(), &language);

    let nlp = Nlp::with_pipeline("ang", Arc::clone(&pipeline)).unwrap();
    assert!(Arc::ptr_eq(nlp.pipeline(), &pipeline));

    let doc = nlp.analyze("Hwæt! We Gardena in geardagum.").unwrap();
    assert_eq!(doc.words()[0].lemma.as_deref(), Some("hwæt"));
    assert_eq!(doc.sentence_count(), 2);
}

#[test]
fn test_mismatched_custom_pipeline_fails_at_run_time() {
    let greek = glossa_core::language::resolve("grc").unwrap();
    let pipeline = Arc::new(default_pipeline_for(&greek).unwrap());

    let nlp = Nlp::with_pipeline("lat", pipeline).unwrap();
    match nlp.analyze("Gallia est.") {
        Err(ProcessError::UnsupportedLanguage { process, language }) => {
            assert_eq!(process, "greek_tokenization");
            assert_eq!(language, "lat");
        }
        other => panic!("Expected UnsupportedLanguage, got {other:?}"),
    }
}

#[test]
fn test_mismatched_custom_pipeline_rejected_when_strict() {
    let greek = glossa_core::language::resolve("grc").unwrap();
    let pipeline = Arc::new(default_pipeline_for(&greek).unwrap());

    let err = Nlp::builder("lat").pipeline(pipeline).strict().build().unwrap_err();
    match err {
        NlpError::InvalidPipeline { report, .. } => {
            assert_eq!(report.errors().count(), 3);
            assert!(report.warnings().any(|w| w.rule == "language_mismatch"));
        }
        other => panic!("Expected InvalidPipeline, got {other:?}"),
    }
}

#[test]
fn test_documents_are_independent() {
    let nlp = Nlp::new("got").unwrap();
    let mut first = nlp.analyze("swa liuhtjai.").unwrap();
    let second = nlp.analyze("swa liuhtjai.").unwrap();

    first
        .refine(0, Annotation::Lemma("changed".into()))
        .unwrap();
    assert_eq!(second.words()[0].lemma.as_deref(), Some("swa"));
    assert_ne!(first, second);
}

#[test]
fn test_concurrent_analyses_share_one_context() {
    let nlp = Arc::new(Nlp::new("lat").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let nlp = Arc::clone(&nlp);
            thread::spawn(move || nlp.analyze(example_text("lat").unwrap()).unwrap())
        })
        .collect();

    let docs: Vec<Document> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(docs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_observer_sees_every_step() {
    let nlp = Nlp::new("got").unwrap();
    let mut timings = StepTimings::new();
    nlp.analyze_observed("swa liuhtjai.", &mut timings).unwrap();

    let names: Vec<&str> = timings.steps.iter().map(|s| s.process.as_str()).collect();
    assert_eq!(
        names,
        vec!["gothic_tokenization", "gothic_tagging", "gothic_lemmatization"]
    );
    assert!(timings.steps.iter().all(|s| s.words == 3));
    assert!(timings.failed.is_none());
}

#[test]
fn test_empty_text() {
    let doc = Nlp::new("lat").unwrap().analyze("").unwrap();
    assert!(doc.is_tokenized());
    assert!(doc.words().is_empty());
    assert_eq!(doc.sentence_count(), 0);
}

#[test]
fn test_configured_pipeline_with_external_annotations() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("parse.conllu"),
        "1\tswa\tswa\tADV\t_\t_\t2\tadvmod\t_\t_\n\
         2\tliuhtjai\tliuhtjan\tVERB\t_\t_\t0\troot\t_\t_\n\
         3\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\n",
    )
    .unwrap();
    let config_path = dir.path().join("pipeline.toml");
    std::fs::write(
        &config_path,
        "language = \"got\"\n\n[[processes]]\nname = \"tokenization\"\n\n\
         [[processes]]\nname = \"conllu\"\npath = \"parse.conllu\"\n\n\
         [[processes]]\nname = \"lemmatization\"\n",
    )
    .unwrap();

    let pipeline = PipelineConfig::from_file(&config_path).unwrap().build().unwrap();
    assert!(pipeline.validate().is_empty());

    let nlp = Nlp::builder("got").pipeline(Arc::new(pipeline)).strict().build().unwrap();
    let doc = nlp.analyze("swa liuhtjai.").unwrap();

    assert_eq!(doc.words()[1].lemma.as_deref(), Some("liuhtjan"));
    assert_eq!(doc.words()[1].dependency_relation.as_deref(), Some("root"));
    assert_eq!(doc.words()[0].governor, Some(2));

    let conllu = write_conllu(&doc);
    assert!(conllu.contains("2\tliuhtjai\tliuhtjan\tVERB\t_\t_\t0\troot\t_\t_"));
}
