//! Every backend tier produces the same analysis shape and the engine's
//! scoring laws hold on each of them.

use std::io::Cursor;
use std::sync::Arc;

use intereval_core::engine::EvaluationEngine;
use intereval_core::lexical::LexicalBackend;
use intereval_core::lexicon::Lexicon;
use intereval_core::model::{Difficulty, Domain, Question, QuestionType};
use intereval_core::rules::{self, ScoreWeights};
use intereval_core::text::tokenize;
use intereval_core::traits::{Capability, LinguisticBackend};
use intereval_nlp::mock::MockBackend;
use intereval_nlp::{EnrichedBackend, WordVectors};

const REST_ANSWER: &str = "I implemented a REST API using Python and deployed it on AWS. \
                           For example, I reduced latency by 40% through caching.";

const VECTORS: &str = "api 0.9 0.1 0.0\nrest 0.8 0.2 0.1\ncaching 0.7 0.3 0.0\n\
                       latency 0.6 0.4 0.0\nperformance 0.7 0.2 0.1\nbudget 0.0 0.1 0.9\n";

fn answers() -> Vec<String> {
    vec![
        String::new(),
        "  \t ".into(),
        "maybe idk".into(),
        REST_ANSWER.into(),
        "Dr. Smith mentored me, e.g. in code reviews. I think it helped a lot.".into(),
        "In my previous role I led a team of five; we cut hosting spend by $12000 per year."
            .into(),
        "word ".repeat(300),
        "Ünïcödé answers with “quotes” and ellipses… still score.".into(),
    ]
}

fn question(difficulty: Difficulty) -> Question {
    Question::new(
        "Describe a REST API you implemented and deployed, focusing on performance optimization.",
        Domain::It,
        difficulty,
        QuestionType::Technical,
    )
    .with_keywords(["API"])
}

fn backends() -> Vec<Arc<dyn LinguisticBackend>> {
    let lexicon = Arc::new(Lexicon::default());
    let vectors = Arc::new(WordVectors::from_reader(Cursor::new(VECTORS)).unwrap());
    let tagged = EnrichedBackend::new(Arc::clone(&lexicon)).unwrap();
    vec![
        Arc::new(LexicalBackend::new(Arc::clone(&lexicon))),
        Arc::new(tagged.clone()),
        Arc::new(tagged.with_vectors(vectors)),
    ]
}

fn engines() -> Vec<EvaluationEngine> {
    backends()
        .into_iter()
        .map(|b| {
            EvaluationEngine::new(b, Arc::new(Lexicon::default()), ScoreWeights::default())
                .unwrap()
        })
        .collect()
}

#[test]
fn every_tier_is_present() {
    let tiers: Vec<Capability> = backends().iter().map(|b| b.capability()).collect();
    assert_eq!(
        tiers,
        vec![Capability::Basic, Capability::Tagged, Capability::Vectors]
    );
}

#[test]
fn analyses_have_the_same_shape() {
    for backend in backends() {
        for answer in answers() {
            let analysis = backend.analyze(&answer);
            assert_eq!(analysis.tokens.len(), tokenize(&answer).len());
            assert_eq!(
                analysis.sentence_lengths.iter().sum::<usize>(),
                analysis.word_count(),
                "{:?} on {answer:?}",
                backend.capability()
            );
            for token in &analysis.tokens {
                assert!(!token.lemma.is_empty(), "empty lemma for {:?}", token.text);
                assert_eq!(token.lower, token.text.to_lowercase());
            }
            for entity in &analysis.entities {
                assert_eq!(entity, &entity.to_lowercase());
            }
        }
    }
}

#[test]
fn similarity_is_bounded_and_symmetric() {
    for backend in backends() {
        for a in answers() {
            for b in answers() {
                let ab = backend.similarity(&a, &b);
                let ba = backend.similarity(&b, &a);
                assert!((0.0..=1.0).contains(&ab));
                assert!((ab - ba).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn scoring_laws_hold_on_every_backend() {
    for engine in engines() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let q = question(difficulty);
            for answer in answers() {
                let r = engine.evaluate(&q, &answer).unwrap();
                for (dimension, value) in r.sub_scores.iter() {
                    assert!((0.0..=100.0).contains(&value), "{dimension}: {value}");
                }
                let s = r.sub_scores;
                let expected = rules::round_to(
                    s.clarity * rules::CLARITY_WEIGHT
                        + s.accuracy * rules::ACCURACY_WEIGHT
                        + s.communication * rules::COMMUNICATION_WEIGHT
                        + s.confidence * rules::CONFIDENCE_WEIGHT,
                    rules::OVERALL_DECIMALS,
                );
                assert_eq!(r.overall_score, expected);
                assert_eq!(r, engine.evaluate(&q, &answer).unwrap());
                assert_eq!(r.backend, engine.capability());
            }
        }
    }
}

#[test]
fn rest_api_answer_is_good_for_an_open_question() {
    let question = Question::new(
        "What is your approach to performance optimization?",
        Domain::It,
        Difficulty::Hard,
        QuestionType::Technical,
    )
    .with_keywords(["API"]);

    // Basic and tagged tiers; the vectors tier only adds similarity.
    for engine in engines().into_iter().take(2) {
        let r = engine.evaluate(&question, REST_ANSWER).unwrap();
        assert!(
            r.overall_score >= 70.0,
            "{}: overall {}",
            engine.capability(),
            r.overall_score
        );
    }
}

#[test]
fn content_gate_is_backend_independent() {
    let q = question(Difficulty::Medium);
    for engine in engines() {
        let idk = engine.evaluate(&q, "maybe idk").unwrap();
        assert_eq!(idk.sub_scores.clarity, rules::CLARITY_BASE);
        assert_eq!(idk.sub_scores.communication, 0.0);
        assert_eq!(idk.sub_scores.accuracy, rules::ACCURACY_BASE);
        assert!(idk.overall_score < 40.0);

        let rest = engine.evaluate(&q, REST_ANSWER).unwrap();
        assert!(rest.sub_scores.accuracy > rules::ACCURACY_BASE);
        assert!(rest.overall_score > idk.overall_score + 20.0);
    }
}

#[test]
fn capability_label_does_not_change_scores() {
    let q = question(Difficulty::Medium);
    let score_with = |capability: Capability| {
        let engine = EvaluationEngine::new(
            Arc::new(MockBackend::new(capability, 0.5)),
            Arc::new(Lexicon::default()),
            ScoreWeights::default(),
        )
        .unwrap();
        engine.evaluate(&q, REST_ANSWER).unwrap()
    };
    let basic = score_with(Capability::Basic);
    let vectors = score_with(Capability::Vectors);
    assert_eq!(basic.sub_scores, vectors.sub_scores);
    assert_eq!(basic.overall_score, vectors.overall_score);
    assert_eq!(basic.backend, Capability::Basic);
    assert_eq!(vectors.backend, Capability::Vectors);
}

#[test]
fn engine_queries_similarity_only_for_substantive_answers() {
    let backend = Arc::new(MockBackend::new(Capability::Tagged, 0.5));
    let engine = EvaluationEngine::new(
        Arc::clone(&backend) as Arc<dyn LinguisticBackend>,
        Arc::new(Lexicon::default()),
        ScoreWeights::default(),
    )
    .unwrap();
    let q = question(Difficulty::Medium);

    engine.evaluate(&q, REST_ANSWER).unwrap();
    assert_eq!(backend.analyze_calls(), 2);
    assert_eq!(backend.similarity_calls(), 1);

    engine.evaluate(&q, "idk").unwrap();
    assert_eq!(backend.analyze_calls(), 4);
    assert_eq!(backend.similarity_calls(), 1);
}
