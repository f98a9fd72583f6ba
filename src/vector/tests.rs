//! Store-level tests: ranking, filters, tie-breaks, stats.

use super::*;
use std::sync::Arc;

const DIM: usize = 3;

fn metadata(module: Module, successful: bool, rating: u8) -> ProposalMetadata {
    ProposalMetadata {
        module,
        kind: "anexo_experiencia".to_string(),
        successful,
        rating,
        licitation_type: None,
        entity: None,
        reference_amount: None,
        project_id: None,
        notes: None,
    }
}

fn store() -> (VectorInserter, VectorSearcher) {
    let backend = Arc::new(MemoryBackend::new());
    (
        VectorInserter::new(Arc::clone(&backend) as Arc<dyn RecordBackend>, DIM),
        VectorSearcher::new(backend, DIM),
    )
}

#[tokio::test]
async fn exact_match_scores_one() {
    let (inserter, searcher) = store();
    inserter
        .upsert_proposal(
            "propuesta de obra civil".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Obras, true, 5),
        )
        .await
        .unwrap();

    let hits = searcher
        .search_similar_proposals(&[1.0, 0.0, 0.0], 3, SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert_eq!(hits[0].record.content, "propuesta de obra civil");
}

#[tokio::test]
async fn results_sorted_descending_and_truncated() {
    let (inserter, searcher) = store();
    let vectors = [
        vec![0.2, 1.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![0.9, 0.1, 0.0],
    ];
    for (i, v) in vectors.iter().enumerate() {
        inserter
            .upsert_proposal(format!("p{}", i), v.clone(), metadata(Module::Obras, true, 4))
            .await
            .unwrap();
    }

    let hits = searcher
        .search_similar_proposals(&[1.0, 0.0, 0.0], 2, SearchFilters::new())
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].record.content, "p1");
    assert_eq!(hits[1].record.content, "p2");
    assert!(hits[0].score >= hits[1].score);
}

#[tokio::test]
async fn exact_ties_keep_insertion_order() {
    let (inserter, searcher) = store();
    for name in ["primero", "segundo", "tercero"] {
        inserter
            .upsert_proposal(
                name.to_string(),
                vec![0.0, 1.0, 0.0],
                metadata(Module::Bienes, true, 4),
            )
            .await
            .unwrap();
    }

    let hits = searcher
        .search_similar_proposals(&[0.0, 1.0, 0.0], 3, SearchFilters::new())
        .await
        .unwrap();

    let order: Vec<_> = hits.iter().map(|h| h.record.content.as_str()).collect();
    assert_eq!(order, vec!["primero", "segundo", "tercero"]);
}

#[tokio::test]
async fn only_successful_filter_excludes_failures() {
    let (inserter, searcher) = store();
    inserter
        .upsert_proposal(
            "ganadora".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Obras, true, 5),
        )
        .await
        .unwrap();
    inserter
        .upsert_proposal(
            "perdedora".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Obras, false, 2),
        )
        .await
        .unwrap();

    let hits = searcher
        .search_similar_proposals(
            &[1.0, 0.0, 0.0],
            5,
            SearchFilters::new().only_successful(),
        )
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert!(hits.iter().all(|h| h.record.successful));
}

#[tokio::test]
async fn module_filter_is_hard() {
    let (inserter, searcher) = store();
    inserter
        .upsert_proposal(
            "obra".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Obras, true, 5),
        )
        .await
        .unwrap();
    inserter
        .upsert_proposal(
            "servicio".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Servicios, true, 5),
        )
        .await
        .unwrap();

    let hits = searcher
        .search_similar_proposals(
            &[1.0, 0.0, 0.0],
            5,
            SearchFilters::new().module(Module::Obras),
        )
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.module, Module::Obras);
}

#[tokio::test]
async fn licitation_type_filter_matches_exactly() {
    let (inserter, searcher) = store();
    let mut with_type = metadata(Module::Obras, true, 5);
    with_type.licitation_type = Some("licitacion_publica".to_string());
    inserter
        .upsert_proposal("a".to_string(), vec![1.0, 0.0, 0.0], with_type)
        .await
        .unwrap();
    inserter
        .upsert_proposal(
            "b".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Obras, true, 5),
        )
        .await
        .unwrap();

    let hits = searcher
        .search_similar_proposals(
            &[1.0, 0.0, 0.0],
            5,
            SearchFilters::new().licitation_type("licitacion_publica".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.content, "a");
}

#[tokio::test]
async fn pattern_search_respects_module() {
    let (inserter, searcher) = store();
    inserter
        .upsert_pattern(
            "experiencia_especifica",
            "Menciona experiencia específica",
            vec![1.0, 0.0, 0.0],
            Module::Obras,
        )
        .await
        .unwrap();
    inserter
        .upsert_pattern(
            "certificacion_vigente",
            "Acredita certificaciones vigentes",
            vec![1.0, 0.0, 0.0],
            Module::Servicios,
        )
        .await
        .unwrap();

    let hits = searcher
        .search_similar_patterns(&[1.0, 0.0, 0.0], 5, Some(Module::Obras))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.pattern_type, "experiencia_especifica");

    let all = searcher
        .search_similar_patterns(&[1.0, 0.0, 0.0], 5, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn stats_empty_store() {
    let (_, searcher) = store();
    let stats = searcher.rag_stats(None).await.unwrap();
    assert_eq!(stats.total_proposals, 0);
    assert_eq!(stats.successful_proposals, 0);
    assert_eq!(stats.success_rate, 0.0);
    assert_eq!(stats.total_patterns, 0);
}

#[tokio::test]
async fn stats_success_rate_formula() {
    let (inserter, searcher) = store();
    for successful in [true, true, true, false] {
        inserter
            .upsert_proposal(
                "p".to_string(),
                vec![1.0, 0.0, 0.0],
                metadata(Module::Obras, successful, 3),
            )
            .await
            .unwrap();
    }
    inserter
        .upsert_pattern(
            "capacitacion",
            "Relaciona capacitaciones",
            vec![0.0, 1.0, 0.0],
            Module::Obras,
        )
        .await
        .unwrap();

    let stats = searcher.rag_stats(Some(Module::Obras)).await.unwrap();
    assert_eq!(stats.total_proposals, 4);
    assert_eq!(stats.successful_proposals, 3);
    assert_eq!(stats.success_rate, 75.0);
    assert_eq!(stats.total_patterns, 1);
}

#[tokio::test]
async fn stats_scoped_by_module() {
    let (inserter, searcher) = store();
    inserter
        .upsert_proposal(
            "obra".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Obras, true, 5),
        )
        .await
        .unwrap();
    inserter
        .upsert_proposal(
            "bien".to_string(),
            vec![1.0, 0.0, 0.0],
            metadata(Module::Bienes, false, 2),
        )
        .await
        .unwrap();

    let stats = searcher.rag_stats(Some(Module::Bienes)).await.unwrap();
    assert_eq!(stats.total_proposals, 1);
    assert_eq!(stats.successful_proposals, 0);
    assert_eq!(stats.success_rate, 0.0);
}

#[tokio::test]
async fn insert_rejects_wrong_dimensions() {
    let (inserter, _) = store();
    let err = inserter
        .upsert_proposal(
            "corta".to_string(),
            vec![1.0, 0.0],
            metadata(Module::Obras, true, 5),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::InvalidVectorDimensions {
            expected: DIM,
            actual: 2
        }
    ));
}

#[tokio::test]
async fn query_rejects_wrong_dimensions() {
    let (_, searcher) = store();
    let err = searcher
        .search_similar_proposals(&[1.0], 3, SearchFilters::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::InvalidVectorDimensions { actual: 1, .. }
    ));
}

#[test]
fn records_serialize_to_json() {
    let record = ProposalRecord::new(
        "texto".to_string(),
        vec![1.0, 0.0, 0.0],
        metadata(Module::Obras, true, 5),
    );
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"module\":\"obras\""));
    assert!(json.contains("\"successful\":true"));

    let stats: RagStats = serde_json::from_str(
        r#"{"total_proposals":2,"successful_proposals":1,"success_rate":50.0,"total_patterns":0}"#,
    )
    .unwrap();
    assert_eq!(stats.successful_proposals, 1);
}

#[test]
fn module_round_trips_through_strings() {
    for module in [
        Module::Obras,
        Module::Bienes,
        Module::Servicios,
        Module::Consultoria,
    ] {
        assert_eq!(module.as_str().parse::<Module>().unwrap(), module);
    }
    assert_eq!("Consultoría".parse::<Module>().unwrap(), Module::Consultoria);
    assert!("vigilancia".parse::<Module>().is_err());
}
