// Path: crates/client/tests/lifecycle.rs
//! End-to-end lifecycle scenarios against the scripted ledger.

use ledgerops_client::{
    resolver_for, ChaincodeManager, ContractGateway, DeployRequest, InstallRequest, StaticTopology,
};
use ledgerops_test_utils::fixtures::{TestFixtures, ACME_PEERS, BUDGET_PEERS, CHANNEL};
use ledgerops_test_utils::{
    assert_failed_with, CommitScript, EndorseScript, LedgerEvent, MockLedger, MockSigningIdentity,
    OrdererScript, PeerScript,
};
use ledgerops_types::app::{CommitOutcome, LifecyclePayload, OrdererAck};
use ledgerops_types::config::OrchestratorConfig;
use std::sync::Arc;
use std::time::Duration;

fn manager(ledger: &MockLedger) -> ChaincodeManager {
    let config = OrchestratorConfig::default();
    let contexts = resolver_for(
        &config,
        Arc::new(TestFixtures::identities()),
        Arc::new(StaticTopology::new(TestFixtures::topology_profile())),
    );
    ChaincodeManager::new(Arc::new(ledger.clone()), contexts, &config)
}

fn gateway(ledger: &MockLedger) -> ContractGateway {
    let config = OrchestratorConfig::default();
    let contexts = resolver_for(
        &config,
        Arc::new(TestFixtures::identities()),
        Arc::new(StaticTopology::new(TestFixtures::topology_profile())),
    );
    ContractGateway::new(Arc::new(ledger.clone()), contexts, &config)
}

fn deploy() -> DeployRequest {
    DeployRequest::new("acme", CHANNEL, "airline", "v1")
}

fn position(events: &[LedgerEvent], pred: impl Fn(&LedgerEvent) -> bool) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| pred(e))
        .map(|(i, _)| i)
        .collect()
}

#[tokio::test]
async fn instantiate_succeeds_when_every_peer_endorses_and_commits() {
    let ledger = MockLedger::new();
    let result = manager(&ledger).instantiate(&deploy()).await;

    assert!(result.success, "{:?}", result);
    assert!(result.cause.is_none());
    let outcomes = result.commit_outcomes().unwrap();
    let peers: Vec<_> = outcomes.iter().map(CommitOutcome::peer).collect();
    assert_eq!(peers, ACME_PEERS);
    assert!(outcomes.iter().all(CommitOutcome::is_valid));

    let submissions = ledger.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].endorsements.len(), 3);
    for peer in ACME_PEERS {
        assert_eq!(ledger.release_count(peer), 1);
    }
}

#[tokio::test]
async fn one_rejection_fails_endorsement_and_never_contacts_the_orderer() {
    let ledger = MockLedger::new().with_peer(ACME_PEERS[1], PeerScript::status(500));
    let result = manager(&ledger).instantiate(&deploy()).await;

    assert_failed_with!(result, "EndorsementFailed");
    assert!(result.message.contains(ACME_PEERS[1]));
    assert!(ledger.submissions().is_empty());
    assert!(!ledger
        .events()
        .iter()
        .any(|e| matches!(e, LedgerEvent::ListenerRegistered { .. })));
    match result.payload {
        Some(LifecyclePayload::Endorsements(set)) => {
            assert_eq!(set.len(), 3);
            assert_eq!(set.get(ACME_PEERS[1]).unwrap().status(), Some(500));
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_peer_counts_as_a_rejection() {
    let ledger = MockLedger::new().with_peer(
        ACME_PEERS[0],
        PeerScript {
            endorse: EndorseScript::Unreachable("connection refused".into()),
            ..PeerScript::default()
        },
    );
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert_failed_with!(result, "EndorsementFailed");
    assert!(ledger.submissions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn silent_peer_is_bounded_by_the_proposal_timeout() {
    let ledger = MockLedger::new().with_peer(
        ACME_PEERS[2],
        PeerScript {
            endorse: EndorseScript::Hang,
            ..PeerScript::default()
        },
    );
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert_failed_with!(result, "EndorsementFailed");
    assert!(result.message.contains("no response within 45000 ms"));
}

#[tokio::test(start_paused = true)]
async fn listener_timeout_fails_but_keeps_every_outcome() {
    let ledger = MockLedger::new().with_peer(ACME_PEERS[2], PeerScript::commit(CommitScript::Silent));
    let result = manager(&ledger).instantiate(&deploy()).await;

    assert_failed_with!(result, "CommitTimeout:acme-peer3.acme.com");
    let outcomes = result.commit_outcomes().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_valid());
    assert!(outcomes[1].is_valid());
    assert_eq!(
        outcomes[2],
        CommitOutcome::TimedOut {
            peer: ACME_PEERS[2].into(),
            url: "grpc://localhost:9051".into(),
        }
    );
    for peer in ACME_PEERS {
        assert_eq!(ledger.release_count(peer), 1, "{}", peer);
    }
}

#[tokio::test(start_paused = true)]
async fn slow_commit_within_the_timeout_still_succeeds() {
    let ledger = MockLedger::new().with_peer(
        ACME_PEERS[0],
        PeerScript::commit(CommitScript::Valid(Duration::from_secs(59))),
    );
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert!(result.success, "{:?}", result);
}

#[tokio::test(start_paused = true)]
async fn fast_failure_does_not_cut_short_a_slow_commit() {
    let ledger = MockLedger::new()
        .with_peer(
            ACME_PEERS[0],
            PeerScript::commit(CommitScript::Invalid("MVCC_READ_CONFLICT".into())),
        )
        .with_peer(
            ACME_PEERS[1],
            PeerScript::commit(CommitScript::Valid(Duration::from_secs(30))),
        );
    let started = tokio::time::Instant::now();
    let result = manager(&ledger).instantiate(&deploy()).await;

    assert_failed_with!(result, "InvalidCommit:acme-peer1.acme.com:MVCC_READ_CONFLICT");
    assert!(started.elapsed() >= Duration::from_secs(30));
    let outcomes = result.commit_outcomes().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(
        outcomes[1],
        CommitOutcome::Valid {
            peer: ACME_PEERS[1].into(),
            block_number: 7,
        }
    );
    for peer in ACME_PEERS {
        assert_eq!(ledger.release_count(peer), 1, "{}", peer);
    }
}

#[tokio::test(start_paused = true)]
async fn cancelled_operation_releases_every_listener() {
    let ledger = MockLedger::new().with_peer(ACME_PEERS[2], PeerScript::commit(CommitScript::Silent));
    let manager = manager(&ledger);
    let request = deploy();
    let outcome =
        tokio::time::timeout(Duration::from_secs(5), manager.instantiate(&request)).await;

    assert!(outcome.is_err());
    assert_eq!(ledger.submissions().len(), 1);
    for peer in ACME_PEERS {
        assert_eq!(ledger.release_count(peer), 1, "{}", peer);
    }
}

#[tokio::test]
async fn repeated_target_is_rejected_before_any_proposal() {
    let ledger = MockLedger::new();
    let request = deploy().with_targets(vec![ACME_PEERS[0].into(), ACME_PEERS[0].into()]);
    let result = manager(&ledger).instantiate(&request).await;

    assert_failed_with!(result, "ResolveFailed");
    assert!(result.message.contains("more than once"));
    assert!(ledger.events().is_empty());
}

#[tokio::test]
async fn orderer_is_contacted_only_after_every_listener_is_armed() {
    let ledger = MockLedger::new().strict(3);
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert!(result.success, "{:?}", result);

    let events = ledger.events();
    let registered = position(&events, |e| matches!(e, LedgerEvent::ListenerRegistered { .. }));
    let submitted = position(&events, |e| matches!(e, LedgerEvent::OrdererSubmitted { .. }));
    let proposals = position(&events, |e| matches!(e, LedgerEvent::ProposalSent { .. }));
    assert_eq!(registered.len(), 3);
    assert_eq!(submitted.len(), 1);
    assert!(registered.iter().all(|i| *i < submitted[0]));
    assert!(proposals.iter().all(|i| *i < registered[0]));
}

#[tokio::test]
async fn strict_ledger_rejects_a_short_listener_set() {
    // Four listeners required, but only three targets exist.
    let ledger = MockLedger::new().strict(4);
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert_failed_with!(result, "OrderingFailed:TRANSPORT_REJECTED");
}

#[tokio::test]
async fn orderer_rejection_fails_regardless_of_commits() {
    let ledger =
        MockLedger::new().with_orderer(OrdererScript::Ack(OrdererAck::failure("SERVICE_UNAVAILABLE")));
    let result = manager(&ledger).instantiate(&deploy()).await;

    assert_failed_with!(result, "OrderingFailed:SERVICE_UNAVAILABLE");
    assert!(result.commit_outcomes().unwrap().iter().all(CommitOutcome::is_valid));
    for peer in ACME_PEERS {
        assert_eq!(ledger.release_count(peer), 1);
    }
}

#[tokio::test]
async fn unreachable_orderer_is_an_ordering_failure() {
    let ledger = MockLedger::new().with_orderer(OrdererScript::Unreachable("dns".into()));
    let result = manager(&ledger).upgrade(&deploy()).await;
    assert_failed_with!(result, "OrderingFailed:TRANSPORT_UNAVAILABLE");
}

#[tokio::test]
async fn invalid_commit_code_is_surfaced() {
    let ledger = MockLedger::new().with_peer(
        ACME_PEERS[1],
        PeerScript::commit(CommitScript::Invalid("ENDORSEMENT_POLICY_FAILURE".into())),
    );
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert_failed_with!(
        result,
        "InvalidCommit:acme-peer2.acme.com:ENDORSEMENT_POLICY_FAILURE"
    );
}

#[tokio::test]
async fn broken_event_stream_is_a_listener_failure() {
    let ledger = MockLedger::new().with_peer(
        ACME_PEERS[0],
        PeerScript::commit(CommitScript::Broken("stream reset".into())),
    );
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert_failed_with!(result, "CommitListenerFailed:acme-peer1.acme.com");
    assert_eq!(ledger.release_count(ACME_PEERS[0]), 1);
}

#[tokio::test]
async fn events_for_other_transactions_are_ignored() {
    let ledger =
        MockLedger::new().with_peer(ACME_PEERS[0], PeerScript::commit(CommitScript::ValidAfterForeign));
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert!(result.success, "{:?}", result);
}

#[tokio::test]
async fn failed_registration_aborts_before_submission() {
    let ledger = MockLedger::new().with_peer(
        ACME_PEERS[2],
        PeerScript::commit(CommitScript::Unregistrable("event hub down".into())),
    );
    let result = manager(&ledger).instantiate(&deploy()).await;

    assert_failed_with!(result, "CommitListenerFailed:acme-peer3.acme.com");
    assert!(ledger.submissions().is_empty());
    assert_eq!(ledger.release_count(ACME_PEERS[0]), 1);
    assert_eq!(ledger.release_count(ACME_PEERS[1]), 1);
    assert_eq!(ledger.release_count(ACME_PEERS[2]), 0);
}

#[tokio::test]
async fn proposals_are_signed_and_share_one_transaction_id() {
    let ledger = MockLedger::new();
    let result = manager(&ledger).instantiate(&deploy()).await;
    assert!(result.success);

    let signer = MockSigningIdentity::new("acme", "Admin", "AcmeMSP");
    let proposals = ledger.proposals();
    assert_eq!(proposals.len(), 3);
    let tx_id = &proposals[0].proposal.tx_id;
    for signed in &proposals {
        assert_eq!(&signed.proposal.tx_id, tx_id);
        assert_eq!(
            signed.signature,
            signer.expected_signature(&signed.proposal_bytes).unwrap()
        );
        assert_eq!(signed.proposal.function, "init");
        assert_eq!(signed.proposal.targets, ACME_PEERS);
    }
    assert_eq!(&ledger.submissions()[0].tx_id, tx_id);
    match result.payload {
        Some(LifecyclePayload::Commits { tx_id: id, .. }) => assert_eq!(id, tx_id.id),
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn channel_membership_narrows_the_targets() {
    let ledger = MockLedger::new();
    let request = DeployRequest::new("budget", CHANNEL, "airline", "v1");
    let result = manager(&ledger).instantiate(&request).await;

    assert!(result.success, "{:?}", result);
    let proposals = ledger.proposals();
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].proposal.targets, vec![BUDGET_PEERS[0]]);
}

#[tokio::test]
async fn multi_channel_deploy_stops_at_the_first_failing_channel() {
    let ledger = MockLedger::new();
    let request = deploy().on_channels(vec![CHANNEL.into(), "cargochannel".into()]);
    let result = manager(&ledger).upgrade(&request).await;

    assert_failed_with!(result, "ResolveFailed");
    assert!(result.message.contains("cargochannel"));
    assert_eq!(ledger.submissions().len(), 1);
}

#[tokio::test]
async fn install_stops_after_endorsement() {
    let ledger = MockLedger::new();
    let request = InstallRequest::new("acme", "airline", "v1", "github.com/airline");
    let result = manager(&ledger).install(&request).await;

    assert!(result.success, "{:?}", result);
    assert!(result.message.contains("3 peer(s)"));
    assert!(matches!(
        result.payload,
        Some(LifecyclePayload::Endorsements(ref set)) if set.len() == 3
    ));
    assert!(ledger.submissions().is_empty());
    assert!(!ledger
        .events()
        .iter()
        .any(|e| matches!(e, LedgerEvent::ListenerRegistered { .. })));
    let spec = &ledger.proposals()[0].proposal.chaincode;
    assert_eq!(spec.path.as_deref(), Some("github.com/airline"));
}

#[tokio::test]
async fn install_honors_named_targets() {
    let ledger = MockLedger::new();
    let request = InstallRequest::new("acme", "airline", "v1", "github.com/airline")
        .with_targets(vec![ACME_PEERS[2].into()]);
    let result = manager(&ledger).install(&request).await;
    assert!(result.success);
    assert_eq!(ledger.proposals().len(), 1);

    let unknown = InstallRequest::new("acme", "airline", "v1", "github.com/airline")
        .with_targets(vec!["acme-peer9.acme.com".into()]);
    let result = manager(&ledger).install(&unknown).await;
    assert_failed_with!(result, "ResolveFailed");
    assert!(result.message.contains("acme-peer9.acme.com"));
}

#[tokio::test]
async fn misconfiguration_is_reported_not_fatal() {
    let ledger = MockLedger::new();
    let result = manager(&ledger)
        .instantiate(&DeployRequest::new("zeta", CHANNEL, "airline", "v1"))
        .await;
    assert_failed_with!(result, "ResolveFailed");

    let result = manager(&ledger)
        .install(&InstallRequest::new("acme", "airline", "", "github.com/airline"))
        .await;
    assert_failed_with!(result, "InvalidRequest");

    let result = manager(&ledger)
        .instantiate(&deploy().on_channels(Vec::new()))
        .await;
    assert_failed_with!(result, "InvalidRequest");
    assert!(ledger.events().is_empty());
}

#[tokio::test]
async fn evaluate_reads_one_peer_without_ordering() {
    let ledger = MockLedger::new();
    let payload = gateway(&ledger)
        .evaluate_transaction("acme", CHANNEL, "airline", "queryFlight", &["BA0001".to_string()])
        .await
        .unwrap();

    assert_eq!(payload, b"endorsed");
    assert_eq!(ledger.proposals().len(), 1);
    assert_eq!(ledger.proposals()[0].proposal.args, vec![b"BA0001".to_vec()]);
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn submit_transaction_runs_the_full_pipeline() {
    let ledger = MockLedger::new().strict(3);
    let result = gateway(&ledger)
        .submit_transaction("acme", CHANNEL, "airline", "createFlight", &["BA0002".to_string()])
        .await;

    assert!(result.success, "{:?}", result);
    assert_eq!(
        result.payload,
        Some(LifecyclePayload::Response(b"endorsed".to_vec()))
    );
    assert_eq!(ledger.submissions().len(), 1);
}

#[test]
fn result_serializes_with_cause_and_tagged_payload() {
    let err = ledgerops_types::error::LifecycleError::CommitTimeout {
        peer: ACME_PEERS[0].into(),
    };
    let result = ledgerops_types::app::LifecycleResult::failure(&err, None);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["cause"], "CommitTimeout:acme-peer1.acme.com");
    assert!(json.get("payload").is_none());
}
