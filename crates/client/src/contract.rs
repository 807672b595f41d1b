// Path: crates/client/src/contract.rs
//! Chaincode invocation: read-only evaluation and ordered submission.

use crate::context::{CallContext, ContextResolver};
use crate::lifecycle::{build_proposal, finish, Pipeline, PipelineFailure};
use ledgerops_api::transport::LedgerTransport;
use ledgerops_telemetry::lifecycle_metrics;
use ledgerops_telemetry::time::Timer;
use ledgerops_types::app::{
    ChaincodeSpec, ChaincodeType, EndorsementOutcome, LifecyclePayload, LifecycleResult,
    OperationKind, Peer,
};
use ledgerops_types::config::OrchestratorConfig;
use ledgerops_types::error::{LifecycleError, ResolveError};
use std::sync::Arc;

/// Invokes functions of an instantiated chaincode.
#[derive(Debug, Clone)]
pub struct ContractGateway {
    pipeline: Pipeline,
    contexts: Arc<dyn ContextResolver>,
    user: String,
}

fn invoked(chaincode: &str) -> ChaincodeSpec {
    ChaincodeSpec {
        id: chaincode.to_string(),
        version: String::new(),
        path: None,
        chaincode_type: ChaincodeType::default(),
    }
}

impl ContractGateway {
    /// Creates a gateway signing as `config.user`.
    pub fn new(
        transport: Arc<dyn LedgerTransport>,
        contexts: Arc<dyn ContextResolver>,
        config: &OrchestratorConfig,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(transport, config),
            contexts,
            user: config.user.clone(),
        }
    }

    async fn context(&self, org: &str, channel: &str) -> Result<(CallContext, Vec<Peer>), ResolveError> {
        let ctx = self.contexts.resolve(org, &self.user, Some(channel)).await?;
        let peers = ctx.topology.peers.clone();
        Ok((ctx, peers))
    }

    /// Runs `function` on one peer of `org` without ordering and returns its
    /// payload.
    pub async fn evaluate_transaction(
        &self,
        org: &str,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LifecycleError> {
        let (ctx, peers) = self.context(org, channel).await?;
        let peer = peers
            .into_iter()
            .next()
            .ok_or(LifecycleError::EmptyResponseSet)?;
        let target = std::slice::from_ref(&peer);
        let proposal = build_proposal(
            &ctx,
            OperationKind::Invoke,
            invoked(chaincode),
            Some(channel),
            function,
            args,
            target,
        );
        let (_, responses) = self
            .pipeline
            .endorse(&ctx, target, proposal)
            .await
            .map_err(|f| f.error)?;
        tracing::debug!(target: "lifecycle", peer = %peer.name, chaincode, function, "Evaluated transaction");
        match responses.outcomes().first() {
            Some(EndorsementOutcome::Response(r)) => Ok(r.payload.clone()),
            _ => Err(LifecycleError::EmptyResponseSet),
        }
    }

    /// Endorses `function` on every peer of `org` in `channel`, orders it and
    /// waits for every peer to commit. On success the payload carries the
    /// first peer's response bytes.
    pub async fn submit_transaction(
        &self,
        org: &str,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
    ) -> LifecycleResult {
        let kind = OperationKind::Invoke;
        let _timer = Timer::new(lifecycle_metrics(), kind.as_str());
        let outcome = self
            .try_submit(org, channel, chaincode, function, args)
            .await;
        finish(kind, outcome)
    }

    async fn try_submit(
        &self,
        org: &str,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[String],
    ) -> Result<(String, Option<LifecyclePayload>), PipelineFailure> {
        let (ctx, peers) = self.context(org, channel).await?;
        let proposal = build_proposal(
            &ctx,
            OperationKind::Invoke,
            invoked(chaincode),
            Some(channel),
            function,
            args,
            &peers,
        );
        let tx_id = proposal.tx_id.id.clone();
        let (responses, _) = self.pipeline.run(&ctx, &peers, proposal).await?;
        let payload = responses
            .responses()
            .next()
            .map(|r| r.payload.clone())
            .unwrap_or_default();
        Ok((
            format!(
                "Transaction {} of '{}' committed on channel {}",
                tx_id, chaincode, channel
            ),
            Some(LifecyclePayload::Response(payload)),
        ))
    }
}
