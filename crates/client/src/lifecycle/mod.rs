// Path: crates/client/src/lifecycle/mod.rs
//! Chaincode lifecycle orchestration.
//!
//! Every operation runs the same pipeline: sign the proposal, broadcast it to
//! the target peers, require unanimous endorsement, and (for operations that
//! change channel state) arm a commit listener on every target before
//! submitting to the orderer. Listener outcomes and the orderer ack are joined
//! with wait-for-all semantics and reduced to a single `LifecycleResult`.

pub mod broadcast;
pub mod commit_wait;
pub mod quorum;
pub mod submit;

use crate::context::{CallContext, ContextResolver};
use ledgerops_api::topology::select_peers;
use ledgerops_api::transport::LedgerTransport;
use ledgerops_crypto::{new_transaction_id, sign_proposal};
use ledgerops_telemetry::time::Timer;
use ledgerops_telemetry::{error_metrics, lifecycle_metrics};
use ledgerops_types::app::{
    ChaincodeSpec, ChaincodeType, LifecyclePayload, LifecycleResult, OperationKind,
    OrderingRequest, Peer, Proposal, ResponseSet, SignedProposal,
};
use ledgerops_types::config::OrchestratorConfig;
use ledgerops_types::error::{CryptoError, ErrorCode, LifecycleError, ResolveError};
use std::sync::Arc;
use std::time::Duration;

/// Why a pipeline run failed, with whatever diagnostics it gathered.
#[derive(Debug)]
pub(crate) struct PipelineFailure {
    pub error: LifecycleError,
    pub payload: Option<LifecyclePayload>,
}

impl From<LifecycleError> for PipelineFailure {
    fn from(error: LifecycleError) -> Self {
        Self {
            error,
            payload: None,
        }
    }
}

impl From<ResolveError> for PipelineFailure {
    fn from(error: ResolveError) -> Self {
        LifecycleError::from(error).into()
    }
}

impl From<CryptoError> for PipelineFailure {
    fn from(error: CryptoError) -> Self {
        LifecycleError::from(error).into()
    }
}

/// The endorse/order/commit machinery shared by lifecycle and contract calls.
#[derive(Debug, Clone)]
pub(crate) struct Pipeline {
    transport: Arc<dyn LedgerTransport>,
    proposal_timeout: Duration,
    commit_timeout: Duration,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn LedgerTransport>, config: &OrchestratorConfig) -> Self {
        Self {
            transport,
            proposal_timeout: Duration::from_millis(config.proposal_timeout_ms),
            commit_timeout: Duration::from_millis(config.commit_timeout_ms),
        }
    }

    pub fn transport(&self) -> &dyn LedgerTransport {
        self.transport.as_ref()
    }

    /// Signs and broadcasts `proposal`, then applies the quorum policy.
    pub async fn endorse(
        &self,
        ctx: &CallContext,
        peers: &[Peer],
        proposal: Proposal,
    ) -> Result<(SignedProposal, ResponseSet), PipelineFailure> {
        let signed = sign_proposal(ctx.signer.as_ref(), proposal)?;
        let responses =
            broadcast::broadcast(self.transport(), peers, &signed, self.proposal_timeout).await?;
        if let Err(error) = quorum::evaluate(&responses) {
            tracing::warn!(
                target: "lifecycle",
                tx_id = %signed.proposal.tx_id,
                error = %error,
                "Quorum not met; orderer will not be contacted"
            );
            return Err(PipelineFailure {
                error,
                payload: Some(LifecyclePayload::Endorsements(responses)),
            });
        }
        Ok((signed, responses))
    }

    /// Arms every listener, then submits to the orderer while the listeners
    /// wait, and reconciles once all of them have settled.
    pub async fn order_and_commit(
        &self,
        ctx: &CallContext,
        peers: &[Peer],
        signed: SignedProposal,
        responses: &ResponseSet,
    ) -> Result<LifecyclePayload, PipelineFailure> {
        let tx_id = signed.proposal.tx_id.clone();
        let listeners = commit_wait::arm(self.transport(), peers, tx_id.as_str()).await?;

        let request = OrderingRequest {
            tx_id: tx_id.clone(),
            endorsements: responses.responses().cloned().collect(),
            proposal: signed,
        };
        let (ack, outcomes) = tokio::join!(
            submit::submit(self.transport(), &ctx.topology.orderer, &request),
            commit_wait::wait_all(listeners, tx_id.as_str(), self.commit_timeout),
        );

        let verdict = submit::reconcile(&ack, &outcomes);
        let payload = LifecyclePayload::Commits {
            tx_id: tx_id.id,
            outcomes,
        };
        match verdict {
            Ok(()) => Ok(payload),
            Err(error) => Err(PipelineFailure {
                error,
                payload: Some(payload),
            }),
        }
    }

    /// Runs the full pipeline for `proposal`. Operations that do not require
    /// ordering stop after endorsement.
    pub async fn run(
        &self,
        ctx: &CallContext,
        peers: &[Peer],
        proposal: Proposal,
    ) -> Result<(ResponseSet, LifecyclePayload), PipelineFailure> {
        let kind = proposal.kind;
        let (signed, responses) = self.endorse(ctx, peers, proposal).await?;
        if !kind.requires_ordering() {
            return Ok((responses.clone(), LifecyclePayload::Endorsements(responses)));
        }
        let payload = self
            .order_and_commit(ctx, peers, signed, &responses)
            .await?;
        Ok((responses, payload))
    }
}

/// Builds a proposal with a fresh transaction id for `ctx`'s identity.
pub(crate) fn build_proposal(
    ctx: &CallContext,
    kind: OperationKind,
    chaincode: ChaincodeSpec,
    channel: Option<&str>,
    function: &str,
    args: &[String],
    peers: &[Peer],
) -> Proposal {
    let tx_id = new_transaction_id(ctx.signer.identity());
    Proposal {
        kind,
        chaincode,
        channel: channel.map(str::to_string),
        function: function.to_string(),
        args: args.iter().map(|a| a.as_bytes().to_vec()).collect(),
        targets: ledgerops_types::app::peer_names(peers),
        tx_id,
    }
}

/// Records the operation's outcome and turns it into the caller-facing result.
pub(crate) fn finish(
    kind: OperationKind,
    outcome: Result<(String, Option<LifecyclePayload>), PipelineFailure>,
) -> LifecycleResult {
    match outcome {
        Ok((message, payload)) => {
            lifecycle_metrics().inc_operations_total(kind.as_str(), "success");
            tracing::info!(target: "lifecycle", operation = %kind, "{}", message);
            LifecycleResult::success(message, payload)
        }
        Err(PipelineFailure { error, payload }) => {
            lifecycle_metrics().inc_operations_total(kind.as_str(), "failure");
            error_metrics().inc_error("lifecycle", error.code());
            tracing::error!(
                target: "lifecycle",
                operation = %kind,
                cause = %error.cause(),
                error = %error,
                "Operation failed"
            );
            LifecycleResult::failure(&error, payload)
        }
    }
}

/// Installs chaincode on an organization's peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Organization whose peers receive the package.
    pub org: String,
    /// Chaincode id, version, source path and language.
    pub chaincode: ChaincodeSpec,
    /// Peer names; empty means every peer of the organization.
    pub targets: Vec<String>,
}

impl InstallRequest {
    /// An install of `id:version` from `path` on every peer of `org`.
    pub fn new(org: &str, id: &str, version: &str, path: &str) -> Self {
        Self {
            org: org.to_string(),
            chaincode: ChaincodeSpec {
                id: id.to_string(),
                version: version.to_string(),
                path: Some(path.to_string()),
                chaincode_type: ChaincodeType::default(),
            },
            targets: Vec::new(),
        }
    }

    /// Restricts the install to the named peers.
    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }
}

/// Instantiates or upgrades chaincode on one or more channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Organization submitting the transaction.
    pub org: String,
    /// Channels to deploy on, in order.
    pub channels: Vec<String>,
    /// Chaincode id, version and language.
    pub chaincode: ChaincodeSpec,
    /// Constructor function.
    pub function: String,
    /// Constructor arguments.
    pub args: Vec<String>,
    /// Peer names; empty means every peer of the organization on the channel.
    pub targets: Vec<String>,
}

impl DeployRequest {
    /// A deployment of `id:version` on `channel` calling `init` with no arguments.
    pub fn new(org: &str, channel: &str, id: &str, version: &str) -> Self {
        Self {
            org: org.to_string(),
            channels: vec![channel.to_string()],
            chaincode: ChaincodeSpec {
                id: id.to_string(),
                version: version.to_string(),
                path: None,
                chaincode_type: ChaincodeType::default(),
            },
            function: "init".to_string(),
            args: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Deploys on `channels` instead, in order.
    pub fn on_channels(mut self, channels: Vec<String>) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the constructor call.
    pub fn with_call(mut self, function: &str, args: Vec<String>) -> Self {
        self.function = function.to_string();
        self.args = args;
        self
    }

    /// Restricts the deployment to the named peers.
    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }
}

fn check_chaincode(chaincode: &ChaincodeSpec) -> Result<(), LifecycleError> {
    if chaincode.id.is_empty() || chaincode.version.is_empty() {
        return Err(LifecycleError::InvalidRequest(
            "chaincode id and version are required".to_string(),
        ));
    }
    Ok(())
}

/// Runs install, instantiate and upgrade against the network.
#[derive(Debug, Clone)]
pub struct ChaincodeManager {
    pipeline: Pipeline,
    contexts: Arc<dyn ContextResolver>,
    user: String,
}

impl ChaincodeManager {
    /// Creates a manager signing as `config.user`.
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

    /// Installs chaincode on the target peers. Succeeds once every target
    /// endorses; nothing is ordered.
    pub async fn install(&self, request: &InstallRequest) -> LifecycleResult {
        let kind = OperationKind::Install;
        let _timer = Timer::new(lifecycle_metrics(), kind.as_str());
        finish(kind, self.try_install(request).await)
    }

    async fn try_install(
        &self,
        request: &InstallRequest,
    ) -> Result<(String, Option<LifecyclePayload>), PipelineFailure> {
        check_chaincode(&request.chaincode)?;
        if request.chaincode.path.as_deref().map_or(true, str::is_empty) {
            return Err(
                LifecycleError::InvalidRequest("chaincode path is required".to_string()).into(),
            );
        }
        let ctx = self.contexts.resolve(&request.org, &self.user, None).await?;
        let peers = select_peers(&ctx.topology, &request.targets)?;
        let proposal = build_proposal(
            &ctx,
            OperationKind::Install,
            request.chaincode.clone(),
            None,
            "",
            &[],
            &peers,
        );
        let (_, payload) = self.pipeline.run(&ctx, &peers, proposal).await?;
        let message = format!(
            "Successfully installed chaincode '{}:{}' on {} peer(s)",
            request.chaincode.id,
            request.chaincode.version,
            peers.len()
        );
        Ok((message, Some(payload)))
    }

    /// Instantiates chaincode on every requested channel, stopping at the
    /// first channel that fails.
    pub async fn instantiate(&self, request: &DeployRequest) -> LifecycleResult {
        self.deploy(OperationKind::Instantiate, request).await
    }

    /// Upgrades chaincode on every requested channel, stopping at the first
    /// channel that fails.
    pub async fn upgrade(&self, request: &DeployRequest) -> LifecycleResult {
        self.deploy(OperationKind::Upgrade, request).await
    }

    async fn deploy(&self, kind: OperationKind, request: &DeployRequest) -> LifecycleResult {
        let _timer = Timer::new(lifecycle_metrics(), kind.as_str());
        finish(kind, self.try_deploy(kind, request).await)
    }

    async fn try_deploy(
        &self,
        kind: OperationKind,
        request: &DeployRequest,
    ) -> Result<(String, Option<LifecyclePayload>), PipelineFailure> {
        check_chaincode(&request.chaincode)?;
        if request.channels.is_empty() {
            return Err(LifecycleError::InvalidRequest(
                "at least one channel is required".to_string(),
            )
            .into());
        }
        let mut last = None;
        for channel in &request.channels {
            let ctx = self
                .contexts
                .resolve(&request.org, &self.user, Some(channel.as_str()))
                .await?;
            let peers = select_peers(&ctx.topology, &request.targets)?;
            let proposal = build_proposal(
                &ctx,
                kind,
                request.chaincode.clone(),
                Some(channel.as_str()),
                &request.function,
                &request.args,
                &peers,
            );
            tracing::info!(
                target: "lifecycle",
                operation = %kind,
                channel = %channel,
                tx_id = %proposal.tx_id,
                peers = peers.len(),
                "Starting deployment"
            );
            let (_, payload) = self.pipeline.run(&ctx, &peers, proposal).await?;
            last = Some(payload);
        }
        let message = format!(
            "Successfully {} chaincode '{}:{}' on channel(s) {}",
            match kind {
                OperationKind::Upgrade => "upgraded",
                _ => "instantiated",
            },
            request.chaincode.id,
            request.chaincode.version,
            request.channels.join(", ")
        );
        Ok((message, last))
    }
}
