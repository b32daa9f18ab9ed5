//! Execution engine: applies a passed proposal's effect once its timelock clears.
//!
//! This is the only writer of [`GovernanceParameters`] after genesis.

use crate::error::GovernanceError;
use crate::params::GovernableParam;
use crate::proposal::ProposalAction;
use crate::registry::ProposalRegistry;
use vesta_rbac::AdminRegistry;
use vesta_types::{
    Address, DomainEvent, GovernanceParameters, Outcome, ProposalId, ProposalStatus, Timestamp,
};

pub struct ExecutionEngine;

impl ExecutionEngine {
    /// Execute a passed proposal.
    ///
    /// Requires status `Passed` and, unless the proposal is an emergency, that
    /// `now >= execution_time`. The payload is re-validated against current
    /// state before anything is written, so a failure leaves everything as it was.
    pub fn execute(
        &self,
        registry: &mut ProposalRegistry,
        params: &mut GovernanceParameters,
        admins: &mut AdminRegistry,
        proposal_id: ProposalId,
        executor: &Address,
        now: Timestamp,
    ) -> Result<Outcome<()>, GovernanceError> {
        let proposal = registry
            .get(proposal_id)
            .ok_or(GovernanceError::InvalidProposalId(proposal_id))?;
        if !proposal.status.can_transition_to(ProposalStatus::Executed) {
            return Err(GovernanceError::ProposalNotPassed {
                proposal_id,
                status: proposal.status,
            });
        }
        if !proposal.is_executable_at(now) {
            return Err(GovernanceError::TimelockActive {
                proposal_id,
                executable_at: proposal.execution_time,
            });
        }
        let action = proposal.action.clone();
        self.check_action(&action, params, admins)?;

        let mut events = self.apply_action(&action, params, admins, now)?;

        let proposal = registry
            .get_mut(proposal_id)
            .ok_or(GovernanceError::InvalidProposalId(proposal_id))?;
        proposal.status = ProposalStatus::Executed;
        proposal.executed_at = Some(now);
        proposal.executed_by = Some(executor.clone());
        events.push(DomainEvent::ProposalExecuted {
            proposal_id,
            status: ProposalStatus::Executed,
            timestamp: now,
        });
        Ok(Outcome::new((), events))
    }

    /// Re-validate and write one parameter, bumping the parameter version.
    ///
    /// Returns the previous value.
    pub fn apply_parameter_change(
        &self,
        params: &mut GovernanceParameters,
        param: GovernableParam,
        new_value: u128,
    ) -> Result<Outcome<u128>, GovernanceError> {
        let version = params
            .version
            .checked_add(1)
            .ok_or(GovernanceError::Overflow)?;
        let old_value = param.apply(params, new_value)?;
        params.version = version;
        Ok(Outcome::with_event(
            old_value,
            DomainEvent::ParameterChanged {
                param: param.name().to_string(),
                old_value,
                new_value,
                version,
            },
        ))
    }

    /// Everything that could make `apply_action` fail, checked without writing.
    fn check_action(
        &self,
        action: &ProposalAction,
        params: &GovernanceParameters,
        admins: &AdminRegistry,
    ) -> Result<(), GovernanceError> {
        match action {
            ProposalAction::ParameterChange { param, new_value } => {
                param.validate(*new_value)?;
                params
                    .version
                    .checked_add(1)
                    .ok_or(GovernanceError::Overflow)?;
            }
            ProposalAction::FeatureFlag { .. } => {
                params
                    .version
                    .checked_add(1)
                    .ok_or(GovernanceError::Overflow)?;
            }
            ProposalAction::AdminRole { address, role } => {
                admins.check_governance_change(address, *role)?;
            }
            ProposalAction::Signal => {}
        }
        Ok(())
    }

    fn apply_action(
        &self,
        action: &ProposalAction,
        params: &mut GovernanceParameters,
        admins: &mut AdminRegistry,
        now: Timestamp,
    ) -> Result<Vec<DomainEvent>, GovernanceError> {
        match action {
            ProposalAction::ParameterChange { param, new_value } => Ok(self
                .apply_parameter_change(params, *param, *new_value)?
                .events),
            ProposalAction::FeatureFlag { feature, enabled } => {
                let version = params
                    .version
                    .checked_add(1)
                    .ok_or(GovernanceError::Overflow)?;
                params.features.insert(feature.clone(), *enabled);
                params.version = version;
                Ok(vec![DomainEvent::FeatureToggled {
                    feature: feature.clone(),
                    enabled: *enabled,
                    version,
                }])
            }
            ProposalAction::AdminRole { address, role } => {
                Ok(admins.apply_governance_change(address, *role, now)?.events)
            }
            ProposalAction::Signal => Ok(Vec::new()),
        }
    }
}
