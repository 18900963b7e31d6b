//! Connector operation lifecycle tracking.
//!
//! Every connector invocation moves `ready -> in_flight -> {succeeded,
//! failed}`. There is no cancellation state: once an operation is in flight
//! it runs to completion or failure.

use super::{ConnectorDomainError, ConnectorKind};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one tracked connector operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Creates a new random operation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a connector operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    /// Created but not yet invoked.
    Ready,
    /// Invoked and awaiting completion.
    InFlight,
    /// Completed successfully.
    Succeeded,
    /// Completed with a failure.
    Failed,
}

impl OperationState {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::InFlight => "in_flight",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Returns whether the state is final.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns whether moving to `target` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Ready, Self::InFlight) | (Self::InFlight, Self::Succeeded | Self::Failed)
        )
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked connector invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    id: OperationId,
    connector: ConnectorKind,
    operation: String,
    state: OperationState,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    failure: Option<String>,
}

impl OperationRecord {
    /// Creates a record in the `ready` state.
    #[must_use]
    pub fn ready(
        connector: ConnectorKind,
        operation: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: OperationId::new(),
            connector,
            operation: operation.into(),
            state: OperationState::Ready,
            created_at: clock.utc(),
            finished_at: None,
            failure: None,
        }
    }

    /// Returns the operation identifier.
    #[must_use]
    pub const fn id(&self) -> OperationId {
        self.id
    }

    /// Returns the connector the operation ran against.
    #[must_use]
    pub const fn connector(&self) -> ConnectorKind {
        self.connector
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> OperationState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, once terminal.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns the failure reason, when the operation failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Marks the operation as invoked.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::InvalidStateTransition`] unless the
    /// operation is `ready`.
    pub fn start(&mut self) -> Result<(), ConnectorDomainError> {
        self.transition(OperationState::InFlight)
    }

    /// Marks the operation as succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::InvalidStateTransition`] unless the
    /// operation is `in_flight`.
    pub fn succeed(&mut self, clock: &impl Clock) -> Result<(), ConnectorDomainError> {
        self.transition(OperationState::Succeeded)?;
        self.finished_at = Some(clock.utc());
        Ok(())
    }

    /// Marks the operation as failed with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::InvalidStateTransition`] unless the
    /// operation is `in_flight`.
    pub fn fail(
        &mut self,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ConnectorDomainError> {
        self.transition(OperationState::Failed)?;
        self.finished_at = Some(clock.utc());
        self.failure = Some(reason.into());
        Ok(())
    }

    fn transition(&mut self, target: OperationState) -> Result<(), ConnectorDomainError> {
        if !self.state.can_transition_to(target) {
            return Err(ConnectorDomainError::InvalidStateTransition {
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }
}

/// Ordered log of the connector operations issued for one mission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationLog {
    records: Vec<OperationRecord>,
}

impl OperationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new operation and marks it in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError`] if the fresh record rejects the
    /// transition.
    pub fn begin(
        &mut self,
        connector: ConnectorKind,
        operation: &str,
        clock: &impl Clock,
    ) -> Result<OperationId, ConnectorDomainError> {
        let mut record = OperationRecord::ready(connector, operation, clock);
        record.start()?;
        let id = record.id();
        tracing::debug!(%connector, operation, operation_id = %id, "connector operation in flight");
        self.records.push(record);
        Ok(id)
    }

    /// Completes an in-flight operation with the outcome's status.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::UnknownOperation`] when `id` is not in
    /// the log, or a transition error when the record is not in flight.
    pub fn complete(
        &mut self,
        id: OperationId,
        outcome: Result<(), String>,
        clock: &impl Clock,
    ) -> Result<(), ConnectorDomainError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| ConnectorDomainError::UnknownOperation(id.to_string()))?;
        match outcome {
            Ok(()) => record.succeed(clock)?,
            Err(reason) => record.fail(reason, clock)?,
        }
        tracing::debug!(
            connector = %record.connector(),
            operation = record.operation(),
            operation_id = %id,
            state = %record.state(),
            "connector operation finished"
        );
        Ok(())
    }

    /// Returns the tracked operations in invocation order.
    #[must_use]
    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    /// Returns how many operations were issued against a connector.
    #[must_use]
    pub fn count_for(&self, connector: ConnectorKind) -> usize {
        self.records
            .iter()
            .filter(|record| record.connector() == connector)
            .count()
    }
}
