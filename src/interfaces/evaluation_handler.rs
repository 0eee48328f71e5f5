// ============================================================================
// Evaluation Handler Interface
// Defines the contract for observing evaluation pipeline events
// ============================================================================

use crate::numeric::{DecimalValue, ErrorKind};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier shared by all events of one `evaluate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationId(Uuid);

impl EvaluationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Events emitted by the evaluator, one stage at a time
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluationEvent {
    /// Expression accepted for evaluation
    Received {
        evaluation_id: EvaluationId,
        expression: String,
        timestamp: DateTime<Utc>,
    },

    /// Infix token sequence produced
    Tokenized {
        evaluation_id: EvaluationId,
        tokens: String,
        token_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Postfix form produced
    ConvertedToPostfix {
        evaluation_id: EvaluationId,
        postfix: String,
        timestamp: DateTime<Utc>,
    },

    /// Evaluation finished with a value
    Evaluated {
        evaluation_id: EvaluationId,
        result: DecimalValue,
        timestamp: DateTime<Utc>,
    },

    /// Evaluation failed
    Failed {
        evaluation_id: EvaluationId,
        kind: ErrorKind,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl EvaluationEvent {
    pub fn evaluation_id(&self) -> EvaluationId {
        match self {
            EvaluationEvent::Received { evaluation_id, .. }
            | EvaluationEvent::Tokenized { evaluation_id, .. }
            | EvaluationEvent::ConvertedToPostfix { evaluation_id, .. }
            | EvaluationEvent::Evaluated { evaluation_id, .. }
            | EvaluationEvent::Failed { evaluation_id, .. } => *evaluation_id,
        }
    }
}

/// Event handler trait for observing evaluations.
/// Implementations can handle logging, metrics, history, etc.
pub trait EvaluationHandler: Send + Sync {
    /// Handle an evaluation event
    fn on_event(&self, event: EvaluationEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<EvaluationEvent>) {
        for event in events {
            self.on_event(event);
        }
    }

    /// Whether events should be built at all. Handlers that discard
    /// everything return `false` so the evaluator can skip rendering.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// No-op event handler
pub struct NoOpEvaluationHandler;

impl EvaluationHandler for NoOpEvaluationHandler {
    fn on_event(&self, _event: EvaluationEvent) {
        // Do nothing
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Logging event handler
pub struct LoggingEvaluationHandler;

impl EvaluationHandler for LoggingEvaluationHandler {
    fn on_event(&self, event: EvaluationEvent) {
        tracing::debug!("Evaluator event: {:?}", event);
    }
}
