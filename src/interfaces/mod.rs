// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod evaluation_handler;

pub use evaluation_handler::{
    EvaluationEvent, EvaluationHandler, EvaluationId, LoggingEvaluationHandler,
    NoOpEvaluationHandler,
};
