pub(crate) mod batch;
pub(crate) mod diagnostic;
pub(crate) mod evaluator;
