use thiserror::Error;

use super::types::PersonId;

/// Reasons a checked store mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// The label was empty or only whitespace.
	#[error("person name must not be empty")]
	EmptyLabelRejected,

	/// An endpoint does not name a person in the graph.
	#[error("unknown person id {0}")]
	UnknownPersonId(PersonId),

	/// Both endpoints are the same person.
	#[error("person {0} cannot be related to themselves")]
	SelfLoopRejected(PersonId),

	/// Every person id up to `u32::MAX` is taken.
	#[error("no person ids left")]
	IdsExhausted,
}

/// Result alias for checked store operations.
pub type Result<T> = std::result::Result<T, GraphError>;
