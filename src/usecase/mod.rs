//! UseCase layer.
//!
//! Called by the UI layer's message router; operates on the domain through
//! the repository and audit seams. Every operation here either applies and
//! audits, or silently no-ops — there is no user-visible error channel.

pub mod alert;
pub mod board_mutation;
pub mod disconnect_user;
pub mod join_user;

pub use alert::AlertUseCase;
pub use board_mutation::BoardMutationUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use join_user::JoinUserUseCase;
