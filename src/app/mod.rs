// Application layer - Use case interactors

pub mod inspect_interactor;
pub mod validate_interactor;

// Re-export interactors
pub use inspect_interactor::InspectInteractor;
pub use validate_interactor::ValidateInteractor;
