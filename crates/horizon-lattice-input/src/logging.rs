//! Tracing targets used by the input router.
//!
//! The router never installs a subscriber. To see its logs, install one in
//! the application and filter on the targets below:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_input::dispatch=trace")
//!     .init();
//! ```
//!
//! Every delivered event is logged at `trace` on [`targets::DISPATCH`] with
//! the rendered [`EventParameter`](crate::EventParameter), which makes a
//! trace log a complete, ordered transcript of what each region received.

/// Target names for log filtering.
pub mod targets {
    /// Crate-wide target.
    pub const INPUT: &str = "horizon_lattice_input";
    /// Event delivery to regions and listeners.
    pub const DISPATCH: &str = "horizon_lattice_input::dispatch";
    /// Region registration, activation and focus changes.
    pub const REGION: &str = "horizon_lattice_input::region";
    /// Candidate (IME composition) updates.
    pub const IME: &str = "horizon_lattice_input::ime";
    /// Sample queue draining.
    pub const QUEUE: &str = "horizon_lattice_input::queue";
}
