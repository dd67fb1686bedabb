// Adapters layer: concrete implementations of the domain ports used by the
// CLI and by tests. Real deployments can plug their own store or transport.

pub mod mailer;
pub mod store;
