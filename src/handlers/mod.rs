// Two handler tiers: public (no auth, /auth/* and liveness) and protected
// (JWT required, /api/*). Role gating happens per-handler via
// AuthUser::require_role.

pub mod protected;
pub mod public;
