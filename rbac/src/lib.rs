//! Role-based access control for the Vesta core.
//!
//! Three roles ordered by privilege (`user < admin < super_admin`), each
//! registered identity carrying an explicit permission set seeded from a fixed
//! matrix. A `super_admin` passes every permission check regardless of its set.
//!
//! The registry refuses any change that would leave it without a super admin.

pub mod error;
pub mod matrix;
pub mod registry;

pub use error::AdminError;
pub use matrix::default_permissions;
pub use registry::{AdminRegistry, AdminUser};
