mod migration_app;
mod operation;

pub use migration_app::MigrationApp;
pub use operation::MigrationOperation;
