// Filesystem-backed level and checkpoint storage.

pub mod levels;
pub mod snapshots;

pub use levels::FileLevelRepository;
pub use snapshots::FileSnapshotStore;
