mod lock_based;

// region:    --- Exports
pub use lock_based::LockedQueue;
// endregion: --- Exports
