//! Command handlers for the seam CLI.

pub mod init;
pub mod reconstruct;
pub mod split;

pub use init::InitCommand;
pub use reconstruct::ReconstructCommand;
pub use split::SplitCommand;
