mod remote;
mod size_heuristic;

pub use remote::RemoteClassifier;
pub use size_heuristic::{LARGE_UPLOAD_THRESHOLD_BYTES, SizeHeuristicClassifier};
