pub mod window;
pub mod peak;
pub mod clustering;
pub mod workload;

pub use window::{linear_regression_slope, WindowedMetrics};
pub use peak::{hourly_distribution, peak_window};
pub use clustering::find_clusters;
pub use workload::doctor_workload;
