mod analyze_label;

pub use analyze_label::*;
