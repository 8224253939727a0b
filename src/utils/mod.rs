mod time_utils;

pub use time_utils::{TimeUtils, format_duration, format_local_time};
