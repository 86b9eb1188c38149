pub mod live_detection_use_case;
pub mod run_logger;
pub mod stop_flag;
