pub mod commit;
pub mod config;
pub mod dispatch;
pub mod next;
pub mod review;
pub mod shared;
pub mod show;
pub mod stats;
