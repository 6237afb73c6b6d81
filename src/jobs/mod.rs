//! Background Jobs Module
//!
//! Jobs here are registered with the job scheduler service and run on a cron
//! schedule, independently of user requests.
//!
//! # Available Jobs
//!
//! - `price_update_job` - Nudges the latest close of every stock to simulate a live market

pub mod price_update_job;
