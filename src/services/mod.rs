pub mod catalog;
pub mod job_scheduler_service;
pub mod news_service;
pub mod price_service;
pub mod quote_service;
