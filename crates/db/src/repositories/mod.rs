pub mod job_log_repo;

pub use job_log_repo::JobLogRepo;
