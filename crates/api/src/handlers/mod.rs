pub mod job_monitor;
