pub mod comment_repository;
pub mod distributed_lock;
pub mod post_event_log;
pub mod post_repository;
pub mod task_spawner;
pub mod time_service;
