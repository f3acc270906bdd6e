//! Task persistence and lifecycle management.

pub mod in_memory_task_store;
pub mod task_manager;
pub mod task_store;

pub use in_memory_task_store::InMemoryTaskStore;
pub use task_manager::{are_modalities_compatible, TaskSubscription, WeatherTaskManager};
pub use task_store::TaskStore;
