//! Page Components

mod assistant;
mod dashboard;

pub use assistant::AssistantWidget;
pub use dashboard::DashboardPage;
